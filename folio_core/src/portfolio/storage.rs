use chrono::Utc;
use sled::{Db, Tree};

use super::dto::{DEFAULT_CURRENCY, Holding, ProfileUpdate, UserProfile};
use crate::error::{FolioError, Result};

const TREE_NAME: &str = "users";

/// One JSON document per user, keyed by the auth-provided user id.
///
/// Every mutation is a read-modify-write of the whole document with no
/// transaction around it, so two sessions editing the same profile
/// overwrite each other (last write wins).
#[derive(Clone)]
pub struct PortfolioStorage {
    tree: Tree,
}

impl PortfolioStorage {
    pub fn new(db: &Db) -> Result<Self> {
        let tree = db.open_tree(TREE_NAME)?;
        Ok(Self { tree })
    }

    fn set_user_profile(&self, profile: &UserProfile) -> Result<()> {
        let encoded = serde_json::to_vec(profile)?;
        self.tree.insert(profile.id.as_bytes(), encoded)?;
        Ok(())
    }

    fn require_user_profile(&self, uid: &str) -> Result<UserProfile> {
        self.get_user_profile(uid)?
            .ok_or_else(|| FolioError::ProfileNotFound(uid.to_string()))
    }

    pub fn create_user_profile(
        &self,
        uid: &str,
        display_name: &str,
        email: &str,
    ) -> Result<UserProfile> {
        let profile = UserProfile {
            id: uid.to_string(),
            display_name: display_name.to_string(),
            email: email.to_string(),
            preferred_currency: DEFAULT_CURRENCY.to_string(),
            created_at: Utc::now().to_rfc3339(),
            coins: Vec::new(),
        };

        self.set_user_profile(&profile)?;
        log::info!("Created user profile {}", uid);

        Ok(profile)
    }

    pub fn get_user_profile(&self, uid: &str) -> Result<Option<UserProfile>> {
        match self.tree.get(uid.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn update_user_profile(&self, uid: &str, update: ProfileUpdate) -> Result<UserProfile> {
        let mut profile = self.require_user_profile(uid)?;

        if let Some(display_name) = update.display_name {
            profile.display_name = display_name.trim().to_string();
        }

        self.set_user_profile(&profile)?;
        Ok(profile)
    }

    /// Adds `amount` to the holding for `coin_id`, creating the holding when
    /// the user does not track the coin yet.
    pub fn add_coin(&self, uid: &str, coin_id: &str, amount: f64) -> Result<UserProfile> {
        validate_amount(amount)?;
        let mut profile = self.require_user_profile(uid)?;

        match profile.coins.iter_mut().find(|coin| coin.id == coin_id) {
            Some(holding) => {
                let total = holding.amount + amount;
                validate_amount(total)?;
                holding.amount = total;
            }
            None => profile.coins.push(Holding {
                id: coin_id.to_string(),
                amount,
                added_at: Utc::now().to_rfc3339(),
            }),
        }

        self.set_user_profile(&profile)?;
        log::debug!("Added {} {} to portfolio of {}", amount, coin_id, uid);

        Ok(profile)
    }

    pub fn update_coin_amount(&self, uid: &str, coin_id: &str, amount: f64) -> Result<UserProfile> {
        validate_amount(amount)?;
        let mut profile = self.require_user_profile(uid)?;

        if let Some(holding) = profile.coins.iter_mut().find(|coin| coin.id == coin_id) {
            holding.amount = amount;
        }

        self.set_user_profile(&profile)?;
        Ok(profile)
    }

    pub fn remove_coin(&self, uid: &str, coin_id: &str) -> Result<UserProfile> {
        let mut profile = self.require_user_profile(uid)?;

        profile.coins.retain(|coin| coin.id != coin_id);

        self.set_user_profile(&profile)?;
        log::debug!("Removed {} from portfolio of {}", coin_id, uid);

        Ok(profile)
    }

    pub fn update_preferred_currency(&self, uid: &str, currency: &str) -> Result<UserProfile> {
        let mut profile = self.require_user_profile(uid)?;

        profile.preferred_currency = currency.trim().to_lowercase();

        self.set_user_profile(&profile)?;
        Ok(profile)
    }
}

fn validate_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(FolioError::InvalidAmount(amount))
    }
}

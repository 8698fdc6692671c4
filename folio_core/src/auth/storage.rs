use chrono::Utc;
use sled::{Db, Tree};
use uuid::Uuid;

use super::dto::{Credentials, MIN_PASSWORD_LEN, is_valid_email, normalize_email};
use super::password::{hash_password, verify_password};
use crate::error::{FolioError, Result};

/// Storage helper for email/password accounts and revoked sessions
#[derive(Clone)]
pub struct AuthStorage {
    db: Db,
}

impl AuthStorage {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Login records keyed by normalized email
    pub fn credentials_tree(&self) -> Result<Tree> {
        Ok(self.db.open_tree("credentials")?)
    }

    /// Logged-out token ids mapped to their expiry
    pub fn revoked_sessions_tree(&self) -> Result<Tree> {
        Ok(self.db.open_tree("revoked_sessions")?)
    }

    /// Register a new account
    pub fn signup(&self, email: &str, password: &str) -> Result<Credentials> {
        let email = normalize_email(email);

        if !is_valid_email(&email) {
            return Err(FolioError::InvalidEmail);
        }

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FolioError::WeakPassword(MIN_PASSWORD_LEN));
        }

        let tree = self.credentials_tree()?;

        if tree.contains_key(email.as_bytes())? {
            return Err(FolioError::EmailInUse);
        }

        let credentials = Credentials {
            uid: Uuid::new_v4().to_string(),
            email: email.clone(),
            password_hash: hash_password(password)?,
            created_at: Utc::now().to_rfc3339(),
        };

        let encoded = serde_json::to_vec(&credentials)?;

        // insert only while the email is still free
        if tree
            .compare_and_swap(email.as_bytes(), None as Option<&[u8]>, Some(encoded))?
            .is_err()
        {
            return Err(FolioError::EmailInUse);
        }

        log::info!("Registered account {}", credentials.uid);

        Ok(credentials)
    }

    /// Check an email/password pair
    pub fn login(&self, email: &str, password: &str) -> Result<Credentials> {
        let tree = self.credentials_tree()?;

        let Some(bytes) = tree.get(normalize_email(email).as_bytes())? else {
            return Err(FolioError::InvalidCredentials);
        };

        let credentials: Credentials = serde_json::from_slice(&bytes)?;

        if !verify_password(password, &credentials.password_hash) {
            return Err(FolioError::InvalidCredentials);
        }

        Ok(credentials)
    }

    /// Mark a session token as logged out until it would have expired anyway
    pub fn revoke(&self, jti: &str, expires_at: i64) -> Result<()> {
        let tree = self.revoked_sessions_tree()?;
        tree.insert(jti.as_bytes(), expires_at.to_be_bytes().to_vec())?;
        Ok(())
    }

    pub fn is_revoked(&self, jti: &str) -> Result<bool> {
        let tree = self.revoked_sessions_tree()?;
        Ok(tree.contains_key(jti.as_bytes())?)
    }

    /// Drop revocations whose tokens have expired
    pub fn purge_expired(&self) -> Result<usize> {
        let tree = self.revoked_sessions_tree()?;
        let now = Utc::now().timestamp();

        let mut expired = Vec::new();

        for result in tree.iter() {
            let (key, value) = result?;
            let expires_at = <[u8; 8]>::try_from(value.as_ref())
                .map(i64::from_be_bytes)
                .unwrap_or(0);

            if expires_at <= now {
                expired.push(key);
            }
        }

        for key in &expired {
            tree.remove(key)?;
        }

        Ok(expired.len())
    }
}

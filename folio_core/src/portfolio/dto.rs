use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_CURRENCY: &str = "usd";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Holding {
    pub id: String,
    pub amount: f64,
    pub added_at: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub preferred_currency: String,
    pub created_at: String,
    #[serde(default)]
    pub coins: Vec<Holding>,
}

impl UserProfile {
    pub fn holding(&self, coin_id: &str) -> Option<&Holding> {
        self.coins.iter().find(|coin| coin.id == coin_id)
    }

    pub fn coin_ids(&self) -> Vec<String> {
        self.coins.iter().map(|coin| coin.id.clone()).collect()
    }
}

#[derive(Deserialize, Serialize, Debug, Default, ToSchema)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct TrackCoinRequest {
    pub coin_id: String,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct AddCoinRequest {
    pub coin_id: String,
    /// Leave empty to track the coin without a quantity.
    pub amount: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct UpdateAmountRequest {
    pub amount: f64,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct CurrencyRequest {
    pub currency: String,
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Row of `/coins/markets`: a live snapshot, never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CoinMarket {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub current_price: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub total_volume: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, ToSchema)]
pub struct CoinImage {
    pub thumb: Option<String>,
    pub small: Option<String>,
    pub large: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, ToSchema)]
pub struct CoinMarketData {
    #[serde(default)]
    pub current_price: HashMap<String, f64>,
    pub price_change_percentage_24h: Option<f64>,
}

/// Subset of `/coins/{id}`.
#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct CoinDetail {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: CoinImage,
    #[serde(default)]
    pub market_data: Option<CoinMarketData>,
}

impl CoinDetail {
    /// Projects the detail payload onto a market row priced in `currency`.
    /// Prices the provider does not quote come out as zero.
    pub fn snapshot(&self, currency: &str) -> CoinMarket {
        let currency = currency.to_lowercase();
        let market_data = self.market_data.as_ref();

        CoinMarket {
            id: self.id.clone(),
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            image: self.image.small.clone(),
            current_price: Some(
                market_data
                    .and_then(|data| data.current_price.get(&currency).copied())
                    .unwrap_or(0.0),
            ),
            price_change_percentage_24h: Some(
                market_data
                    .and_then(|data| data.price_change_percentage_24h)
                    .unwrap_or(0.0),
            ),
            market_cap: None,
            market_cap_rank: None,
            total_volume: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct SearchCoin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    pub thumb: Option<String>,
    pub large: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct SearchResponse {
    #[serde(default)]
    pub coins: Vec<SearchCoin>,
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum QueryValue {
    Boolean(bool),
    Number(u32),
    String(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_uses_requested_currency() {
        let detail: CoinDetail = serde_json::from_value(json!({
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": { "thumb": "t.png", "small": "s.png", "large": "l.png" },
            "market_data": {
                "current_price": { "usd": 60000.0, "eur": 55000.0 },
                "price_change_percentage_24h": -1.5
            }
        }))
        .unwrap();

        let snapshot = detail.snapshot("EUR");
        assert_eq!(snapshot.current_price, Some(55000.0));
        assert_eq!(snapshot.price_change_percentage_24h, Some(-1.5));
        assert_eq!(snapshot.image.as_deref(), Some("s.png"));

        let snapshot = detail.snapshot("jpy");
        assert_eq!(snapshot.current_price, Some(0.0));
    }

    #[test]
    fn test_detail_without_market_data() {
        let detail: CoinDetail = serde_json::from_value(json!({
            "id": "obscure",
            "symbol": "obs",
            "name": "Obscure"
        }))
        .unwrap();

        let snapshot = detail.snapshot("usd");
        assert_eq!(snapshot.current_price, Some(0.0));
        assert_eq!(snapshot.price_change_percentage_24h, Some(0.0));
        assert!(snapshot.image.is_none());
    }
}

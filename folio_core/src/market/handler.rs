use log::{debug, error, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::dto::{CoinDetail, CoinMarket, QueryValue, SearchCoin, SearchResponse};
use crate::error::{FolioError, Result};

pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

const API_KEY_HEADER: &str = "x-cg-demo-api-key";
const TRENDING_PAGE_SIZE: u32 = 10;
const PORTFOLIO_PAGE_SIZE: u32 = 100;
const SEARCH_RESULT_LIMIT: usize = 10;

pub const FALLBACK_CURRENCIES: [&str; 5] = ["usd", "eur", "inr", "gbp", "jpy"];

/// Client for the CoinGecko v3 REST API.
#[derive(Clone)]
pub struct CoinGecko {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGecko {
    pub fn new(base_url: Option<&str>, api_key: Option<String>) -> Self {
        let client = Client::new();
        let base_url = base_url
            .unwrap_or(COINGECKO_API_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            client,
            base_url,
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("Requesting market data from {}", url);

        let request = self.client.get(url).header("accept", "application/json");

        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("CoinGecko API rate limit exceeded");
            return Err(FolioError::RateLimited);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());

        error!("CoinGecko responded with {}: {}", status, body);

        Err(FolioError::Market {
            status: status.as_u16(),
            body,
        })
    }

    /// Top coins by market capitalisation.
    pub async fn get_trending_coins(&self, currency: &str) -> Result<Vec<CoinMarket>> {
        let response = self
            .get("/coins/markets")
            .query(&[
                ("vs_currency", QueryValue::String(currency.to_lowercase())),
                ("order", QueryValue::String("market_cap_desc".to_string())),
                ("per_page", QueryValue::Number(TRENDING_PAGE_SIZE)),
                ("page", QueryValue::Number(1)),
                ("sparkline", QueryValue::Boolean(false)),
            ])
            .send()
            .await?;

        Self::read_json(response).await
    }

    pub async fn get_coin_data(&self, id: &str) -> Result<CoinDetail> {
        if !is_valid_coin_id(id) {
            return Err(FolioError::CoinNotFound(id.to_string()));
        }

        let response = self.get(&format!("/coins/{}", id)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(FolioError::CoinNotFound(id.to_string()));
        }

        Self::read_json(response).await
    }

    /// Market rows for `ids` priced in `currency`. Ids the provider does not
    /// know are silently absent from the result.
    pub async fn get_multiple_coins_data(
        &self,
        ids: &[String],
        currency: &str,
    ) -> Result<Vec<CoinMarket>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .get("/coins/markets")
            .query(&[
                ("vs_currency", QueryValue::String(currency.to_lowercase())),
                ("ids", QueryValue::String(ids.join(","))),
                ("order", QueryValue::String("market_cap_desc".to_string())),
                ("per_page", QueryValue::Number(PORTFOLIO_PAGE_SIZE)),
                ("page", QueryValue::Number(1)),
                ("sparkline", QueryValue::Boolean(false)),
            ])
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn fetch_supported_currencies(&self) -> Result<Vec<String>> {
        let response = self.get("/simple/supported_vs_currencies").send().await?;
        Self::read_json(response).await
    }

    /// Currencies the provider can price in. Falls back to a short built-in
    /// list whenever the provider cannot be reached.
    pub async fn get_supported_currencies(&self) -> Vec<String> {
        match self.fetch_supported_currencies().await {
            Ok(currencies) if !currencies.is_empty() => currencies,
            Ok(_) => fallback_currencies(),
            Err(e) => {
                error!("Error fetching supported currencies: {}", e);
                fallback_currencies()
            }
        }
    }

    pub async fn search_coins(&self, query: &str) -> Result<Vec<SearchCoin>> {
        let response = self
            .get("/search")
            .query(&[("query", query)])
            .send()
            .await?;

        let mut body: SearchResponse = Self::read_json(response).await?;
        body.coins.truncate(SEARCH_RESULT_LIMIT);

        Ok(body.coins)
    }
}

/// Provider coin ids are a single path segment of `[a-z0-9_-]`.
fn is_valid_coin_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

fn fallback_currencies() -> Vec<String> {
    FALLBACK_CURRENCIES.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;

    async fn create_server_and_client(api_key: Option<&str>) -> (ServerGuard, CoinGecko) {
        let server = Server::new_async().await;
        let client = CoinGecko::new(Some(&server.url()), api_key.map(str::to_string));
        (server, client)
    }

    fn market_row(id: &str, price: f64) -> serde_json::Value {
        json!({
            "id": id,
            "symbol": &id[..3],
            "name": id,
            "image": format!("https://img.example/{}.png", id),
            "current_price": price,
            "price_change_percentage_24h": 1.25,
            "market_cap": 1000.0,
            "market_cap_rank": 1,
            "total_volume": 10.0
        })
    }

    #[tokio::test]
    async fn test_get_multiple_coins_data() {
        let (mut server, client) = create_server_and_client(None).await;

        let mock = server
            .mock("GET", "/coins/markets")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("vs_currency".into(), "eur".into()),
                Matcher::UrlEncoded("ids".into(), "bitcoin,ethereum".into()),
                Matcher::UrlEncoded("per_page".into(), "100".into()),
                Matcher::UrlEncoded("sparkline".into(), "false".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([market_row("bitcoin", 55000.0), market_row("ethereum", 2500.0)])
                    .to_string(),
            )
            .create_async()
            .await;

        let ids = vec!["bitcoin".to_string(), "ethereum".to_string()];
        let coins = client.get_multiple_coins_data(&ids, "EUR").await.unwrap();

        mock.assert_async().await;
        assert_eq!(coins.len(), 2);
        assert_eq!(coins[0].id, "bitcoin");
        assert_eq!(coins[1].current_price, Some(2500.0));
    }

    #[tokio::test]
    async fn test_get_multiple_coins_data_without_ids_skips_request() {
        let (mut server, client) = create_server_and_client(None).await;

        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let coins = client.get_multiple_coins_data(&[], "usd").await.unwrap();

        mock.assert_async().await;
        assert!(coins.is_empty());
    }

    #[tokio::test]
    async fn test_api_key_header_is_sent() {
        let (mut server, client) = create_server_and_client(Some("demo-key")).await;

        let mock = server
            .mock("GET", "/coins/markets")
            .match_query(Matcher::Any)
            .match_header("x-cg-demo-api-key", "demo-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!([market_row("bitcoin", 60000.0)]).to_string())
            .create_async()
            .await;

        let coins = client.get_trending_coins("usd").await.unwrap();

        mock.assert_async().await;
        assert_eq!(coins.len(), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_is_reported() {
        let (mut server, client) = create_server_and_client(None).await;

        server
            .mock("GET", "/coins/markets")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body("Too Many Requests")
            .create_async()
            .await;

        let result = client.get_trending_coins("usd").await;
        assert!(matches!(result, Err(FolioError::RateLimited)));
    }

    #[tokio::test]
    async fn test_provider_error_keeps_status_and_body() {
        let (mut server, client) = create_server_and_client(None).await;

        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        match client.search_coins("bitcoin").await {
            Err(FolioError::Market { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_coin_data_not_found() {
        let (mut server, client) = create_server_and_client(None).await;

        server
            .mock("GET", "/coins/not-a-coin")
            .with_status(404)
            .with_body(json!({ "error": "coin not found" }).to_string())
            .create_async()
            .await;

        let result = client.get_coin_data("not-a-coin").await;
        assert!(matches!(result, Err(FolioError::CoinNotFound(id)) if id == "not-a-coin"));
    }

    #[tokio::test]
    async fn test_get_coin_data_rejects_path_segments() {
        let (mut server, client) = create_server_and_client(Some("demo-key")).await;

        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        for id in ["../simple/supported_vs_currencies", "bitcoin/tickers", "..", "Bitcoin", ""] {
            let result = client.get_coin_data(id).await;
            assert!(matches!(result, Err(FolioError::CoinNotFound(_))), "{:?}", id);
        }

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_keeps_first_ten_results() {
        let (mut server, client) = create_server_and_client(None).await;

        let coins: Vec<_> = (0..15)
            .map(|i| {
                json!({
                    "id": format!("coin-{}", i),
                    "name": format!("Coin {}", i),
                    "symbol": format!("C{}", i),
                    "market_cap_rank": i + 1,
                    "thumb": null,
                    "large": null
                })
            })
            .collect();

        server
            .mock("GET", "/search")
            .match_query(Matcher::UrlEncoded("query".into(), "coin".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "coins": coins, "exchanges": [] }).to_string())
            .create_async()
            .await;

        let results = client.search_coins("coin").await.unwrap();
        assert_eq!(results.len(), 10);
        assert_eq!(results[0].id, "coin-0");
        assert_eq!(results[9].id, "coin-9");
    }

    #[tokio::test]
    async fn test_supported_currencies_fallback() {
        let (mut server, client) = create_server_and_client(None).await;

        server
            .mock("GET", "/simple/supported_vs_currencies")
            .with_status(500)
            .create_async()
            .await;

        let currencies = client.get_supported_currencies().await;
        assert_eq!(currencies, vec!["usd", "eur", "inr", "gbp", "jpy"]);
    }

    #[tokio::test]
    async fn test_supported_currencies() {
        let (mut server, client) = create_server_and_client(None).await;

        server
            .mock("GET", "/simple/supported_vs_currencies")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!(["btc", "usd", "chf"]).to_string())
            .create_async()
            .await;

        let currencies = client.get_supported_currencies().await;
        assert_eq!(currencies, vec!["btc", "usd", "chf"]);
    }
}

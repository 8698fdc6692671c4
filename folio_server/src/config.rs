use std::env;

use anyhow::{Context, Result};

pub struct ServerConfig {
    pub server_domain: String,
    pub sled_url: String,
    pub secret: String,
    pub coingecko_api_url: Option<String>,
    pub coingecko_api_key: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let server_domain = env::var("SERVER_DOMAIN").unwrap_or("0.0.0.0:3000".to_string());
        let sled_url = env::var("SLED_URL").unwrap_or("folio_db".to_string());
        let secret = env::var("SECRET").context("SECRET environment variable not set")?;

        let coingecko_api_url = env::var("COINGECKO_API_URL").ok();
        let coingecko_api_key = env::var("COINGECKO_API_KEY").ok();

        Ok(Self {
            server_domain,
            sled_url,
            secret,
            coingecko_api_url,
            coingecko_api_key,
        })
    }
}

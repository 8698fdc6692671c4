mod auth;
mod config;
mod docs;
mod error;
mod info;
mod market;
mod middlewares;
mod portfolio;
mod profile;
mod router;
mod state;

use std::sync::Arc;

use anyhow::Context;
use config::ServerConfig;
use dotenvy::dotenv;
use folio_core::{
    auth::storage::AuthStorage, helpers::jwt::JwtManager, market::handler::CoinGecko,
    portfolio::storage::PortfolioStorage,
};
use router::router;
use state::ServerState;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;

    let db = sled::open(&config.sled_url)
        .with_context(|| format!("Failed to open sled database at {}", config.sled_url))?;

    let state = Arc::new(ServerState::from((
        PortfolioStorage::new(&db)?,
        AuthStorage::new(db.clone()),
        JwtManager::new(config.secret),
        CoinGecko::new(
            config.coingecko_api_url.as_deref(),
            config.coingecko_api_key,
        ),
    )));

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.server_domain)
        .await
        .with_context(|| format!("Failed to bind {}", config.server_domain))?;

    log::info!("Listening on {}", config.server_domain);

    axum::serve(listener, app).await?;

    Ok(())
}

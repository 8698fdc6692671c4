use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use folio_core::{
    market::dto::{CoinMarket, SearchCoin},
    search::debounce::MIN_QUERY_LEN,
};

use super::dto::{CurrencyQuery, SearchQuery};
use crate::{error::ErrorServer, state::ServerState};

#[utoipa::path(
    get,
    path = "/market/trending",
    params(CurrencyQuery),
    description = "Top coins by market cap",
    responses(
        (status = 200, description = "Success", body = [CoinMarket]),
        (status = 429, description = "Rate limit exceeded"),
    )
)]
pub async fn trending(
    State(server_state): State<Arc<ServerState>>,
    Query(query): Query<CurrencyQuery>,
) -> Result<Json<Vec<CoinMarket>>, ErrorServer> {
    let coins = server_state
        .market()
        .get_trending_coins(&query.currency())
        .await?;

    Ok(Json(coins))
}

#[utoipa::path(
    get,
    path = "/market/coins/{id}",
    params(("id" = String, Path, description = "Coin id"), CurrencyQuery),
    description = "Live snapshot of a single coin",
    responses(
        (status = 200, description = "Success", body = CoinMarket),
        (status = 404, description = "Coin not found"),
        (status = 429, description = "Rate limit exceeded"),
    )
)]
pub async fn coin(
    State(server_state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Query(query): Query<CurrencyQuery>,
) -> Result<Json<CoinMarket>, ErrorServer> {
    let detail = server_state.market().get_coin_data(&id).await?;

    Ok(Json(detail.snapshot(&query.currency())))
}

#[utoipa::path(
    get,
    path = "/market/search",
    params(SearchQuery),
    description = "Search coins by name or symbol (at least 3 characters)",
    responses(
        (status = 200, description = "Success", body = [SearchCoin]),
        (status = 429, description = "Rate limit exceeded"),
    )
)]
pub async fn search(
    State(server_state): State<Arc<ServerState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SearchCoin>>, ErrorServer> {
    let term = query.query.trim();

    if term.chars().count() < MIN_QUERY_LEN {
        return Ok(Json(Vec::new()));
    }

    let coins = server_state.market().search_coins(term).await?;

    Ok(Json(coins))
}

#[utoipa::path(
    get,
    path = "/market/currencies",
    description = "Currencies portfolio values can be displayed in",
    responses(
        (status = 200, description = "Success", body = [String]),
    )
)]
pub async fn currencies(State(server_state): State<Arc<ServerState>>) -> Json<Vec<String>> {
    Json(server_state.market().get_supported_currencies().await)
}

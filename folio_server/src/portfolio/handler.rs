use std::sync::Arc;

use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
};
use folio_core::{
    FolioError,
    helpers::dto::UserPayload,
    portfolio::{
        dto::{AddCoinRequest, TrackCoinRequest, UpdateAmountRequest, UserProfile},
        valuation::{merge_holdings, summarize},
    },
};
use log::{debug, info};

use super::dto::PortfolioResponse;
use crate::{error::ErrorServer, state::ServerState};

fn load_profile(server_state: &ServerState, uid: &str) -> Result<UserProfile, ErrorServer> {
    Ok(server_state
        .portfolio()
        .get_user_profile(uid)?
        .ok_or_else(|| FolioError::ProfileNotFound(uid.to_string()))?)
}

fn coin_id(raw: &str) -> Result<String, ErrorServer> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(ErrorServer::bad_request("Coin id is required"));
    }
    Ok(id.to_string())
}

/// Profile → live prices for its coin ids → zip by id → summary.
async fn value_portfolio(
    server_state: &ServerState,
    profile: UserProfile,
) -> Result<PortfolioResponse, ErrorServer> {
    let currency = profile.preferred_currency.clone();

    let markets = server_state
        .market()
        .get_multiple_coins_data(&profile.coin_ids(), &currency)
        .await?;

    debug!(
        "Fetched {} market rows for {} holdings of {}",
        markets.len(),
        profile.coins.len(),
        profile.id
    );

    let coins = merge_holdings(&profile.coins, markets);
    let summary = summarize(&coins, &currency);

    Ok(PortfolioResponse {
        currency,
        coins,
        summary,
    })
}

#[utoipa::path(
    get,
    path = "/portfolio",
    description = "Holdings priced in the preferred currency, with totals",
    responses(
        (status = 200, description = "Success", body = PortfolioResponse),
        (status = 401, description = "Unauthorized"),
        (status = 429, description = "Market data rate limit exceeded"),
    )
)]
pub async fn get_portfolio(
    State(server_state): State<Arc<ServerState>>,
    Extension(user): Extension<UserPayload>,
) -> Result<Json<PortfolioResponse>, ErrorServer> {
    let profile = load_profile(&server_state, &user.uid)?;
    let response = value_portfolio(&server_state, profile).await?;

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/portfolio/track",
    request_body = TrackCoinRequest,
    description = "Start tracking a coin without a quantity",
    responses(
        (status = 201, description = "Created", body = PortfolioResponse),
        (status = 404, description = "Coin not found"),
        (status = 409, description = "Coin already in portfolio"),
    )
)]
pub async fn track_coin(
    State(server_state): State<Arc<ServerState>>,
    Extension(user): Extension<UserPayload>,
    Json(request): Json<TrackCoinRequest>,
) -> Result<(StatusCode, Json<PortfolioResponse>), ErrorServer> {
    let id = coin_id(&request.coin_id)?;
    let profile = load_profile(&server_state, &user.uid)?;

    let coin = server_state.market().get_coin_data(&id).await?;

    if profile.holding(&coin.id).is_some() {
        return Err(ErrorServer::new(
            StatusCode::CONFLICT,
            format!("{} is already in your portfolio", coin.name),
        ));
    }

    let profile = server_state.portfolio().add_coin(&user.uid, &coin.id, 0.0)?;

    info!("{} added {} for tracking", user.uid, coin.id);

    let response = value_portfolio(&server_state, profile).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/portfolio/coins",
    request_body = AddCoinRequest,
    description = "Add a quantity of a coin; repeated adds accumulate",
    responses(
        (status = 200, description = "Success", body = UserProfile),
        (status = 400, description = "Invalid amount"),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn add_coin(
    State(server_state): State<Arc<ServerState>>,
    Extension(user): Extension<UserPayload>,
    Json(request): Json<AddCoinRequest>,
) -> Result<Json<UserProfile>, ErrorServer> {
    let id = coin_id(&request.coin_id)?;
    let amount = request.amount.unwrap_or(0.0);

    let profile = server_state.portfolio().add_coin(&user.uid, &id, amount)?;

    Ok(Json(profile))
}

#[utoipa::path(
    put,
    path = "/portfolio/coins/{id}",
    request_body = UpdateAmountRequest,
    params(("id" = String, Path, description = "Coin id")),
    description = "Set the quantity held of a coin",
    responses(
        (status = 200, description = "Success", body = UserProfile),
        (status = 400, description = "Invalid amount"),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn update_coin_amount(
    State(server_state): State<Arc<ServerState>>,
    Extension(user): Extension<UserPayload>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAmountRequest>,
) -> Result<Json<UserProfile>, ErrorServer> {
    let id = coin_id(&id)?;
    let profile = server_state
        .portfolio()
        .update_coin_amount(&user.uid, &id, request.amount)?;

    Ok(Json(profile))
}

#[utoipa::path(
    delete,
    path = "/portfolio/coins/{id}",
    params(("id" = String, Path, description = "Coin id")),
    description = "Stop tracking a coin",
    responses(
        (status = 200, description = "Success", body = UserProfile),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn remove_coin(
    State(server_state): State<Arc<ServerState>>,
    Extension(user): Extension<UserPayload>,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, ErrorServer> {
    let id = coin_id(&id)?;
    let profile = server_state.portfolio().remove_coin(&user.uid, &id)?;

    info!("{} removed {} from portfolio", user.uid, id);

    Ok(Json(profile))
}

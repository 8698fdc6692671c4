use std::sync::Arc;

use axum::{
    Extension,
    extract::{Json, State},
};
use folio_core::{
    FolioError,
    helpers::dto::UserPayload,
    portfolio::dto::{CurrencyRequest, ProfileUpdate, UserProfile},
};

use crate::{error::ErrorServer, state::ServerState};

#[utoipa::path(
    get,
    path = "/profile",
    description = "Profile of the logged in user",
    responses(
        (status = 200, description = "Success", body = UserProfile),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Profile not found"),
    )
)]
pub async fn get_profile(
    State(server_state): State<Arc<ServerState>>,
    Extension(user): Extension<UserPayload>,
) -> Result<Json<UserProfile>, ErrorServer> {
    let profile = server_state
        .portfolio()
        .get_user_profile(&user.uid)?
        .ok_or(FolioError::ProfileNotFound(user.uid))?;

    Ok(Json(profile))
}

#[utoipa::path(
    patch,
    path = "/profile",
    request_body = ProfileUpdate,
    description = "Update profile settings",
    responses(
        (status = 200, description = "Success", body = UserProfile),
        (status = 400, description = "Bad Request"),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn update_profile(
    State(server_state): State<Arc<ServerState>>,
    Extension(user): Extension<UserPayload>,
    Json(request): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>, ErrorServer> {
    if request
        .display_name
        .as_deref()
        .is_some_and(|name| name.trim().is_empty())
    {
        return Err(ErrorServer::bad_request("Display name cannot be empty"));
    }

    let profile = server_state
        .portfolio()
        .update_user_profile(&user.uid, request)?;

    Ok(Json(profile))
}

#[utoipa::path(
    put,
    path = "/settings/currency",
    request_body = CurrencyRequest,
    description = "Change the display currency",
    responses(
        (status = 200, description = "Success", body = UserProfile),
        (status = 400, description = "Unsupported currency"),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn update_currency(
    State(server_state): State<Arc<ServerState>>,
    Extension(user): Extension<UserPayload>,
    Json(request): Json<CurrencyRequest>,
) -> Result<Json<UserProfile>, ErrorServer> {
    let currency = request.currency.trim().to_lowercase();

    let supported = server_state.market().get_supported_currencies().await;

    if !supported.iter().any(|c| c.eq_ignore_ascii_case(&currency)) {
        return Err(FolioError::InvalidCurrency(request.currency).into());
    }

    let profile = server_state
        .portfolio()
        .update_preferred_currency(&user.uid, &currency)?;

    log::info!("Preferred currency of {} set to {}", user.uid, currency);

    Ok(Json(profile))
}

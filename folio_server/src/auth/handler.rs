use std::sync::Arc;

use axum::{
    Extension,
    extract::{Json, State},
    http::StatusCode,
};
use folio_core::{
    auth::dto::{AuthResponse, Credentials, LoginRequest, SessionResponse, SignupRequest},
    helpers::dto::UserPayload,
    portfolio::dto::UserProfile,
};
use log::info;

use crate::{error::ErrorServer, state::ServerState};

fn issue_token(server_state: &ServerState, credentials: &Credentials) -> Result<String, ErrorServer> {
    server_state
        .jwt()
        .generate_token(&credentials.uid, &credentials.email)
        .map_err(|e| ErrorServer::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    description = "Create an account and its portfolio profile",
    responses(
        (status = 201, description = "Created", body = AuthResponse),
        (status = 400, description = "Bad Request"),
        (status = 409, description = "Email already in use"),
    )
)]
pub async fn signup(
    State(server_state): State<Arc<ServerState>>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ErrorServer> {
    let display_name = request.display_name.trim();

    if display_name.is_empty()
        || request.email.trim().is_empty()
        || request.password.is_empty()
        || request.confirm_password.is_empty()
    {
        return Err(ErrorServer::bad_request("Please fill in all fields"));
    }

    if request.password != request.confirm_password {
        return Err(ErrorServer::bad_request("Passwords do not match"));
    }

    let credentials = server_state
        .auth()
        .signup(&request.email, &request.password)?;

    let profile = server_state.portfolio().create_user_profile(
        &credentials.uid,
        display_name,
        &credentials.email,
    )?;

    let token = issue_token(&server_state, &credentials)?;

    info!("Account created for {}", credentials.uid);

    Ok((StatusCode::CREATED, Json(AuthResponse { token, profile })))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    description = "Log in with email and password",
    responses(
        (status = 200, description = "Success", body = AuthResponse),
        (status = 401, description = "Invalid email or password"),
    )
)]
pub async fn login(
    State(server_state): State<Arc<ServerState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ErrorServer> {
    let credentials = server_state
        .auth()
        .login(&request.email, &request.password)?;

    let profile = match server_state.portfolio().get_user_profile(&credentials.uid)? {
        Some(profile) => profile,
        None => recreate_profile(&server_state, &credentials)?,
    };

    let token = issue_token(&server_state, &credentials)?;

    Ok(Json(AuthResponse { token, profile }))
}

/// Accounts whose profile document went missing get a fresh one on login.
fn recreate_profile(
    server_state: &ServerState,
    credentials: &Credentials,
) -> Result<UserProfile, ErrorServer> {
    let display_name = credentials
        .email
        .split_once('@')
        .map(|(local, _)| local)
        .unwrap_or(&credentials.email);

    log::warn!("Profile missing for {}, recreating", credentials.uid);

    Ok(server_state.portfolio().create_user_profile(
        &credentials.uid,
        display_name,
        &credentials.email,
    )?)
}

#[utoipa::path(
    get,
    path = "/auth/session",
    description = "Current session",
    responses(
        (status = 200, description = "Success", body = SessionResponse),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn session(Extension(user): Extension<UserPayload>) -> Json<SessionResponse> {
    Json(SessionResponse {
        uid: user.uid,
        email: user.email,
        expires_at: user.exp,
    })
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    description = "Log out the current session",
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn logout(
    State(server_state): State<Arc<ServerState>>,
    Extension(user): Extension<UserPayload>,
) -> Result<StatusCode, ErrorServer> {
    server_state.auth().revoke(&user.jti, user.exp)?;

    if let Err(e) = server_state.auth().purge_expired() {
        log::warn!("Failed to purge expired sessions: {}", e);
    }

    info!("Session closed for {}", user.uid);

    Ok(StatusCode::NO_CONTENT)
}

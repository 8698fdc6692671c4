use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use folio_core::helpers::dto::UserPayload;

use crate::{error::ErrorServer, state::ServerState};

pub async fn auth(
    State(server_state): State<Arc<ServerState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ErrorServer> {
    let headers = req.headers();
    let token = headers.get("Authorization").and_then(|h| h.to_str().ok());

    let Some(token) = token else {
        return Err(ErrorServer::unauthorized());
    };

    let token = token.trim_start_matches("Bearer ").trim();
    let claims = server_state
        .jwt()
        .validate_token(token)
        .map_err(|e| ErrorServer {
            message: e.to_string(),
            status: 401,
        })?;

    if server_state.auth().is_revoked(&claims.jti)? {
        return Err(ErrorServer {
            message: "Session has been logged out".to_string(),
            status: 401,
        });
    }

    req.extensions_mut().insert(UserPayload::from(claims));

    Ok(next.run(req).await)
}

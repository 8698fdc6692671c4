use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_core::FolioError;
use serde::Serialize;
use utoipa::ToResponse;

#[derive(Debug, Serialize, ToResponse)]
pub struct ErrorServer {
    pub message: String,
    pub status: u16,
}

impl ErrorServer {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: status.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }
}

impl std::fmt::Display for ErrorServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ErrorServer {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<FolioError> for ErrorServer {
    fn from(error: FolioError) -> Self {
        let status = match &error {
            FolioError::ProfileNotFound(_) | FolioError::CoinNotFound(_) => StatusCode::NOT_FOUND,
            FolioError::InvalidAmount(_)
            | FolioError::InvalidCurrency(_)
            | FolioError::InvalidEmail
            | FolioError::WeakPassword(_) => StatusCode::BAD_REQUEST,
            FolioError::EmailInUse => StatusCode::CONFLICT,
            FolioError::InvalidCredentials | FolioError::Jwt(_) => StatusCode::UNAUTHORIZED,
            FolioError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            FolioError::Market { .. } | FolioError::Http(_) => StatusCode::BAD_GATEWAY,
            FolioError::Storage(_) | FolioError::Serde(_) | FolioError::Crypto(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            log::error!("Request failed: {}", error);
        }

        ErrorServer::new(status, error.to_string())
    }
}

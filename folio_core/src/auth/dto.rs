use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::portfolio::dto::UserProfile;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Stored login record, keyed by normalized email.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Credentials {
    pub uid: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}

#[derive(Deserialize, Serialize, Debug, Default, ToSchema)]
pub struct SignupRequest {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub profile: UserProfile,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct SessionResponse {
    pub uid: String,
    pub email: String,
    pub expires_at: i64,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Shape check only: `local@domain.tld` with no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !domain.ends_with('.')
        }
        None => false,
    }
}

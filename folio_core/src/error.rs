use thiserror::Error;

pub type Result<T> = std::result::Result<T, FolioError>;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("User profile {0} not found")]
    ProfileNotFound(String),

    #[error("Coin {0} not found")]
    CoinNotFound(String),

    #[error("Amount must be a non-negative number, got {0}")]
    InvalidAmount(f64),

    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("Email is already in use")]
    EmailInUse,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password must be at least {0} characters")]
    WeakPassword(usize),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimited,

    #[error("Market data provider responded with status {status}: {body}")]
    Market { status: u16, body: String },

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Crypto error: {0}")]
    Crypto(String),
}

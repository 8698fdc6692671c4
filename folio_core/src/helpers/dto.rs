use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User id
    pub email: String,
    pub jti: String, // Session id, used for logout
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
}

/// Session attached to authenticated requests.
#[derive(Debug, Clone)]
pub struct UserPayload {
    pub uid: String,
    pub email: String,
    pub jti: String,
    pub exp: i64,
}

impl From<Claims> for UserPayload {
    fn from(claims: Claims) -> Self {
        UserPayload {
            uid: claims.sub,
            email: claims.email,
            jti: claims.jti,
            exp: claims.exp,
        }
    }
}

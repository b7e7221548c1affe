use serde::{Deserialize, Serialize};

/// Claims carried inside the bearer token. Decoded client-side, never
/// re-verified; the server checks the signature on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub username: String,
    pub local_currency: String,
    pub exp: i64, // Expiration time
    #[serde(default)]
    pub iat: i64, // Issued at
}

/// Identity shape consumers work with, remapped from [`Claims`]. Also
/// the exact payload sent once when the portfolio channel opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: u64,
    pub username: String,
    pub local_currency: String,
}

impl From<Claims> for UserIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.user_id,
            username: claims.username,
            local_currency: claims.local_currency,
        }
    }
}

/// A live session: the opaque credential plus what it says about its
/// owner. Derived wholesale from the token, never stored separately.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub claims: Claims,
}

#[derive(Debug, Serialize)]
pub struct UserCredentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// `POST /login` response. An empty token signals failure, with `error`
/// carrying the server's message.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub error: String,
}

/// `POST /register` outcome, reported structurally. Validation failures
/// are expected and are not errors.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: String,
}

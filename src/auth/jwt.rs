use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by tokens from the identity provider.
///
/// The `sub` field is the user's UUID; it doubles as the primary key of the
/// `users` row created on first sight.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: Option<usize>,
    pub iss: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    /// Full name, used as the initial display name.
    pub name: Option<String>,
}

impl Claims {
    /// Extract the user UUID from the `sub` claim.
    pub fn user_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.sub).map_err(|e| format!("Invalid UUID in sub claim: {e}"))
    }

    pub fn display_name(&self) -> Option<String> {
        self.name.clone().filter(|n| !n.trim().is_empty())
    }

    pub fn user_email(&self) -> Option<String> {
        self.email.clone().filter(|e| !e.trim().is_empty())
    }

    pub fn expiry(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp as i64, 0).unwrap_or_default()
    }
}

/// Validate an HS256 token against the shared secret and return its claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Token validation failed: {e}"))
}

/// Wrapper type to store the JWT secret in Actix app data.
#[derive(Clone)]
pub struct JwtSecret(pub String);

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;
use crate::role::Role;

/// Payload embedded in a session token.
///
/// `exp` and `iat` are Unix timestamps (seconds). A token is valid up to and
/// including the `exp` second.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject identity
    pub email: String,

    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a session starting at `issued_at` and lasting `ttl`.
    ///
    /// # Errors
    /// * `Signing` - `ttl` is not positive, or the expiry falls outside the
    ///   representable time range
    pub fn new(
        email: impl Into<String>,
        role: Role,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        if ttl <= Duration::zero() {
            return Err(TokenError::Signing(format!(
                "token lifetime must be positive, got {}",
                ttl
            )));
        }

        let expiration = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            TokenError::Signing(format!("token lifetime {} overflows the expiry", ttl))
        })?;

        Ok(Self {
            email: email.into(),
            role,
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::JwtHandler;
use crate::jwt::SessionClaims;
use crate::jwt::SigningKey;
use crate::jwt::TokenError;
use crate::role::Role;

/// Session lifetime used when configuration does not override it.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 12;

/// Issues and validates session tokens.
///
/// Holds only immutable state (signing key, lifetime, clock), so a single
/// instance is shared across request handlers behind an `Arc`. It never logs
/// and never retries; every outcome is reported through the returned `Result`.
pub struct AuthService {
    jwt_handler: JwtHandler,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    /// Create a new auth service reading the wall clock.
    ///
    /// # Arguments
    /// * `key` - Signing key loaded at startup
    /// * `ttl` - Lifetime of every issued token
    pub fn new(key: SigningKey, ttl: Duration) -> Self {
        Self::with_clock(key, ttl, Arc::new(SystemClock))
    }

    /// Create a new auth service with an explicit time source.
    pub fn with_clock(key: SigningKey, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            jwt_handler: JwtHandler::new(&key),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a signed session token for an authenticated identity.
    ///
    /// # Arguments
    /// * `email` - Subject identity
    /// * `role` - Role embedded verbatim in the claims
    ///
    /// # Returns
    /// Compact `header.payload.signature` token valid for the configured lifetime
    ///
    /// # Errors
    /// * `Signing` - Lifetime is unusable, or claims serialization or signing failed
    pub fn issue_token(&self, email: &str, role: Role) -> Result<String, TokenError> {
        let claims = SessionClaims::new(email, role, self.clock.now(), self.ttl)?;

        self.jwt_handler.encode(&claims)
    }

    /// Verify a session token and return its claims.
    ///
    /// # Arguments
    /// * `token` - Bare token, without any `Bearer` scheme prefix
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed
    /// * `SignatureInvalid` - Token was not signed with this key
    /// * `Expired` - Current time is past the `exp` claim
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let claims: SessionClaims = self.jwt_handler.decode(token)?;

        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

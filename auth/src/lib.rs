//! Session token library
//!
//! Provides the authentication core shared by the HTTP layer:
//! - Signing key lifecycle (loaded once, read-only afterwards)
//! - Session token issuance and validation (HS256 JWT)
//! - Closed role set used for capability checks
//!
//! Services keep their own HTTP concerns and only depend on [`AuthService`]
//! and the types it exchanges.
//!
//! # Examples
//!
//! ## Issue and validate a session token
//! ```
//! use auth::{AuthService, Role, SigningKey};
//! use chrono::Duration;
//!
//! let key = SigningKey::from_secret("secret_key_at_least_32_bytes_long!").unwrap();
//! let service = AuthService::new(key, Duration::hours(12));
//!
//! let token = service.issue_token("a@example.com", Role::Admin).unwrap();
//! let claims = service.validate_token(&token).unwrap();
//! assert_eq!(claims.email, "a@example.com");
//! assert!(claims.role.is_admin());
//! ```
//!
//! ## Distinguish failure kinds
//! ```
//! use auth::{AuthService, SigningKey, TokenError};
//! use chrono::Duration;
//!
//! let key = SigningKey::from_secret("secret_key_at_least_32_bytes_long!").unwrap();
//! let service = AuthService::new(key, Duration::hours(12));
//!
//! let result = service.validate_token("not-a-token");
//! assert!(matches!(result, Err(TokenError::Malformed(_))));
//! ```

pub mod clock;
pub mod jwt;
pub mod role;
pub mod service;

// Re-export commonly used items
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use jwt::SigningKey;
pub use jwt::SigningKeyError;
pub use jwt::TokenError;
pub use role::Role;
pub use role::RoleError;
pub use service::AuthService;
pub use service::DEFAULT_TOKEN_TTL_HOURS;

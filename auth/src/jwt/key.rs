use std::fmt;

use super::errors::SigningKeyError;

/// Shared HMAC secret used to sign and verify session tokens.
///
/// Built once at startup from configuration and handed to the
/// [`AuthService`](crate::AuthService); it is never mutated afterwards.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// HS256 needs at least 256 bits of key material.
    pub const MIN_LENGTH: usize = 32;

    /// Create a signing key from raw secret material.
    ///
    /// # Arguments
    /// * `secret` - Secret bytes, usually read from the environment
    ///
    /// # Returns
    /// SigningKey holding a copy of the secret
    ///
    /// # Errors
    /// * `TooShort` - Secret is shorter than 32 bytes
    pub fn from_secret(secret: impl AsRef<[u8]>) -> Result<Self, SigningKeyError> {
        let secret = secret.as_ref();
        if secret.len() < Self::MIN_LENGTH {
            return Err(SigningKeyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: secret.len(),
            });
        }

        Ok(Self(secret.to_vec()))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&"<redacted>").finish()
    }
}

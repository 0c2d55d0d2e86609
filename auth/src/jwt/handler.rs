use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::TokenError;
use super::key::SigningKey;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type. Uses HS256 (HMAC with SHA-256) only; tokens
/// announcing any other algorithm are rejected as not signed by this key.
///
/// Expiry is *not* checked here. The `exp` claim must be present, but
/// comparing it against the current time is left to the caller, which owns
/// the clock.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler from a signing key.
    ///
    /// # Arguments
    /// * `key` - Shared HMAC secret
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    pub fn new(key: &SigningKey) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a JWT token.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode (must implement Serialize)
    ///
    /// # Returns
    /// JWT token string
    ///
    /// # Errors
    /// * `Signing` - Claims serialization or signing failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key).map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Decode and verify a JWT token.
    ///
    /// # Arguments
    /// * `token` - JWT token string to decode
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `Malformed` - Token is not three base64url segments, or header/claims do not decode
    /// * `SignatureInvalid` - Signature does not match or algorithm is not HS256
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        check_compact_form(token)?;

        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(classify)
    }
}

/// Reject anything that is not `header.payload.signature` in base64url.
fn check_compact_form(token: &str) -> Result<(), TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Malformed(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    }

    for (name, segment) in ["header", "payload", "signature"].iter().zip(&segments) {
        if segment.is_empty() {
            return Err(TokenError::Malformed(format!("empty {} segment", name)));
        }
        if !segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(TokenError::Malformed(format!(
                "{} segment is not base64url",
                name
            )));
        }
    }

    Ok(())
}

fn classify(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::SignatureInvalid,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        role: String,
        exp: i64,
    }

    fn handler(secret: &str) -> JwtHandler {
        JwtHandler::new(&SigningKey::from_secret(secret).unwrap())
    }

    fn claims() -> TestClaims {
        TestClaims {
            sub: "user123".to_string(),
            role: "admin".to_string(),
            exp: 1_000,
        }
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = handler("my_secret_key_at_least_32_bytes_long!");

        let token = handler.encode(&claims()).expect("Failed to encode token");
        assert_eq!(token.split('.').count(), 3);

        // exp is in the past, but the handler leaves expiry to its caller
        let decoded: TestClaims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims());
    }

    #[test]
    fn test_decode_malformed_inputs() {
        let handler = handler("my_secret_key_at_least_32_bytes_long!");

        for token in [
            "",
            "invalid",
            "only.two",
            "a.b.c.d",
            "a..c",
            "!!!.###.$$$",
            "abc.def.ghi",
            "e30.e30.c2ln",
        ] {
            let result = handler.decode::<TestClaims>(token);
            assert!(
                matches!(result, Err(TokenError::Malformed(_))),
                "{token:?} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = handler("secret1_at_least_32_bytes_long_key!");
        let handler2 = handler("secret2_at_least_32_bytes_long_key!");

        let token = handler1.encode(&claims()).expect("Failed to encode token");

        let result = handler2.decode::<TestClaims>(&token);
        assert_eq!(result.unwrap_err(), TokenError::SignatureInvalid);
    }

    #[test]
    fn test_decode_rejects_other_algorithm() {
        let secret = "my_secret_key_at_least_32_bytes_long!";
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims(),
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        let result = handler(secret).decode::<TestClaims>(&token);
        assert_eq!(result.unwrap_err(), TokenError::SignatureInvalid);
    }

    #[test]
    fn test_decode_requires_exp() {
        let handler = handler("my_secret_key_at_least_32_bytes_long!");
        let token = handler
            .encode(&serde_json::json!({ "sub": "user123", "role": "admin" }))
            .unwrap();

        let result = handler.decode::<serde_json::Value>(&token);
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_decode_claims_of_wrong_shape() {
        let handler = handler("my_secret_key_at_least_32_bytes_long!");
        let token = handler
            .encode(&serde_json::json!({ "sub": 42, "exp": 1_000 }))
            .unwrap();

        let result = handler.decode::<TestClaims>(&token);
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_encode_failure_is_signing_error() {
        struct Unserializable;

        impl Serialize for Unserializable {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("cannot encode"))
            }
        }

        let handler = handler("my_secret_key_at_least_32_bytes_long!");
        let result = handler.encode(&Unserializable);
        assert!(matches!(result, Err(TokenError::Signing(_))));
    }
}

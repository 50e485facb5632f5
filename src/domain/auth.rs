use crate::error::{AppError, Result};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A signed access token. The subject is the authenticated username, which
/// the access-control policy treats as ground truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jwt(pub String);

impl Jwt {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

impl Claims {
    #[must_use]
    pub fn new(username: &str, ttl_secs: u64) -> Self {
        let expiration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(std::time::Duration::from_secs(0))
            .as_secs() as usize
            + ttl_secs as usize;

        Self { sub: username.to_string(), exp: expiration }
    }

    /// # Errors
    /// Returns `AppError::Internal` if signing fails.
    pub fn encode(&self, secret: &str) -> Result<Jwt> {
        encode(&Header::default(), self, &EncodingKey::from_secret(secret.as_bytes()))
            .map(Jwt)
            .map_err(|_| AppError::Internal)
    }

    /// # Errors
    /// Returns `AppError::Unauthenticated` on any signature or expiry failure.
    pub fn decode(token: &str, secret: &str) -> Result<Self> {
        let token_data =
            decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
                .map_err(|_| AppError::Unauthenticated)?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_roundtrip() {
        let secret = "test_secret";
        let claims = Claims::new("alice", 3600);

        let token = claims.encode(secret).unwrap();
        let decoded = Claims::decode(token.as_str(), secret).unwrap();

        assert_eq!(claims, decoded);
    }

    #[test]
    fn test_claims_invalid_secret() {
        let claims = Claims::new("alice", 3600);
        let token = claims.encode("secret1").unwrap();

        let result = Claims::decode(token.as_str(), "secret2");
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[test]
    fn test_claims_expired_token() {
        let claims = Claims { sub: "alice".to_string(), exp: 1 };
        let token = claims.encode("secret").unwrap();

        let result = Claims::decode(token.as_str(), "secret");
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }
}

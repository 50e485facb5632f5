use crate::config::AuthConfig;
use crate::domain::auth::{Claims, Jwt};
use crate::error::Result;

/// Resolves opaque bearer tokens into authenticated usernames. The resolved
/// value is ground truth for every access-control decision downstream.
#[derive(Clone, Debug)]
pub struct IdentityService {
    config: AuthConfig,
}

impl IdentityService {
    #[must_use]
    pub const fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Issues an access token for `username`. Token issuance belongs to the
    /// external identity subsystem; this is its signing path, also used by
    /// the test harness.
    ///
    /// # Errors
    /// Returns `AppError::Internal` if signing fails.
    pub fn issue_token(&self, username: &str) -> Result<Jwt> {
        Claims::new(username, self.config.access_token_ttl_secs).encode(&self.config.jwt_secret)
    }

    /// Verifies a bearer token and returns the caller's username.
    ///
    /// # Errors
    /// Returns `AppError::Unauthenticated` on any signature or expiry failure.
    pub fn resolve_token(&self, token: &str) -> Result<String> {
        let claims = Claims::decode(token, &self.config.jwt_secret)?;
        Ok(claims.sub)
    }
}

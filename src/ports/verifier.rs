use crate::domain::video::AccessClaims;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Validate a bearer token and return its decoded claims.
    ///
    /// Fails with `AppError::Unauthorized` when the token is missing a
    /// required part, expired, or fails signature/issuer/audience checks.
    /// Read-only; verification never mutates state.
    async fn verify(&self, token: &str) -> Result<AccessClaims, AppError>;
}

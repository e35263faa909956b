use crate::domain::video::SignedUploadGrant;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UploadUrlIssuer: Send + Sync {
    /// Choose a storage path for a new object. The key is never derived
    /// from client input.
    fn new_object_key(&self) -> String;

    /// Mint a write-only, time-limited URL scoped to exactly `key`.
    /// Expiry is enforced by the storage service; there is no retry here.
    async fn issue(&self, key: &str, content_type: &str)
        -> Result<SignedUploadGrant, AppError>;
}

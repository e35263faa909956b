use crate::domain::video::SignedUploadGrant;
use crate::error::AppError;
use crate::ports::issuer::UploadUrlIssuer;
use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use std::time::Duration;

/// Validity window for signed upload URLs. Writes after this window fail at
/// the storage layer.
pub const SIGNED_URL_EXPIRY: Duration = Duration::from_secs(300);

const UPLOAD_PREFIX: &str = "uploads/";

/// Storage path for a new upload: random unique suffix, fixed extension.
/// Never taken from client input, so two requests can never collide and a
/// caller cannot steer the path.
pub fn generate_object_key() -> String {
    format!("{}{}.mp4", UPLOAD_PREFIX, uuid::Uuid::new_v4())
}

/// S3UrlIssuer implements UploadUrlIssuer with presigned PutObject URLs.
#[derive(Clone)]
pub struct S3UrlIssuer {
    client: Client,
    bucket: String,
    expiry: Duration,
}

impl S3UrlIssuer {
    pub fn new(client: Client, bucket: String) -> Self {
        Self {
            client,
            bucket,
            expiry: SIGNED_URL_EXPIRY,
        }
    }
}

#[async_trait]
impl UploadUrlIssuer for S3UrlIssuer {
    fn new_object_key(&self) -> String {
        generate_object_key()
    }

    async fn issue(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<SignedUploadGrant, AppError> {
        let presigning = PresigningConfig::expires_in(self.expiry)
            .map_err(|e| AppError::IssuerUnavailable(e.to_string()))?;

        // The uploader must send the exact content type the URL was signed
        // for, or S3 rejects the write with a signature mismatch.
        let presigned_request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| AppError::IssuerUnavailable(e.to_string()))?;

        Ok(SignedUploadGrant {
            url: presigned_request.uri().to_string(),
            object_key: key.to_string(),
        })
    }
}

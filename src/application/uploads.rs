use crate::domain::video::{
    partition_key, AccessClaims, SignedUploadGrant, UploadRequest, VideoRecord, VideoStatus,
    SORT_KEY_META,
};
use crate::error::AppError;
use crate::ports::issuer::UploadUrlIssuer;
use crate::ports::repository::VideoRepository;
use crate::ports::verifier::TokenVerifier;
use tracing::{info, warn};
use uuid::Uuid;

/// Upload orchestration over the three port seams.
///
/// One upload request moves through a strict sequence: verify the bearer
/// token, validate the body, persist a `PENDING` record, then mint the
/// signed URL. Each step depends on the previous one succeeding, so nothing
/// is parallelized.
pub struct UploadService<V, I, R> {
    verifier: V,
    issuer: I,
    repo: R,
}

impl<V, I, R> UploadService<V, I, R>
where
    V: TokenVerifier,
    I: UploadUrlIssuer,
    R: VideoRepository,
{
    pub fn new(verifier: V, issuer: I, repo: R) -> Self {
        Self {
            verifier,
            issuer,
            repo,
        }
    }

    /// Gate for every protected endpoint. Must run before any other work.
    pub async fn authenticate(&self, token: &str) -> Result<AccessClaims, AppError> {
        self.verifier.verify(token).await
    }

    /// Create a `PENDING` record and mint a signed upload URL for it.
    ///
    /// The record exists before the URL does. If minting fails after the
    /// write, the record stays `PENDING`; cleaning those up is an external
    /// reconciliation job's responsibility, not ours.
    pub async fn create_upload(
        &self,
        claims: &AccessClaims,
        request: UploadRequest,
    ) -> Result<SignedUploadGrant, AppError> {
        validate_upload_request(&request)?;

        let video_id = Uuid::new_v4().to_string();
        let object_key = self.issuer.new_object_key();

        let record = VideoRecord {
            video_id: video_id.clone(),
            // Owner comes from the verified token, never the request body.
            owner_id: claims.sub.clone(),
            file_name: request.file_name,
            title: request.title,
            description: request.description,
            object_key: object_key.clone(),
            status: VideoStatus::Pending,
            analysis: None,
        };

        self.repo.put_video(&record).await?;

        let grant = self
            .issuer
            .issue(&object_key, &request.content_type)
            .await
            .map_err(|e| {
                warn!(
                    video_id = %video_id,
                    "signed URL minting failed after record write; record stays PENDING"
                );
                e
            })?;

        info!(video_id = %video_id, object_key = %object_key, "upload grant issued");
        Ok(grant)
    }

    /// All records owned by the verified caller.
    pub async fn list_videos(&self, claims: &AccessClaims) -> Result<Vec<VideoRecord>, AppError> {
        let mut videos = self.repo.videos_by_owner(&claims.sub).await?;
        // The index narrows the scan; the verified identity is the gate.
        videos.retain(|v| v.owner_id == claims.sub);
        Ok(videos)
    }

    /// A single record, only if the verified caller owns it. Foreign
    /// records read as not-found so their existence is not confirmed.
    pub async fn video_detail(
        &self,
        claims: &AccessClaims,
        video_id: &str,
    ) -> Result<VideoRecord, AppError> {
        let record = self
            .repo
            .get_video(&partition_key(video_id), Some(SORT_KEY_META.to_string()))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("video {} not found", video_id)))?;

        if record.owner_id != claims.sub {
            return Err(AppError::NotFound(format!("video {} not found", video_id)));
        }
        Ok(record)
    }

    /// The externally produced analysis for an owned record.
    pub async fn video_analysis(
        &self,
        claims: &AccessClaims,
        video_id: &str,
    ) -> Result<serde_json::Value, AppError> {
        let record = self.video_detail(claims, video_id).await?;
        record.analysis.ok_or_else(|| {
            AppError::NotFound(format!("no analysis available for video {}", video_id))
        })
    }
}

fn validate_upload_request(request: &UploadRequest) -> Result<(), AppError> {
    if request.file_name.trim().is_empty() {
        return Err(AppError::Validation("fileName is required".to_string()));
    }
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }
    if !request.content_type.starts_with("video/") {
        return Err(AppError::Validation(
            "only video files can be uploaded".to_string(),
        ));
    }
    Ok(())
}

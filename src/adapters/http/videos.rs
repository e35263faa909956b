use crate::adapters::http::auth::bearer_token;
use crate::application::uploads::UploadService;
use crate::domain::video::{UploadRequest, VideoRecordView};
use crate::error::AppError;
use crate::ports::issuer::UploadUrlIssuer;
use crate::ports::repository::VideoRepository;
use crate::ports::verifier::TokenVerifier;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// GET / - token-gated identity echo.
pub async fn health<V, I, R>(
    State(service): State<Arc<UploadService<V, I, R>>>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError>
where
    V: TokenVerifier,
    I: UploadUrlIssuer,
    R: VideoRepository,
{
    let claims = service.authenticate(bearer_token(&headers)?).await?;
    Ok(Json(json!({ "data": claims.sub })))
}

/// POST /uploadVideo - create a PENDING record and return a signed URL.
pub async fn create_upload<V, I, R>(
    State(service): State<Arc<UploadService<V, I, R>>>,
    headers: HeaderMap,
    Json(request): Json<UploadRequest>,
) -> Result<Json<Value>, AppError>
where
    V: TokenVerifier,
    I: UploadUrlIssuer,
    R: VideoRepository,
{
    let claims = service.authenticate(bearer_token(&headers)?).await?;
    let grant = service.create_upload(&claims, request).await?;
    info!(owner = %claims.sub, object_key = %grant.object_key, "[POST /uploadVideo] grant issued");
    Ok(Json(json!({ "data": grant.url })))
}

/// GET /userVideos - all records owned by the caller.
pub async fn list_videos<V, I, R>(
    State(service): State<Arc<UploadService<V, I, R>>>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError>
where
    V: TokenVerifier,
    I: UploadUrlIssuer,
    R: VideoRepository,
{
    let claims = service.authenticate(bearer_token(&headers)?).await?;
    let videos: Vec<VideoRecordView> = service
        .list_videos(&claims)
        .await?
        .into_iter()
        .map(VideoRecordView::from)
        .collect();
    Ok(Json(json!({ "videos": videos })))
}

/// GET /videos/:videoId - one owned record.
pub async fn video_detail<V, I, R>(
    State(service): State<Arc<UploadService<V, I, R>>>,
    headers: HeaderMap,
    Path(video_id): Path<String>,
) -> Result<Json<Value>, AppError>
where
    V: TokenVerifier,
    I: UploadUrlIssuer,
    R: VideoRepository,
{
    let claims = service.authenticate(bearer_token(&headers)?).await?;
    let record = service.video_detail(&claims, &video_id).await?;
    Ok(Json(json!({ "video": VideoRecordView::from(record) })))
}

/// GET /videos/:videoId/analysis - externally produced analysis blob.
pub async fn video_analysis<V, I, R>(
    State(service): State<Arc<UploadService<V, I, R>>>,
    headers: HeaderMap,
    Path(video_id): Path<String>,
) -> Result<Json<Value>, AppError>
where
    V: TokenVerifier,
    I: UploadUrlIssuer,
    R: VideoRepository,
{
    let claims = service.authenticate(bearer_token(&headers)?).await?;
    let analysis = service.video_analysis(&claims, &video_id).await?;
    Ok(Json(json!({ "analysis": analysis })))
}

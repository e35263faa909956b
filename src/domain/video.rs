use serde::{Deserialize, Serialize};

/// Sort key shared by all video metadata items.
pub const SORT_KEY_META: &str = "META";

/// Partition key for a video's metadata item.
pub fn partition_key(video_id: &str) -> String {
    format!("VIDEO#{}", video_id)
}

/// Lifecycle of an uploaded video. `Pending` is set when the record is
/// created; the transition to `Ready` or `Failed` happens through an
/// external post-processing collaborator, never inside this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoStatus {
    Pending,
    Ready,
    Failed,
}

impl VideoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoStatus::Pending => "PENDING",
            VideoStatus::Ready => "READY",
            VideoStatus::Failed => "FAILED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(VideoStatus::Pending),
            "READY" => Some(VideoStatus::Ready),
            "FAILED" => Some(VideoStatus::Failed),
            _ => None,
        }
    }
}

/// A video metadata record. `owner_id` is always derived from the verified
/// token of the request that created the record, never from the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub video_id: String,
    #[serde(rename = "userId")]
    pub owner_id: String,
    pub file_name: String,
    pub title: String,
    pub description: String,
    /// Storage path chosen by the signed-URL issuer.
    pub object_key: String,
    pub status: VideoStatus,
    /// Opaque analysis blob written by an external collaborator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<serde_json::Value>,
}

/// Record shape returned by the list and detail endpoints. The analysis
/// blob has its own endpoint and is not repeated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecordView {
    pub video_id: String,
    #[serde(rename = "userId")]
    pub owner_id: String,
    pub file_name: String,
    pub title: String,
    pub description: String,
    pub object_key: String,
    pub status: VideoStatus,
}

impl From<VideoRecord> for VideoRecordView {
    fn from(record: VideoRecord) -> Self {
        Self {
            video_id: record.video_id,
            owner_id: record.owner_id,
            file_name: record.file_name,
            title: record.title,
            description: record.description,
            object_key: record.object_key,
            status: record.status,
        }
    }
}

/// Body of `POST /uploadVideo`. The owner is intentionally absent: it comes
/// from the verified token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Time-limited authorization to write exactly one storage object.
/// Ephemeral; expiry is enforced by the storage service.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedUploadGrant {
    pub url: String,
    pub object_key: String,
}

/// Claims carried by a verified Cognito access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub iss: String,
    pub client_id: String,
    pub token_use: String,
    pub exp: u64,
    #[serde(default)]
    pub username: Option<String>,
}

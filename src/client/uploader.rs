//! Upload controller: request a signed URL, then stream the file straight
//! to storage.

use crate::domain::session::Session;
use crate::domain::video::UploadRequest;
use crate::error::AppError;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::StatusCode;
use reqwest::Body;
use serde::Deserialize;
use std::path::PathBuf;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

/// One upload's worth of form state.
#[derive(Debug, Clone)]
pub struct UploadForm {
    pub file_path: PathBuf,
    pub file_name: String,
    /// Declared content type; must be in the video family.
    pub content_type: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct CreateUploadResponse {
    data: Option<String>,
    error: Option<String>,
}

/// Drives one upload at a time against the orchestrator API.
pub struct UploadController {
    http: reqwest::Client,
    api_base: String,
    in_flight: bool,
}

impl UploadController {
    pub fn new(api_base: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base,
            in_flight: false,
        }
    }

    /// Submit one upload. Local validation failures reject the form before
    /// any network call; network failures leave the form intact for retry.
    pub async fn submit(&mut self, session: &Session, form: &UploadForm) -> Result<(), AppError> {
        if self.in_flight {
            return Err(AppError::Validation(
                "an upload is already in progress".to_string(),
            ));
        }
        validate_form(form)?;
        if !form.file_path.exists() {
            return Err(AppError::Validation(format!(
                "file not found: {}",
                form.file_path.display()
            )));
        }

        self.in_flight = true;
        let result = self.run(session, form).await;
        self.in_flight = false;
        result
    }

    async fn run(&self, session: &Session, form: &UploadForm) -> Result<(), AppError> {
        let url = self.request_signed_url(session, form).await?;
        debug!("received signed upload URL");
        self.transfer(&url, form).await?;
        info!(file = %form.file_name, "upload complete");
        Ok(())
    }

    async fn request_signed_url(
        &self,
        session: &Session,
        form: &UploadForm,
    ) -> Result<String, AppError> {
        let request = UploadRequest {
            file_name: form.file_name.clone(),
            content_type: form.content_type.clone(),
            title: form.title.clone(),
            description: form.description.clone(),
        };

        let response = self
            .http
            .post(format!("{}/uploadVideo", self.api_base))
            .bearer_auth(&session.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::TransferFailed(format!("create request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized("session rejected by the server".to_string()));
        }

        let parsed: CreateUploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::TransferFailed(format!("unreadable create response: {}", e)))?;

        if !status.is_success() {
            let reason = parsed
                .error
                .unwrap_or_else(|| format!("server responded {}", status));
            return Err(AppError::TransferFailed(reason));
        }

        parsed
            .data
            .ok_or_else(|| AppError::TransferFailed("response carried no signed URL".to_string()))
    }

    /// PUT the raw file bytes to the signed URL, streaming from disk. The
    /// content type must match what the URL was signed for.
    async fn transfer(&self, signed_url: &str, form: &UploadForm) -> Result<(), AppError> {
        let file = File::open(&form.file_path)
            .await
            .map_err(|e| AppError::TransferFailed(format!("cannot open file: {}", e)))?;
        let file_size = file
            .metadata()
            .await
            .map_err(|e| AppError::TransferFailed(format!("cannot stat file: {}", e)))?
            .len();

        let stream = ReaderStream::new(file);

        self.http
            .put(signed_url)
            .header(CONTENT_TYPE, &form.content_type)
            .header(CONTENT_LENGTH, file_size)
            .body(Body::wrap_stream(stream))
            .send()
            .await
            .map_err(|e| AppError::TransferFailed(format!("storage transfer failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::TransferFailed(format!("storage rejected the upload: {}", e)))?;

        Ok(())
    }
}

fn validate_form(form: &UploadForm) -> Result<(), AppError> {
    if !form.content_type.starts_with("video/") {
        return Err(AppError::Validation(
            "please select a valid video file".to_string(),
        ));
    }
    if form.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }
    Ok(())
}

/// Declared content type for a file, from its extension. Unknown extensions
/// fall outside the video family and fail local validation.
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match extension.to_ascii_lowercase().as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}

//! Upload Client Binary
//!
//! Resolves the stored session, asks the API for a signed upload URL, and
//! streams the file directly to storage.
//!
//! Usage: uploader <file> <title> [description]
//!
//! Environment Variables:
//! - API_BASE_URL: orchestrator API base (default http://127.0.0.1:3001)
//! - ACCESS_TOKEN: bearer token from the identity provider's tooling

use std::path::PathBuf;

use dotenv::dotenv;
use vidvault::client::session::{resolve_session, EnvSessionProvider};
use vidvault::client::uploader::{content_type_for, UploadController, UploadForm};
use vidvault::config::ClientConfig;
use vidvault::domain::session::SessionState;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let (file, title) = match (args.next(), args.next()) {
        (Some(file), Some(title)) => (PathBuf::from(file), title),
        _ => {
            eprintln!("Usage: uploader <file> <title> [description]");
            std::process::exit(2);
        }
    };
    let description = args.next().unwrap_or_default();

    // Resolve the session before making any auth-dependent decision.
    let state = resolve_session(&EnvSessionProvider).await;
    let session = match &state {
        SessionState::Authenticated(session) => session,
        SessionState::Anonymous => {
            eprintln!("Not signed in. Set ACCESS_TOKEN and retry.");
            std::process::exit(1);
        }
        SessionState::Idle | SessionState::Loading => {
            // resolve_session always settles; reaching here is a bug.
            eprintln!("Session resolution did not settle.");
            std::process::exit(1);
        }
    };

    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("video.mp4")
        .to_string();
    let content_type = content_type_for(&file_name).to_string();

    let form = UploadForm {
        file_path: file,
        file_name,
        content_type,
        title,
        description,
    };

    let config = ClientConfig::from_env();
    let mut controller = UploadController::new(config.api_base);

    match controller.submit(session, &form).await {
        Ok(()) => println!("Upload complete: {}", form.file_name),
        Err(e) => {
            // The form values above stay valid; rerun the command to retry.
            eprintln!("Upload failed: {}", e);
            std::process::exit(1);
        }
    }
}

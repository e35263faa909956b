//! Configuration for the API server and the upload client.

use std::env;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    /// AWS region hosting the user pool
    pub region: String,
    /// Cognito user pool id (e.g. "us-east-1_AbCdEfGhI")
    pub user_pool_id: String,
    /// Cognito app client id expected in access tokens
    pub client_id: String,
    /// S3 bucket receiving direct uploads
    pub upload_bucket: String,
    /// DynamoDB table holding video records
    pub video_table: String,
    /// Global secondary index keyed by owner identity
    pub user_id_index: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Panics if required variables are not set.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            addr: env::var("ADDR").unwrap_or_else(|_| String::from("127.0.0.1")),
            port: env::var("PORT").unwrap_or_else(|_| String::from("3001")),
            region: env::var("AWS_REGION").expect("AWS_REGION env var required"),
            user_pool_id: env::var("COGNITO_USER_POOL_ID")
                .expect("COGNITO_USER_POOL_ID env var required"),
            client_id: env::var("COGNITO_CLIENT_ID").expect("COGNITO_CLIENT_ID env var required"),
            upload_bucket: env::var("UPLOAD_BUCKET_NAME")
                .expect("UPLOAD_BUCKET_NAME env var required"),
            video_table: env::var("VIDEO_TABLE").expect("VIDEO_TABLE env var required"),
            user_id_index: env::var("DDB_USER_ID_INDEX")
                .unwrap_or_else(|_| String::from("userId-index")),
        }
    }
}

/// Configuration for the upload client binary.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the API server
    pub api_base: String,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            api_base: env::var("API_BASE_URL")
                .unwrap_or_else(|_| String::from("http://127.0.0.1:3001")),
        }
    }
}

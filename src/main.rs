//! API Server Binary
//!
//! Verifies bearer tokens against a Cognito user pool, persists video
//! metadata in DynamoDB, and mints presigned S3 upload URLs.
//!
//! Environment Variables:
//! - ADDR / PORT: bind address
//! - AWS_REGION: AWS region
//! - COGNITO_USER_POOL_ID / COGNITO_CLIENT_ID: identity provider
//! - UPLOAD_BUCKET_NAME: S3 bucket for direct uploads
//! - VIDEO_TABLE / DDB_USER_ID_INDEX: DynamoDB table and owner index

use std::sync::Arc;

use dotenv::dotenv;
use tracing::info;
use vidvault::adapters::aws::cognito::CognitoVerifier;
use vidvault::adapters::aws::dynamodb::DynamoAdapter;
use vidvault::adapters::aws::s3::S3UrlIssuer;
use vidvault::adapters::http;
use vidvault::application::uploads::UploadService;
use vidvault::config::AppConfig;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();

    // Load AWS config
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

    // Create AWS clients
    let s3_client = aws_sdk_s3::Client::new(&aws_config);
    let dynamo_client = aws_sdk_dynamodb::Client::new(&aws_config);

    // Create adapters
    let verifier = CognitoVerifier::new(
        &config.region,
        &config.user_pool_id,
        config.client_id.clone(),
    );
    let issuer = S3UrlIssuer::new(s3_client, config.upload_bucket.clone());
    let repo = DynamoAdapter::new(
        dynamo_client,
        config.video_table.clone(),
        config.user_id_index.clone(),
    );

    let service = Arc::new(UploadService::new(verifier, issuer, repo));
    let app = http::router(service);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.addr, config.port))
        .await
        .expect("Failed to bind TCP listener");
    info!("Listening at {}:{}", config.addr, config.port);
    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}

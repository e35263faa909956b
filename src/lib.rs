//! Vidvault - Video Hosting Upload Service
//!
//! Hexagonal Architecture:
//! - domain/: Pure business types (video records, upload grants, session state)
//! - ports/: Trait definitions (token verifier, signed-URL issuer, repository)
//! - adapters/: Concrete implementations (AWS Cognito/S3/DynamoDB, HTTP API)
//! - application/: Generic services wired over ports
//! - client/: Upload controller and session resolution for the CLI client
//! - config: Environment configuration

pub mod adapters;
pub mod application;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for convenience
pub use config::{AppConfig, ClientConfig};
pub use error::AppError;

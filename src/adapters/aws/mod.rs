pub mod cognito;
pub mod dynamodb;
pub mod s3;

//! HTTP inbound adapter - the upload orchestrator's outer surface.

pub mod auth;
pub mod videos;

use crate::application::uploads::UploadService;
use crate::ports::issuer::UploadUrlIssuer;
use crate::ports::repository::VideoRepository;
use crate::ports::verifier::TokenVerifier;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn router<V, I, R>(service: Arc<UploadService<V, I, R>>) -> Router
where
    V: TokenVerifier + 'static,
    I: UploadUrlIssuer + 'static,
    R: VideoRepository + 'static,
{
    Router::new()
        .route("/", get(videos::health::<V, I, R>))
        .route("/uploadVideo", post(videos::create_upload::<V, I, R>))
        .route("/userVideos", get(videos::list_videos::<V, I, R>))
        .route("/videos/:video_id", get(videos::video_detail::<V, I, R>))
        .route(
            "/videos/:video_id/analysis",
            get(videos::video_analysis::<V, I, R>),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::video::{AccessClaims, SignedUploadGrant, VideoRecord, VideoStatus};
    use crate::error::AppError;
    use crate::ports::issuer::MockUploadUrlIssuer;
    use crate::ports::repository::MockVideoRepository;
    use crate::ports::verifier::MockTokenVerifier;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use mockall::predicate::eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn claims_for(sub: &str) -> AccessClaims {
        AccessClaims {
            sub: sub.to_string(),
            iss: "https://cognito-idp.us-east-1.amazonaws.com/us-east-1_TestPool".to_string(),
            client_id: "test-client".to_string(),
            token_use: "access".to_string(),
            exp: 4102444800,
            username: Some(sub.to_string()),
        }
    }

    fn record_for(owner: &str, video_id: &str) -> VideoRecord {
        VideoRecord {
            video_id: video_id.to_string(),
            owner_id: owner.to_string(),
            file_name: "a.mp4".to_string(),
            title: "T".to_string(),
            description: "D".to_string(),
            object_key: "uploads/k.mp4".to_string(),
            status: VideoStatus::Pending,
            analysis: None,
        }
    }

    fn app(
        verifier: MockTokenVerifier,
        issuer: MockUploadUrlIssuer,
        repo: MockVideoRepository,
    ) -> Router {
        router(Arc::new(UploadService::new(verifier, issuer, repo)))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn upload_body() -> String {
        json!({
            "fileName": "a.mp4",
            "type": "video/mp4",
            "title": "T",
            "description": "D"
        })
        .to_string()
    }

    #[tokio::test]
    async fn requests_without_a_token_get_401_and_touch_nothing() {
        let verifier = MockTokenVerifier::new();
        let mut issuer = MockUploadUrlIssuer::new();
        let mut repo = MockVideoRepository::new();
        issuer.expect_new_object_key().times(0);
        repo.expect_put_video().times(0);

        let response = app(verifier, issuer, repo)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/uploadVideo")
                    .header("content-type", "application/json")
                    .body(Body::from(upload_body()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn a_rejected_token_gets_401_and_no_metadata_write() {
        let mut verifier = MockTokenVerifier::new();
        let mut issuer = MockUploadUrlIssuer::new();
        let mut repo = MockVideoRepository::new();

        verifier
            .expect_verify()
            .with(eq("expired-token"))
            .returning(|_| Err(AppError::Unauthorized("token has expired".to_string())));
        issuer.expect_new_object_key().times(0);
        repo.expect_put_video().times(0);

        let response = app(verifier, issuer, repo)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/uploadVideo")
                    .header("authorization", "Bearer expired-token")
                    .header("content-type", "application/json")
                    .body(Body::from(upload_body()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_upload_returns_the_signed_url_under_data() {
        let mut verifier = MockTokenVerifier::new();
        let mut issuer = MockUploadUrlIssuer::new();
        let mut repo = MockVideoRepository::new();

        verifier
            .expect_verify()
            .with(eq("good-token"))
            .returning(|_| Ok(claims_for("u1")));
        issuer
            .expect_new_object_key()
            .returning(|| "uploads/fixed.mp4".to_string());
        repo.expect_put_video().times(1).returning(|_| Ok(()));
        issuer.expect_issue().returning(|key, _| {
            Ok(SignedUploadGrant {
                url: format!("https://storage.example/{}?sig=x", key),
                object_key: key.to_string(),
            })
        });

        let response = app(verifier, issuer, repo)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/uploadVideo")
                    .header("authorization", "Bearer good-token")
                    .header("content-type", "application/json")
                    .body(Body::from(upload_body()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let url = body["data"].as_str().unwrap();
        assert!(url.contains("uploads/fixed.mp4"));
    }

    #[tokio::test]
    async fn store_failure_is_a_502_with_no_url() {
        let mut verifier = MockTokenVerifier::new();
        let mut issuer = MockUploadUrlIssuer::new();
        let mut repo = MockVideoRepository::new();

        verifier
            .expect_verify()
            .returning(|_| Ok(claims_for("u1")));
        issuer
            .expect_new_object_key()
            .returning(|| "uploads/fixed.mp4".to_string());
        repo.expect_put_video()
            .returning(|_| Err(AppError::StoreUnavailable("throttled".to_string())));
        issuer.expect_issue().times(0);

        let response = app(verifier, issuer, repo)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/uploadVideo")
                    .header("authorization", "Bearer good-token")
                    .header("content-type", "application/json")
                    .body(Body::from(upload_body()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert!(body.get("data").is_none());
        assert!(body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn user_videos_lists_only_the_callers_records() {
        let mut verifier = MockTokenVerifier::new();
        let issuer = MockUploadUrlIssuer::new();
        let mut repo = MockVideoRepository::new();

        verifier
            .expect_verify()
            .returning(|_| Ok(claims_for("u1")));
        repo.expect_videos_by_owner()
            .with(eq("u1"))
            .returning(|_| Ok(vec![record_for("u1", "v1")]));

        let response = app(verifier, issuer, repo)
            .oneshot(
                Request::builder()
                    .uri("/userVideos")
                    .header("authorization", "Bearer good-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let videos = body["videos"].as_array().unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0]["videoId"], "v1");
        assert_eq!(videos[0]["status"], "PENDING");
        assert_eq!(videos[0]["title"], "T");
    }

    #[tokio::test]
    async fn detail_of_a_foreign_video_is_404() {
        let mut verifier = MockTokenVerifier::new();
        let issuer = MockUploadUrlIssuer::new();
        let mut repo = MockVideoRepository::new();

        verifier
            .expect_verify()
            .returning(|_| Ok(claims_for("u1")));
        repo.expect_get_video()
            .returning(|_, _| Ok(Some(record_for("u2", "v1"))));

        let response = app(verifier, issuer, repo)
            .oneshot(
                Request::builder()
                    .uri("/videos/v1")
                    .header("authorization", "Bearer good-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn analysis_endpoint_returns_the_stored_blob() {
        let mut verifier = MockTokenVerifier::new();
        let issuer = MockUploadUrlIssuer::new();
        let mut repo = MockVideoRepository::new();

        verifier
            .expect_verify()
            .returning(|_| Ok(claims_for("u1")));
        repo.expect_get_video().returning(|_, _| {
            let mut record = record_for("u1", "v1");
            record.analysis = Some(json!({"summary": "a cat jumps"}));
            Ok(Some(record))
        });

        let response = app(verifier, issuer, repo)
            .oneshot(
                Request::builder()
                    .uri("/videos/v1/analysis")
                    .header("authorization", "Bearer good-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["analysis"]["summary"], "a cat jumps");
    }

    #[tokio::test]
    async fn health_echoes_the_verified_identity() {
        let mut verifier = MockTokenVerifier::new();
        let issuer = MockUploadUrlIssuer::new();
        let repo = MockVideoRepository::new();

        verifier
            .expect_verify()
            .returning(|_| Ok(claims_for("u1")));

        let response = app(verifier, issuer, repo)
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("authorization", "Bearer good-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"], "u1");
    }
}

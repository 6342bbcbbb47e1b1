#![allow(dead_code)]

use std::sync::Arc;

use annotater_api::config::ServerConfig;
use annotater_api::router::build_app_router;
use annotater_api::state::AppState;
use annotater_core::detection::{Detector, PredictionError};
use annotater_core::document::DocumentData;
use annotater_core::markup::Markup;
use annotater_detection::ModelConfig;
use annotater_storage::{MemoryFileStore, StorageConfig};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderValue, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const BOUNDARY: &str = "annotater-test-boundary";

/// Detector returning the same markups for every document.
pub struct FixedDetector(pub Vec<Markup>);

#[async_trait]
impl Detector for FixedDetector {
    async fn predict(&self, _document: &DocumentData) -> Result<Vec<Markup>, PredictionError> {
        Ok(self.0.clone())
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        max_upload_bytes: 10 * 1024 * 1024,
        storage: StorageConfig {
            document_root: "/data/documents".into(),
            document_ext: ".pdf".into(),
            report_root: "/data/reports".into(),
            report_ext: ".pdf".into(),
        },
        model: ModelConfig {
            model_url: "http://127.0.0.1:1".into(),
            timeout_secs: 1,
        },
    }
}

/// Build the full application over the given pool, an in-memory blob store
/// and a detector that always reports `detections`.
pub fn build_test_app(pool: PgPool, detections: Vec<Markup>) -> Router {
    let config = test_config();
    let state = AppState::new(
        pool,
        config.clone(),
        Arc::new(MemoryFileStore::new()),
        Arc::new(FixedDetector(detections)),
    );
    build_app_router(state, &config)
}

/// Send a request through the router.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, json: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

/// A multipart upload with a single `file` part.
pub fn post_file(uri: &str, file_name: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/pdf\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::post(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

//! Exercises `HttpModelHandler` against a stub model served by axum on a
//! loopback port.

use std::error::Error;

use annotater_core::detection::Detector;
use annotater_core::test_support::default_document_data;
use annotater_detection::{DetectionModel, HttpModelHandler, ModelConfig, ModelError, ModelHandler};
use assert_matches::assert_matches;
use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

async fn spawn_model(app: Router) -> ModelConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    ModelConfig {
        model_url: format!("http://{addr}"),
        timeout_secs: 5,
    }
}

async fn echo_predict(headers: HeaderMap, body: Bytes) -> Result<Json<Value>, StatusCode> {
    let is_pdf = headers
        .get("content-type")
        .is_some_and(|v| v == "application/pdf");
    if !is_pdf || !body.starts_with(b"%PDF") {
        return Err(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
    Ok(Json(json!({
        "markups": [
            { "error_bb": [0.1, 0.5, 0.2, 0.6], "class_label": 4 }
        ]
    })))
}

#[tokio::test]
async fn test_predict_posts_pdf_and_parses_markups() {
    let config = spawn_model(Router::new().route("/predict", post(echo_predict))).await;
    let detector = DetectionModel::new(HttpModelHandler::new(&config).unwrap());

    let markups = detector.predict(&default_document_data()).await.unwrap();

    assert_eq!(markups.len(), 1);
    assert_eq!(markups[0].class_label, 4);
    assert_eq!(markups[0].id, 4);
    assert_eq!(markups[0].error_bb, [0.1, 0.5, 0.2, 0.6]);
}

#[tokio::test]
async fn test_non_success_status_is_api_error() {
    let app = Router::new().route(
        "/predict",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
    );
    let config = spawn_model(app).await;
    let handler = HttpModelHandler::new(&config).unwrap();

    let result = handler.get_model_resp(&default_document_data()).await;

    assert_matches!(result, Err(ModelError::Api { status: 500, ref body }) if body == "model crashed");
}

#[tokio::test]
async fn test_unreachable_model_is_prediction_error() {
    let config = ModelConfig {
        model_url: "http://127.0.0.1:1".into(),
        timeout_secs: 1,
    };
    let detector = DetectionModel::new(HttpModelHandler::new(&config).unwrap());

    let err = detector.predict(&default_document_data()).await.unwrap_err();

    assert!(err.to_string().starts_with("Error in model prediction"));
    assert!(err.source().is_some());
}

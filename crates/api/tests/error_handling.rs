//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! database is needed.

use annotater_api::error::AppError;
use annotater_core::detection::PredictionError;
use annotater_core::error::{CoreError, PipelineStage, StoreError};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use uuid::Uuid;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Client errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::not_found("Markup", 42));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Markup with id 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("page data is not a valid PNG".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn document_format_error_returns_400_with_name() {
    let err = AppError::Core(CoreError::DocumentFormat {
        name: "scan.docx".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "UNSUPPORTED_FORMAT");
    assert_eq!(
        json["error"],
        "Unsupported document format: document with name scan.docx"
    );
}

#[tokio::test]
async fn duplicate_markup_type_returns_409() {
    let err = AppError::Core(CoreError::DuplicateMarkupType { id: 3 });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains('3'));
}

#[tokio::test]
async fn violating_key_returns_409() {
    let err = AppError::Core(CoreError::ViolatingKey("markup type 1 is referenced".into()));

    let (status, _) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("Missing multipart field 'file'".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "Missing multipart field 'file'");
}

// ---------------------------------------------------------------------------
// Server errors are sanitized
// ---------------------------------------------------------------------------

#[tokio::test]
async fn storage_error_names_entity_without_backend_detail() {
    let err = AppError::Core(CoreError::storage(
        "accessing markup 5",
        StoreError::backend("password authentication failed for user admin"),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "Storage failure while accessing markup 5");
    assert!(!json["error"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn internal_error_returns_generic_500() {
    let err = AppError::Core(CoreError::Internal("pool exhausted at 10.0.0.7".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn pipeline_error_names_document_and_stage_only() {
    let id = Uuid::nil();
    let err = AppError::Core(
        CoreError::from(PredictionError::new("connection refused at 10.0.0.7"))
            .in_stage(PipelineStage::Detect, id),
    );

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], format!("Document {id}: running detection failed"));
}

#[tokio::test]
async fn pipeline_wrapped_not_found_still_returns_404() {
    let err = AppError::Core(
        CoreError::not_found("DocumentData", Uuid::nil())
            .in_stage(PipelineStage::DeleteDocument, Uuid::nil()),
    );

    let (status, _) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

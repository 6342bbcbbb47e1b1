//! Handlers for the `/annotations` resource (manually added markups).
//!
//! Page images travel as base64-encoded PNG inside JSON.

use annotater_core::error::CoreError;
use annotater_core::markup::Markup;
use annotater_core::types::BoundingBox;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /annotations`.
#[derive(Debug, Deserialize)]
pub struct CreateAnnotationRequest {
    pub creator_id: u64,
    pub class_label: u64,
    /// `[x_min, x_max, y_min, y_max]`, normalized.
    pub error_bb: Vec<f32>,
    /// Base64-encoded PNG.
    pub page_data: String,
}

#[derive(Debug, Serialize)]
pub struct AnnotationResponse {
    pub id: u64,
    pub creator_id: u64,
    pub class_label: u64,
    pub error_bb: BoundingBox,
    pub page_data: String,
}

impl From<Markup> for AnnotationResponse {
    fn from(markup: Markup) -> Self {
        Self {
            id: markup.id,
            creator_id: markup.creator_id,
            class_label: markup.class_label,
            error_bb: markup.error_bb,
            page_data: STANDARD.encode(&markup.page_data),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedAnnotation {
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub struct AnnotationListParams {
    pub creator_id: Option<u64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/annotations
pub async fn create_annotation(
    State(state): State<AppState>,
    Json(input): Json<CreateAnnotationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedAnnotation>>)> {
    let error_bb = BoundingBox::try_from(input.error_bb.as_slice()).map_err(|_| {
        CoreError::Validation(format!(
            "bounding box must have 4 components, got {}",
            input.error_bb.len()
        ))
    })?;
    let page_data = STANDARD
        .decode(&input.page_data)
        .map_err(|e| AppError::BadRequest(format!("page_data is not valid base64: {e}")))?;

    let markup = Markup {
        id: 0,
        creator_id: input.creator_id,
        page_data,
        error_bb,
        class_label: input.class_label,
    };
    let id = state.annotations.add_annotation(&markup).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedAnnotation { id },
        }),
    ))
}

/// GET /api/v1/annotations[?creator_id={id}]
pub async fn list_annotations(
    State(state): State<AppState>,
    Query(params): Query<AnnotationListParams>,
) -> AppResult<Json<DataResponse<Vec<AnnotationResponse>>>> {
    let markups = match params.creator_id {
        Some(creator_id) => state.annotations.get_annotations_by_user_id(creator_id).await?,
        None => state.annotations.get_all_annotations().await?,
    };
    Ok(Json(DataResponse {
        data: markups.into_iter().map(AnnotationResponse::from).collect(),
    }))
}

/// GET /api/v1/annotations/{id}
pub async fn get_annotation(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<DataResponse<AnnotationResponse>>> {
    let markup = state.annotations.get_annotation_by_id(id).await?;
    Ok(Json(DataResponse {
        data: markup.into(),
    }))
}

/// DELETE /api/v1/annotations/{id}
pub async fn delete_annotation(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<StatusCode> {
    state.annotations.delete_annotation(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for the `/annotation-types` resource (markup-type catalog).

use annotater_core::markup::MarkupType;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /annotation-types`. `ids` wins over
/// `creator_id`; with neither, every type is listed.
#[derive(Debug, Deserialize)]
pub struct AnnotationTypeListParams {
    pub creator_id: Option<i64>,
    /// Comma-separated ids, e.g. `1,2`.
    pub ids: Option<String>,
}

fn parse_ids(raw: &str) -> Result<Vec<u64>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>()
                .map_err(|_| AppError::BadRequest(format!("Invalid markup type id '{s}'")))
        })
        .collect()
}

/// POST /api/v1/annotation-types
pub async fn create_annotation_type(
    State(state): State<AppState>,
    Json(input): Json<MarkupType>,
) -> AppResult<(StatusCode, Json<DataResponse<MarkupType>>)> {
    state.markup_types.add_annotation_type(&input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: input })))
}

/// GET /api/v1/annotation-types[?creator_id={id}|?ids=1,2]
pub async fn list_annotation_types(
    State(state): State<AppState>,
    Query(params): Query<AnnotationTypeListParams>,
) -> AppResult<Json<DataResponse<Vec<MarkupType>>>> {
    let types = match (params.ids.as_deref(), params.creator_id) {
        (Some(raw), _) => {
            let ids = parse_ids(raw)?;
            state.markup_types.get_annotation_types_by_ids(&ids).await?
        }
        (None, Some(creator_id)) => {
            state
                .markup_types
                .get_annotation_types_by_user_id(creator_id)
                .await?
        }
        (None, None) => state.markup_types.get_all_annotation_types().await?,
    };
    Ok(Json(DataResponse { data: types }))
}

/// GET /api/v1/annotation-types/{id}
pub async fn get_annotation_type(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<DataResponse<MarkupType>>> {
    let markup_type = state.markup_types.get_annotation_type_by_id(id).await?;
    Ok(Json(DataResponse { data: markup_type }))
}

/// DELETE /api/v1/annotation-types/{id}
pub async fn delete_annotation_type(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<StatusCode> {
    state.markup_types.delete_annotation_type(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn ids_are_split_on_commas() {
        assert_eq!(parse_ids("1, 2,,3").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn non_numeric_id_is_bad_request() {
        assert_matches!(parse_ids("1,x"), Err(AppError::BadRequest(msg)) if msg.contains("'x'"));
    }
}

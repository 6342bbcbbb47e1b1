//! Handlers for the `/documents` resource.
//!
//! Uploading a document runs the whole pipeline and answers with the
//! rendered PDF report.

use annotater_core::document::{DocumentData, DocumentMetaData};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response header carrying the id assigned to an uploaded document.
pub const DOCUMENT_ID_HEADER: HeaderName = HeaderName::from_static("x-document-id");

const PDF: HeaderValue = HeaderValue::from_static("application/pdf");

/// Name used when the upload carries no file name.
const UNNAMED_DOCUMENT: &str = "document.pdf";

#[derive(Debug, Deserialize)]
pub struct CreatorQuery {
    pub creator_id: u64,
}

/// The id of a document is derived from its creator and its bytes. The same
/// creator uploading the same file again re-checks the existing document;
/// another creator uploading it gets a document of their own.
pub fn document_id_for(creator_id: u64, bytes: &[u8]) -> Uuid {
    let creator_namespace = Uuid::new_v5(&Uuid::NAMESPACE_OID, &creator_id.to_be_bytes());
    Uuid::new_v5(&creator_namespace, bytes)
}

fn pdf_response(bytes: Vec<u8>) -> Response {
    ([(CONTENT_TYPE, PDF)], bytes).into_response()
}

/// POST /api/v1/documents?creator_id={id}
///
/// Expects a multipart body with a `file` part. Runs the document pipeline
/// and returns the report PDF; the document id is in `x-document-id`.
pub async fn upload_document(
    State(state): State<AppState>,
    Query(query): Query<CreatorQuery>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field
            .file_name()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNNAMED_DOCUMENT)
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        upload = Some((name, bytes.to_vec()));
        break;
    }
    let (document_name, document_bytes) =
        upload.ok_or_else(|| AppError::BadRequest("Missing multipart field 'file'".into()))?;

    let id = document_id_for(query.creator_id, &document_bytes);
    let meta = DocumentMetaData {
        id,
        creator_id: query.creator_id,
        document_name,
        page_count: 0,
        checks_count: 1,
        creation_time: chrono::Utc::now(),
    };
    let data = DocumentData { id, document_bytes };

    let report = state.documents.load_document(meta, data).await?;

    let mut response = pdf_response(report.report_data);
    let id_value = HeaderValue::from_str(&id.to_string())
        .map_err(|e| AppError::InternalError(format!("Invalid document id header: {e}")))?;
    response.headers_mut().insert(DOCUMENT_ID_HEADER, id_value);
    Ok(response)
}

/// GET /api/v1/documents?creator_id={id}
pub async fn list_documents(
    State(state): State<AppState>,
    Query(query): Query<CreatorQuery>,
) -> AppResult<Json<DataResponse<Vec<DocumentMetaData>>>> {
    let documents = state
        .documents
        .get_documents_by_creator_id(query.creator_id)
        .await?;
    Ok(Json(DataResponse { data: documents }))
}

/// GET /api/v1/documents/{id}
///
/// Returns the originally uploaded bytes.
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let document = state.documents.get_document_by_id(id).await?;
    Ok(pdf_response(document.document_bytes))
}

/// GET /api/v1/documents/{id}/meta
pub async fn get_document_meta(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<DocumentMetaData>>> {
    let meta = state.documents.get_document_meta_by_id(id).await?;
    Ok(Json(DataResponse { data: meta }))
}

/// GET /api/v1/documents/{id}/report
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let report = state.documents.get_report_by_id(id).await?;
    Ok(pdf_response(report.report_data))
}

/// DELETE /api/v1/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.documents.delete_document_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

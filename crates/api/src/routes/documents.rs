use axum::routing::get;
use axum::Router;

use crate::handlers::documents;
use crate::state::AppState;

/// Routes mounted at `/documents`.
///
/// ```text
/// POST   /              -> upload_document
/// GET    /              -> list_documents
/// GET    /{id}          -> get_document
/// DELETE /{id}          -> delete_document
/// GET    /{id}/meta     -> get_document_meta
/// GET    /{id}/report   -> get_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(documents::list_documents).post(documents::upload_document),
        )
        .route(
            "/{id}",
            get(documents::get_document).delete(documents::delete_document),
        )
        .route("/{id}/meta", get(documents::get_document_meta))
        .route("/{id}/report", get(documents::get_report))
}

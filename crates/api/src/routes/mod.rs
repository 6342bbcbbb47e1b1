pub mod annotation_types;
pub mod annotations;
pub mod documents;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /documents                      upload (multipart), list by creator
/// /documents/{id}                 original bytes, delete
/// /documents/{id}/meta            metadata
/// /documents/{id}/report          rendered report
///
/// /annotations                    list, create
/// /annotations/{id}               get, delete
///
/// /annotation-types               list (all, by creator, by ids), create
/// /annotation-types/{id}          get, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/documents", documents::router())
        .nest("/annotations", annotations::router())
        .nest("/annotation-types", annotation_types::router())
}

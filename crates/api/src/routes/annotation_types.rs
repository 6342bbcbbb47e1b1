use axum::routing::get;
use axum::Router;

use crate::handlers::annotation_types;
use crate::state::AppState;

/// Routes mounted at `/annotation-types`.
///
/// ```text
/// GET    /        -> list_annotation_types
/// POST   /        -> create_annotation_type
/// GET    /{id}    -> get_annotation_type
/// DELETE /{id}    -> delete_annotation_type
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(annotation_types::list_annotation_types)
                .post(annotation_types::create_annotation_type),
        )
        .route(
            "/{id}",
            get(annotation_types::get_annotation_type)
                .delete(annotation_types::delete_annotation_type),
        )
}

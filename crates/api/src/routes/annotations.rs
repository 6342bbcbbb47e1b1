use axum::routing::get;
use axum::Router;

use crate::handlers::annotations;
use crate::state::AppState;

/// Routes mounted at `/annotations`.
///
/// ```text
/// GET    /        -> list_annotations
/// POST   /        -> create_annotation
/// GET    /{id}    -> get_annotation
/// DELETE /{id}    -> delete_annotation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(annotations::list_annotations).post(annotations::create_annotation),
        )
        .route(
            "/{id}",
            get(annotations::get_annotation).delete(annotations::delete_annotation),
        )
}

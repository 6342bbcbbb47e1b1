use std::sync::Arc;

use annotater_core::error::{CoreError, StoreError};
use annotater_core::markup::Markup;
use annotater_core::repository::MarkupRepository;
use annotater_core::validation::{are_bbs_valid, check_png_file};
use tracing::Span;

/// Manually curated annotations.
pub struct AnnotationService {
    markups: Arc<dyn MarkupRepository>,
    span: Span,
}

impl AnnotationService {
    pub fn new(markups: Arc<dyn MarkupRepository>, span: Span) -> Self {
        Self { markups, span }
    }

    /// Validate and store a markup, returning its assigned id.
    ///
    /// Invalid boxes or page data never reach the repository.
    pub async fn add_annotation(&self, markup: &Markup) -> Result<u64, CoreError> {
        if !are_bbs_valid(&markup.error_bb) {
            return Err(CoreError::Validation(format!(
                "bounding box {:?} must lie within [0, 1]",
                markup.error_bb
            )));
        }
        check_png_file(&markup.page_data)?;

        let id = self.markups.add(markup).await.map_err(|e| match e {
            StoreError::Duplicate | StoreError::ViolatingKey => CoreError::ViolatingKey(format!(
                "markup type {} does not exist or markup already stored",
                markup.class_label
            )),
            other => CoreError::storage(
                format!(
                    "adding annotation of class {} for creator {}",
                    markup.class_label, markup.creator_id
                ),
                other,
            ),
        })?;
        tracing::info!(
            parent: &self.span,
            markup_id = id,
            creator_id = markup.creator_id,
            class_label = markup.class_label,
            "Annotation added",
        );
        Ok(id)
    }

    pub async fn delete_annotation(&self, id: u64) -> Result<(), CoreError> {
        self.markups
            .delete_by_id(id)
            .await
            .map_err(|e| markup_error(id, e))?;
        tracing::info!(parent: &self.span, markup_id = id, "Annotation deleted");
        Ok(())
    }

    pub async fn get_annotation_by_id(&self, id: u64) -> Result<Markup, CoreError> {
        self.markups
            .get_by_id(id)
            .await
            .map_err(|e| markup_error(id, e))
    }

    pub async fn get_annotations_by_user_id(&self, creator_id: u64) -> Result<Vec<Markup>, CoreError> {
        self.markups
            .get_by_creator_id(creator_id)
            .await
            .map_err(|e| CoreError::storage(format!("listing annotations of creator {creator_id}"), e))
    }

    pub async fn get_all_annotations(&self) -> Result<Vec<Markup>, CoreError> {
        self.markups
            .get_all()
            .await
            .map_err(|e| CoreError::storage("listing annotations", e))
    }
}

fn markup_error(id: u64, err: StoreError) -> CoreError {
    match err {
        StoreError::NotFound => CoreError::not_found("Markup", id),
        other => CoreError::storage(format!("accessing markup {id}"), other),
    }
}

use std::sync::Arc;

use annotater_core::error::{CoreError, StoreError};
use annotater_core::markup::MarkupType;
use annotater_core::repository::MarkupTypeRepository;
use tracing::Span;

/// Catalog of markup types.
pub struct MarkupTypeService {
    markup_types: Arc<dyn MarkupTypeRepository>,
    span: Span,
}

impl MarkupTypeService {
    pub fn new(markup_types: Arc<dyn MarkupTypeRepository>, span: Span) -> Self {
        Self { markup_types, span }
    }

    pub async fn add_annotation_type(&self, markup_type: &MarkupType) -> Result<(), CoreError> {
        let id = markup_type.id;
        self.markup_types
            .add(markup_type)
            .await
            .map_err(|e| match e {
                StoreError::Duplicate => CoreError::DuplicateMarkupType { id },
                other => type_error(id, other),
            })?;
        tracing::info!(
            parent: &self.span,
            markup_type_id = id,
            class_name = %markup_type.class_name,
            "Markup type added",
        );
        Ok(())
    }

    /// Types still referenced by markups cannot be deleted.
    pub async fn delete_annotation_type(&self, id: u64) -> Result<(), CoreError> {
        self.markup_types
            .delete_by_id(id)
            .await
            .map_err(|e| type_error(id, e))?;
        tracing::info!(parent: &self.span, markup_type_id = id, "Markup type deleted");
        Ok(())
    }

    pub async fn get_annotation_type_by_id(&self, id: u64) -> Result<MarkupType, CoreError> {
        self.markup_types
            .get_by_id(id)
            .await
            .map_err(|e| type_error(id, e))
    }

    pub async fn get_all_annotation_types(&self) -> Result<Vec<MarkupType>, CoreError> {
        self.markup_types
            .get_all()
            .await
            .map_err(|e| CoreError::storage("listing markup types", e))
    }

    pub async fn get_annotation_types_by_user_id(
        &self,
        creator_id: i64,
    ) -> Result<Vec<MarkupType>, CoreError> {
        self.markup_types
            .get_by_creator_id(creator_id)
            .await
            .map_err(|e| CoreError::storage(format!("listing markup types of creator {creator_id}"), e))
    }

    /// Types for the given ids in ascending id order; unknown ids are skipped.
    pub async fn get_annotation_types_by_ids(&self, ids: &[u64]) -> Result<Vec<MarkupType>, CoreError> {
        let mut types = self
            .markup_types
            .get_by_ids(ids)
            .await
            .map_err(|e| CoreError::storage(format!("fetching markup types {ids:?}"), e))?;
        types.sort_by_key(|t| t.id);
        Ok(types)
    }
}

fn type_error(id: u64, err: StoreError) -> CoreError {
    match err {
        StoreError::NotFound => CoreError::not_found("MarkupType", id),
        StoreError::ViolatingKey => {
            CoreError::ViolatingKey(format!("markup type {id} is still referenced by markups"))
        }
        other => CoreError::storage(format!("accessing markup type {id}"), other),
    }
}

use std::fmt;

use uuid::Uuid;

use crate::detection::PredictionError;
use crate::report::RenderError;

/// Storage-agnostic failure kinds returned by every repository adapter.
///
/// Relational adapters translate SQLSTATE codes and file-backed adapters
/// translate `io::ErrorKind` into these variants, so callers never depend on
/// a storage technology's native error type.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("duplicate key")]
    Duplicate,

    #[error("violating key")]
    ViolatingKey,

    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(err: impl fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Stage of the document pipeline that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    StoreDocument,
    StoreMetadata,
    Detect,
    ResolveMarkupTypes,
    RenderReport,
    StoreReport,
    DeleteMetadata,
    DeleteDocument,
    DeleteReport,
}

impl PipelineStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StoreDocument => "storing document data",
            Self::StoreMetadata => "storing document metadata",
            Self::Detect => "running detection",
            Self::ResolveMarkupTypes => "resolving markup types",
            Self::RenderReport => "rendering report",
            Self::StoreReport => "storing report",
            Self::DeleteMetadata => "deleting document metadata",
            Self::DeleteDocument => "deleting document data",
            Self::DeleteReport => "deleting report",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unsupported document format: document with name {name}")]
    DocumentFormat { name: String },

    #[error("Markup type with id {id} already exists")]
    DuplicateMarkupType { id: u64 },

    #[error("Violating key: {0}")]
    ViolatingKey(String),

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("{context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: StoreError,
    },

    #[error("Document {document_id}: {stage} failed: {source}")]
    Pipeline {
        stage: PipelineStage,
        document_id: Uuid,
        #[source]
        source: Box<CoreError>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn storage(context: impl Into<String>, source: StoreError) -> Self {
        Self::Storage {
            context: context.into(),
            source,
        }
    }

    /// Wrap `self` with the pipeline stage and document it failed on.
    pub fn in_stage(self, stage: PipelineStage, document_id: Uuid) -> Self {
        Self::Pipeline {
            stage,
            document_id,
            source: Box::new(self),
        }
    }

    /// The innermost error, with pipeline wrappers peeled off.
    pub fn root(&self) -> &CoreError {
        match self {
            Self::Pipeline { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_error_names_stage_and_document() {
        let id = Uuid::nil();
        let err = CoreError::storage("saving document", StoreError::backend("disk full"))
            .in_stage(PipelineStage::StoreDocument, id);

        assert_eq!(
            err.to_string(),
            format!(
                "Document {id}: storing document data failed: saving document: \
                 storage backend failure: disk full"
            )
        );
    }

    #[test]
    fn root_peels_nested_pipeline_wrappers() {
        let err = CoreError::not_found("DocumentData", 7)
            .in_stage(PipelineStage::DeleteDocument, Uuid::nil())
            .in_stage(PipelineStage::DeleteReport, Uuid::nil());

        assert!(err.is_not_found());
        assert_eq!(err.root().to_string(), "Entity not found: DocumentData with id 7");
    }

    #[test]
    fn document_format_names_document() {
        let err = CoreError::DocumentFormat {
            name: "default_doc".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported document format: document with name default_doc"
        );
    }
}

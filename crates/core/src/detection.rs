//! Detection port: boundary to the external inference model.

use std::error::Error as StdError;

use async_trait::async_trait;

use crate::document::DocumentData;
use crate::markup::Markup;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// The single error identity for every model failure.
///
/// Transport errors, inference errors and malformed model output all
/// collapse into this type; the underlying cause stays reachable through
/// [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
#[error("Error in model prediction: {source}")]
pub struct PredictionError {
    #[source]
    source: BoxError,
}

impl PredictionError {
    pub fn new(cause: impl Into<BoxError>) -> Self {
        Self {
            source: cause.into(),
        }
    }

    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
#[async_trait]
pub trait Detector: Send + Sync {
    /// Run the model over a document. An empty vec means no defects.
    async fn predict(&self, document: &DocumentData) -> Result<Vec<Markup>, PredictionError>;
}

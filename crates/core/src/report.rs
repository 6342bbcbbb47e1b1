//! Report-renderer port.

use uuid::Uuid;

use crate::document::{DocumentData, ErrorReport};
use crate::markup::{Markup, MarkupType};

#[derive(Debug, thiserror::Error)]
#[error("Report rendering failed: {0}")]
pub struct RenderError(pub String);

/// Pure combination of a document, its markups and their resolved types
/// into a report. Implementations perform no storage I/O.
#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
pub trait ReportCreator: Send + Sync {
    fn create_report(
        &self,
        document_id: Uuid,
        document: &DocumentData,
        markups: &[Markup],
        types: &[MarkupType],
    ) -> Result<ErrorReport, RenderError>;
}

//! Document records: relational metadata, raw bytes and the rendered report.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Timestamp;

/// Structured document record owned by the relational store.
///
/// Immutable after creation except `checks_count`, which grows every time
/// the pipeline is re-run for the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetaData {
    pub id: Uuid,
    pub creator_id: u64,
    pub document_name: String,
    pub page_count: i32,
    pub checks_count: i32,
    pub creation_time: Timestamp,
}

/// Raw uploaded bytes, stored as one blob keyed by the metadata id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentData {
    pub id: Uuid,
    pub document_bytes: Vec<u8>,
}

/// Rendered report for a document. One per document, regenerable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub document_id: Uuid,
    pub report_data: Vec<u8>,
}

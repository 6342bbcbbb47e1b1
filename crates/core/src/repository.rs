//! Repository ports.
//!
//! Structured records (markups, markup types, document metadata) live in a
//! relational store; raw bytes (documents, reports) live in a blob store.
//! Each store gets its own capability trait so either side can be swapped
//! independently. Every method reports failures as [`StoreError`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::document::{DocumentData, DocumentMetaData, ErrorReport};
use crate::error::StoreError;
use crate::markup::{Markup, MarkupType};

// ---------------------------------------------------------------------------
// Relational records
// ---------------------------------------------------------------------------

#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
#[async_trait]
pub trait MarkupRepository: Send + Sync {
    /// Insert a markup and return its store-assigned id.
    ///
    /// A class label with no matching markup type fails with
    /// [`StoreError::ViolatingKey`].
    async fn add(&self, markup: &Markup) -> Result<u64, StoreError>;

    async fn delete_by_id(&self, id: u64) -> Result<(), StoreError>;

    async fn get_by_id(&self, id: u64) -> Result<Markup, StoreError>;

    async fn get_by_creator_id(&self, creator_id: u64) -> Result<Vec<Markup>, StoreError>;

    async fn get_all(&self) -> Result<Vec<Markup>, StoreError>;
}

#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
#[async_trait]
pub trait MarkupTypeRepository: Send + Sync {
    /// Insert a markup type under its own id. An existing id fails with
    /// [`StoreError::Duplicate`].
    async fn add(&self, markup_type: &MarkupType) -> Result<(), StoreError>;

    async fn delete_by_id(&self, id: u64) -> Result<(), StoreError>;

    async fn get_by_id(&self, id: u64) -> Result<MarkupType, StoreError>;

    async fn get_by_creator_id(&self, creator_id: i64) -> Result<Vec<MarkupType>, StoreError>;

    async fn get_all(&self) -> Result<Vec<MarkupType>, StoreError>;

    /// Fetch every type whose id is in `ids`, ordered by id. Unknown ids are
    /// skipped.
    async fn get_by_ids(&self, ids: &[u64]) -> Result<Vec<MarkupType>, StoreError>;
}

#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
#[async_trait]
pub trait DocumentMetaRepository: Send + Sync {
    /// Insert metadata, or bump `checks_count` when the id already exists.
    async fn add(&self, meta: &DocumentMetaData) -> Result<(), StoreError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<DocumentMetaData, StoreError>;

    async fn get_by_creator_id(&self, creator_id: u64)
        -> Result<Vec<DocumentMetaData>, StoreError>;
}

// ---------------------------------------------------------------------------
// Blobs
// ---------------------------------------------------------------------------

#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
#[async_trait]
pub trait DocumentDataRepository: Send + Sync {
    /// Write the document bytes, overwriting any previous blob for the id.
    async fn add(&self, document: &DocumentData) -> Result<(), StoreError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<DocumentData, StoreError>;
}

#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
#[async_trait]
pub trait ReportDataRepository: Send + Sync {
    /// Write the report bytes, overwriting any previous report for the
    /// document.
    async fn add(&self, report: &ErrorReport) -> Result<(), StoreError>;

    async fn delete_by_id(&self, document_id: Uuid) -> Result<(), StoreError>;

    async fn get_by_id(&self, document_id: Uuid) -> Result<ErrorReport, StoreError>;
}

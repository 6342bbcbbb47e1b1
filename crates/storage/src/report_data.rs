use std::path::PathBuf;
use std::sync::Arc;

use annotater_core::document::ErrorReport;
use annotater_core::error::StoreError;
use annotater_core::file_store::FileStore;
use annotater_core::repository::ReportDataRepository;
use async_trait::async_trait;
use uuid::Uuid;

use crate::blob::BlobTree;

/// Rendered reports, one per document, stored as `<root>/<document_id><ext>`.
#[derive(Clone)]
pub struct ReportDataRepo {
    tree: BlobTree,
}

impl ReportDataRepo {
    pub fn new(store: Arc<dyn FileStore>, root: impl Into<PathBuf>, ext: impl Into<String>) -> Self {
        Self {
            tree: BlobTree::new(store, root.into(), ext.into()),
        }
    }
}

#[async_trait]
impl ReportDataRepository for ReportDataRepo {
    async fn add(&self, report: &ErrorReport) -> Result<(), StoreError> {
        self.tree.write(report.document_id, &report.report_data).await
    }

    async fn delete_by_id(&self, document_id: Uuid) -> Result<(), StoreError> {
        self.tree.remove(document_id).await
    }

    async fn get_by_id(&self, document_id: Uuid) -> Result<ErrorReport, StoreError> {
        let report_data = self.tree.read(document_id).await?;
        Ok(ErrorReport {
            document_id,
            report_data,
        })
    }
}

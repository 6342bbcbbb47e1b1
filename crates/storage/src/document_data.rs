use std::path::PathBuf;
use std::sync::Arc;

use annotater_core::document::DocumentData;
use annotater_core::error::StoreError;
use annotater_core::file_store::FileStore;
use annotater_core::repository::DocumentDataRepository;
use async_trait::async_trait;
use uuid::Uuid;

use crate::blob::BlobTree;

/// Raw uploaded documents stored as `<root>/<id><ext>`.
#[derive(Clone)]
pub struct DocumentDataRepo {
    tree: BlobTree,
}

impl DocumentDataRepo {
    pub fn new(store: Arc<dyn FileStore>, root: impl Into<PathBuf>, ext: impl Into<String>) -> Self {
        Self {
            tree: BlobTree::new(store, root.into(), ext.into()),
        }
    }
}

#[async_trait]
impl DocumentDataRepository for DocumentDataRepo {
    async fn add(&self, document: &DocumentData) -> Result<(), StoreError> {
        self.tree.write(document.id, &document.document_bytes).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        self.tree.remove(id).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<DocumentData, StoreError> {
        let document_bytes = self.tree.read(id).await?;
        Ok(DocumentData { id, document_bytes })
    }
}

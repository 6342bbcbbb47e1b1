use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use annotater_core::error::StoreError;
use annotater_core::file_store::FileStore;
use uuid::Uuid;

/// One directory of `<id><ext>` blobs on top of a [`FileStore`].
#[derive(Clone)]
pub(crate) struct BlobTree {
    store: Arc<dyn FileStore>,
    root: PathBuf,
    ext: String,
}

impl BlobTree {
    pub(crate) fn new(store: Arc<dyn FileStore>, root: PathBuf, ext: String) -> Self {
        Self { store, root, ext }
    }

    pub(crate) fn path_for(&self, id: Uuid) -> PathBuf {
        self.root.join(format!("{id}{}", self.ext))
    }

    pub(crate) async fn write(&self, id: Uuid, bytes: &[u8]) -> Result<(), StoreError> {
        if !self.store.exists(&self.root).await.map_err(map_io_error)? {
            tracing::debug!(root = %self.root.display(), "Creating blob root");
            self.store.mkdir_all(&self.root).await.map_err(map_io_error)?;
        }
        self.store
            .write(&self.path_for(id), bytes)
            .await
            .map_err(map_io_error)
    }

    pub(crate) async fn read(&self, id: Uuid) -> Result<Vec<u8>, StoreError> {
        self.store
            .read(&self.path_for(id))
            .await
            .map_err(map_io_error)
    }

    pub(crate) async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        self.store
            .remove(&self.path_for(id))
            .await
            .map_err(map_io_error)
    }
}

fn map_io_error(err: io::Error) -> StoreError {
    match err.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound,
        _ => StoreError::backend(err),
    }
}

use std::io;
use std::path::Path;

use annotater_core::file_store::FileStore;
use async_trait::async_trait;

/// [`FileStore`] over the local filesystem. Every call opens and closes its
/// own file handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

#[async_trait]
impl FileStore for LocalFileStore {
    async fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        tokio::fs::write(path, bytes).await
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }

    async fn exists(&self, path: &Path) -> io::Result<bool> {
        tokio::fs::try_exists(path).await
    }

    async fn mkdir_all(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }
}

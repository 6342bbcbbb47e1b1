//! Minimal file-store port used by the blob repositories.
//!
//! Keeps the blob adapters indifferent to local disk vs. any other byte
//! store. Implementations report plain `io::Error`s; the repositories above
//! them translate `ErrorKind::NotFound` into `StoreError::NotFound`.

use std::io;
use std::path::Path;

use async_trait::async_trait;

#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    async fn remove(&self, path: &Path) -> io::Result<()>;

    async fn exists(&self, path: &Path) -> io::Result<bool>;

    async fn mkdir_all(&self, path: &Path) -> io::Result<()>;
}

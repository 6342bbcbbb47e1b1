use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use annotater_core::file_store::FileStore;
use async_trait::async_trait;

#[derive(Debug, Default)]
struct Entries {
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
}

/// In-memory [`FileStore`]. The lock is held only for the duration of a
/// single call.
///
/// Writing into a directory that was never created fails with
/// `ErrorKind::NotFound`, like the local filesystem does.
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    entries: Mutex<Entries>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored files.
    pub fn len(&self) -> io::Result<usize> {
        Ok(self.lock()?.files.len())
    }

    pub fn is_empty(&self) -> io::Result<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, Entries>> {
        self.entries
            .lock()
            .map_err(|_| io::Error::other("memory file store lock poisoned"))
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut entries = self.lock()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !entries.dirs.contains(parent) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("directory {} does not exist", parent.display()),
                ));
            }
        }
        entries.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.lock()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        self.lock()?
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    async fn exists(&self, path: &Path) -> io::Result<bool> {
        let entries = self.lock()?;
        Ok(entries.files.contains_key(path) || entries.dirs.contains(path))
    }

    async fn mkdir_all(&self, path: &Path) -> io::Result<()> {
        let mut entries = self.lock()?;
        for ancestor in path.ancestors().filter(|p| !p.as_os_str().is_empty()) {
            entries.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }
}

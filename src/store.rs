//! File-backed byte store behind the `/files` endpoint.

use std::io;
use std::path::PathBuf;

/// Reads and writes whole files under one base directory.
///
/// Concurrent writers to the same name are not coordinated; whatever the
/// filesystem does is what you get.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Full path for `name`. No normalization is applied here; callers are
    /// expected to have validated `name` first.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Reads the whole file. A missing file is `Ok(None)`, not an error.
    pub async fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path_for(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Creates or truncates the file and writes `bytes` verbatim.
    pub async fn write(&self, name: &str, bytes: &[u8]) -> io::Result<()> {
        tokio::fs::write(self.path_for(name), bytes).await
    }
}

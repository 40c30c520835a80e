//! Remote filesystem client trait definitions

use async_trait::async_trait;
use std::path::Path;
use std::time::SystemTime;

use crate::error::Result;

/// Async remote filesystem client.
///
/// The gateway delegates every effect to an implementation of this trait.
/// Paths are absolute within the remote namespace (`/a/b`), never host
/// paths; the local side of a transfer is a host [`Path`].
///
/// Implementations must be safe to share across callers (`Send + Sync`).
#[async_trait]
pub trait RemoteFs: Send + Sync {
    /// Check if a path exists.
    async fn exists(&self, path: &str) -> Result<bool>;

    /// Create a directory, including missing ancestors.
    async fn mkdirs(&self, path: &str) -> Result<bool>;

    /// Create a file with the given content, replacing any existing file.
    /// The content is fully committed before the call returns.
    async fn create(&self, path: &str, content: &[u8]) -> Result<()>;

    /// Read a file's entire contents.
    async fn open(&self, path: &str) -> Result<Vec<u8>>;

    /// Delete a file or directory. `recursive` controls whether directory
    /// contents are removed as well.
    async fn delete(&self, path: &str, recursive: bool) -> Result<bool>;

    /// Copy a local file into the remote namespace.
    async fn copy_from_local(&self, local: &Path, remote: &str) -> Result<()>;

    /// Copy a remote file out to the local filesystem.
    async fn copy_to_local(&self, remote: &str, local: &Path) -> Result<()>;

    /// List the immediate children of a directory.
    async fn list_status(&self, path: &str) -> Result<Vec<FileStatus>>;
}

/// Status of one remote entry, as reported by [`RemoteFs::list_status`].
#[derive(Debug, Clone)]
pub struct FileStatus {
    /// Path of the entry, absolute within the remote namespace.
    pub path: String,
    /// Entry kind
    pub kind: FileKind,
    /// Permission bits (Unix mode)
    pub mode: u32,
    /// Owning identity
    pub owner: String,
    /// Owning group
    pub group: String,
    /// Last modification time
    pub modified: SystemTime,
}

/// Remote entry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Regular file
    File,
    /// Directory
    Directory,
}

impl FileKind {
    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, FileKind::File)
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, FileKind::Directory)
    }
}

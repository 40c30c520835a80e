//! Host-directory remote filesystem implementation
//!
//! Maps the remote namespace onto a directory of the host filesystem.
//! This deliberately reaches outside any sandbox; it backs `file://`
//! roots so the gateway can be driven against real storage.

use async_trait::async_trait;
use std::io::{Error as IoError, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use super::traits::{FileKind, FileStatus, RemoteFs};
use crate::error::Result;
use crate::path;

/// Remote filesystem rooted at a host directory.
pub struct LocalDirFs {
    base: PathBuf,
    owner: String,
    group: String,
}

impl LocalDirFs {
    /// Create a backend rooted at `base`, reporting entries as owned by
    /// the given identity.
    pub fn new(base: impl Into<PathBuf>, owner: &str) -> Self {
        Self {
            base: base.into(),
            owner: owner.to_string(),
            group: "supergroup".to_string(),
        }
    }

    fn host_path(&self, remote: &str) -> PathBuf {
        let normalized = path::normalize(remote);
        self.base.join(normalized.trim_start_matches('/'))
    }

    fn status_of(&self, remote_path: String, metadata: &std::fs::Metadata) -> FileStatus {
        let kind = if metadata.is_dir() {
            FileKind::Directory
        } else {
            FileKind::File
        };

        FileStatus {
            path: remote_path,
            kind,
            mode: mode_of(metadata),
            owner: self.owner.clone(),
            group: self.group.clone(),
            modified: metadata.modified().unwrap_or(UNIX_EPOCH),
        }
    }
}

#[cfg(unix)]
fn mode_of(metadata: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_of(metadata: &std::fs::Metadata) -> u32 {
    if metadata.is_dir() {
        0o755
    } else {
        0o644
    }
}

#[async_trait]
impl RemoteFs for LocalDirFs {
    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.host_path(path)).await?)
    }

    async fn mkdirs(&self, path: &str) -> Result<bool> {
        tokio::fs::create_dir_all(self.host_path(path)).await?;
        Ok(true)
    }

    async fn create(&self, path: &str, content: &[u8]) -> Result<()> {
        tokio::fs::write(self.host_path(path), content).await?;
        Ok(())
    }

    async fn open(&self, path: &str) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(self.host_path(path)).await?)
    }

    async fn delete(&self, path: &str, recursive: bool) -> Result<bool> {
        let host = self.host_path(path);
        let metadata = tokio::fs::metadata(&host).await?;

        if metadata.is_dir() {
            if recursive {
                tokio::fs::remove_dir_all(&host).await?;
            } else {
                tokio::fs::remove_dir(&host).await?;
            }
        } else {
            tokio::fs::remove_file(&host).await?;
        }

        Ok(true)
    }

    async fn copy_from_local(&self, local: &Path, remote: &str) -> Result<()> {
        tokio::fs::copy(local, self.host_path(remote)).await?;
        Ok(())
    }

    async fn copy_to_local(&self, remote: &str, local: &Path) -> Result<()> {
        tokio::fs::copy(self.host_path(remote), local).await?;
        Ok(())
    }

    async fn list_status(&self, path: &str) -> Result<Vec<FileStatus>> {
        let dir = path::normalize(path);
        let host = self.host_path(&dir);

        let metadata = tokio::fs::metadata(&host).await?;
        if !metadata.is_dir() {
            return Err(IoError::other("not a directory").into());
        }

        let mut result = Vec::new();
        let mut entries = tokio::fs::read_dir(&host).await?;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let name = name
                .to_str()
                .ok_or_else(|| IoError::new(ErrorKind::InvalidData, "non-utf8 file name"))?
                .to_string();

            let remote_path = if dir == "/" {
                format!("/{name}")
            } else {
                format!("{dir}/{name}")
            };

            let metadata = entry.metadata().await?;
            result.push(self.status_of(remote_path, &metadata));
        }

        Ok(result)
    }
}

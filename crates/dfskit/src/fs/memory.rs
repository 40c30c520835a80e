//! In-memory remote filesystem implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::{Error as IoError, ErrorKind};
use std::path::Path;
use std::sync::RwLock;
use std::time::SystemTime;

use super::traits::{FileKind, FileStatus, RemoteFs};
use crate::error::Result;
use crate::path;

/// In-memory remote filesystem.
///
/// Stores the whole namespace in a HashMap. Useful as the substitute
/// client in tests and as the backend behind `mem://` roots.
pub struct InMemoryDfs {
    entries: RwLock<HashMap<String, FsEntry>>,
    owner: String,
    group: String,
}

#[derive(Debug, Clone)]
enum FsEntry {
    File {
        content: Vec<u8>,
        mode: u32,
        modified: SystemTime,
    },
    Directory {
        mode: u32,
        modified: SystemTime,
    },
}

impl Default for InMemoryDfs {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDfs {
    /// Create a new in-memory filesystem with only the root directory.
    pub fn new() -> Self {
        Self::with_owner("root")
    }

    /// Create a new in-memory filesystem whose entries report the given
    /// owning identity.
    pub fn with_owner(owner: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            "/".to_string(),
            FsEntry::Directory {
                mode: 0o755,
                modified: SystemTime::now(),
            },
        );

        Self {
            entries: RwLock::new(entries),
            owner: owner.to_string(),
            group: "supergroup".to_string(),
        }
    }

    fn status_of(&self, path: &str, entry: &FsEntry) -> FileStatus {
        let (kind, mode, modified) = match entry {
            FsEntry::File { mode, modified, .. } => (FileKind::File, *mode, *modified),
            FsEntry::Directory { mode, modified } => (FileKind::Directory, *mode, *modified),
        };

        FileStatus {
            path: path.to_string(),
            kind,
            mode,
            owner: self.owner.clone(),
            group: self.group.clone(),
            modified,
        }
    }
}

#[async_trait]
impl RemoteFs for InMemoryDfs {
    async fn exists(&self, path: &str) -> Result<bool> {
        let path = path::normalize(path);
        let entries = self.entries.read().unwrap();
        Ok(entries.contains_key(&path))
    }

    async fn mkdirs(&self, path: &str) -> Result<bool> {
        let path = path::normalize(path);
        let mut entries = self.entries.write().unwrap();

        let mut current = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current.push('/');
            current.push_str(segment);

            match entries.get(&current) {
                Some(FsEntry::File { .. }) => {
                    return Err(IoError::other("not a directory").into());
                }
                Some(FsEntry::Directory { .. }) => {}
                None => {
                    entries.insert(
                        current.clone(),
                        FsEntry::Directory {
                            mode: 0o755,
                            modified: SystemTime::now(),
                        },
                    );
                }
            }
        }

        Ok(true)
    }

    async fn create(&self, path: &str, content: &[u8]) -> Result<()> {
        let path = path::normalize(path);
        let mut entries = self.entries.write().unwrap();

        if let Some(parent) = path::parent(&path) {
            match entries.get(parent) {
                Some(FsEntry::Directory { .. }) => {}
                Some(FsEntry::File { .. }) => {
                    return Err(IoError::other("parent is not a directory").into());
                }
                None => {
                    return Err(
                        IoError::new(ErrorKind::NotFound, "parent directory not found").into(),
                    );
                }
            }
        }

        if let Some(FsEntry::Directory { .. }) = entries.get(&path) {
            return Err(IoError::other("is a directory").into());
        }

        entries.insert(
            path,
            FsEntry::File {
                content: content.to_vec(),
                mode: 0o644,
                modified: SystemTime::now(),
            },
        );

        Ok(())
    }

    async fn open(&self, path: &str) -> Result<Vec<u8>> {
        let path = path::normalize(path);
        let entries = self.entries.read().unwrap();

        match entries.get(&path) {
            Some(FsEntry::File { content, .. }) => Ok(content.clone()),
            Some(FsEntry::Directory { .. }) => Err(IoError::other("is a directory").into()),
            None => Err(IoError::new(ErrorKind::NotFound, "file not found").into()),
        }
    }

    async fn delete(&self, path: &str, recursive: bool) -> Result<bool> {
        let path = path::normalize(path);
        let mut entries = self.entries.write().unwrap();

        match entries.get(&path) {
            Some(FsEntry::Directory { .. }) => {
                let has_children = entries
                    .keys()
                    .any(|p| path::parent(p) == Some(path.as_str()));

                if has_children && !recursive {
                    return Err(IoError::other("directory not empty").into());
                }

                let to_remove: Vec<String> = entries
                    .keys()
                    .filter(|p| {
                        p.as_str() == path
                            || (path == "/" && p.as_str() != "/")
                            || p.starts_with(&format!("{path}/"))
                    })
                    .cloned()
                    .collect();

                for p in to_remove {
                    entries.remove(&p);
                }
            }
            Some(FsEntry::File { .. }) => {
                entries.remove(&path);
            }
            None => {
                return Err(IoError::new(ErrorKind::NotFound, "not found").into());
            }
        }

        Ok(true)
    }

    async fn copy_from_local(&self, local: &Path, remote: &str) -> Result<()> {
        let content = tokio::fs::read(local).await?;
        self.create(remote, &content).await
    }

    async fn copy_to_local(&self, remote: &str, local: &Path) -> Result<()> {
        let content = self.open(remote).await?;
        tokio::fs::write(local, content).await?;
        Ok(())
    }

    async fn list_status(&self, path: &str) -> Result<Vec<FileStatus>> {
        let path = path::normalize(path);
        let entries = self.entries.read().unwrap();

        match entries.get(&path) {
            Some(FsEntry::Directory { .. }) => {
                let mut result = Vec::new();

                for (entry_path, entry) in entries.iter() {
                    if path::parent(entry_path) == Some(path.as_str()) {
                        result.push(self.status_of(entry_path, entry));
                    }
                }

                Ok(result)
            }
            Some(_) => Err(IoError::other("not a directory").into()),
            None => Err(IoError::new(ErrorKind::NotFound, "not found").into()),
        }
    }
}

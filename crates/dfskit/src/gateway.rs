//! Path gateway over a remote filesystem client
//!
//! Every operation funnels through one shared existence triage before
//! performing its effect. Precondition violations raise
//! [`Error::NotFound`] / [`Error::AlreadyExists`]; failures of the effect
//! itself are logged and collapsed into a `false` return unless the
//! gateway was built with `strict_io(true)`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{error, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::fs::{InMemoryDfs, LocalDirFs, RemoteFs};
use crate::listing;
use crate::path;

/// Chunk size for streaming file contents to the output sink.
const VIEW_CHUNK_SIZE: usize = 1024;

/// Three-valued existence state of a remote path.
///
/// Computed fresh on every call; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    /// The path resolves to an existing entry.
    Exists,
    /// The path is absent but its parent resolves; creation is safe.
    AbsentCreatable,
    /// The parent does not resolve, the composed address is malformed, or
    /// the existence probe itself failed. Creation would fail.
    AbsentInvalid,
}

/// Existence triage carrying the resolved remote path alongside the state.
enum Triage {
    Exists(String),
    Creatable(String),
    Invalid,
}

/// Gateway over a remote filesystem, scoped to a root address and an
/// operating identity.
///
/// One instance per logical user session; the client handle is owned for
/// the gateway's lifetime and never mutated after construction.
pub struct DfsGateway {
    fs: Arc<dyn RemoteFs>,
    root: String,
    user: String,
    strict_io: bool,
}

impl DfsGateway {
    /// Open a gateway rooted at the given address, operating as `user`.
    ///
    /// The backend is selected by the address scheme: `file://` maps the
    /// namespace onto a host directory, `mem://` onto a fresh in-memory
    /// filesystem. Fails with [`Error::Connection`] when the address does
    /// not parse, carries an unsupported scheme, or is unreachable; no
    /// partial state is retained.
    pub async fn connect(root: &str, user: &str) -> Result<Self> {
        let url = Url::parse(root)
            .map_err(|err| Error::Connection(format!("invalid root address '{root}': {err}")))?;

        let fs: Arc<dyn RemoteFs> = match url.scheme() {
            "file" => {
                let base = PathBuf::from(url.path());
                if !tokio::fs::try_exists(&base).await.unwrap_or(false) {
                    return Err(Error::Connection(format!(
                        "root directory not reachable: {}",
                        base.display()
                    )));
                }
                Arc::new(LocalDirFs::new(base, user))
            }
            "mem" => Arc::new(InMemoryDfs::with_owner(user)),
            scheme => {
                return Err(Error::Connection(format!("unsupported scheme: {scheme}")));
            }
        };

        Ok(Self {
            fs,
            root: root.to_string(),
            user: user.to_string(),
            strict_io: false,
        })
    }

    /// Create a new GatewayBuilder for customized construction.
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::default()
    }

    /// The configured root address.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The identity operations run under.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Classify a path's existence state.
    ///
    /// Resolution failures (empty path, missing leading slash, composed
    /// address that drops the root's scheme or authority, probe errors)
    /// degrade to [`PathState::AbsentInvalid`] rather than erroring;
    /// degraded probes are surfaced at `warn` level.
    pub async fn classify_path(&self, path: &str) -> PathState {
        match self.triage(path).await {
            Triage::Exists(_) => PathState::Exists,
            Triage::Creatable(_) => PathState::AbsentCreatable,
            Triage::Invalid => PathState::AbsentInvalid,
        }
    }

    async fn triage(&self, path: &str) -> Triage {
        let Some(resolved) = path::resolve(&self.root, path) else {
            warn!(
                path,
                root = %self.root,
                "path does not resolve against root; treating as not found"
            );
            return Triage::Invalid;
        };

        match self.fs.exists(&resolved).await {
            Ok(true) => Triage::Exists(resolved),
            Ok(false) => match path::parent(&resolved) {
                None => Triage::Creatable(resolved),
                Some(parent) => match self.fs.exists(parent).await {
                    Ok(true) => Triage::Creatable(resolved),
                    Ok(false) => Triage::Invalid,
                    Err(err) => {
                        warn!(path, error = %err, "parent probe failed; treating as not found");
                        Triage::Invalid
                    }
                },
            },
            Err(err) => {
                warn!(path, error = %err, "existence probe failed; treating as not found");
                Triage::Invalid
            }
        }
    }

    /// Create a directory, including missing ancestors.
    ///
    /// Returns `true` on success. Fails with [`Error::AlreadyExists`] when
    /// the path is present, [`Error::NotFound`] when it does not resolve.
    pub async fn create_dir(&self, path: &str) -> Result<bool> {
        match self.triage(path).await {
            Triage::Creatable(target) => match self.fs.mkdirs(&target).await {
                Ok(created) => Ok(created),
                Err(err) => self.absorb_flag("mkdirs", path, err),
            },
            Triage::Exists(_) => Err(Error::AlreadyExists(path.to_string())),
            Triage::Invalid => Err(Error::NotFound(path.to_string())),
        }
    }

    /// Create a file holding the given text as its entire content.
    ///
    /// Same triage as [`DfsGateway::create_dir`].
    pub async fn create_file(&self, path: &str, text: &str) -> Result<bool> {
        match self.triage(path).await {
            Triage::Creatable(target) => match self.fs.create(&target, text.as_bytes()).await {
                Ok(()) => Ok(true),
                Err(err) => self.absorb_flag("create", path, err),
            },
            Triage::Exists(_) => Err(Error::AlreadyExists(path.to_string())),
            Triage::Invalid => Err(Error::NotFound(path.to_string())),
        }
    }

    /// Delete a file or directory, recursively.
    ///
    /// Fails with [`Error::NotFound`] unless the path exists.
    pub async fn delete(&self, path: &str) -> Result<bool> {
        match self.triage(path).await {
            Triage::Exists(target) => match self.fs.delete(&target, true).await {
                Ok(deleted) => Ok(deleted),
                Err(err) => self.absorb_flag("delete", path, err),
            },
            _ => Err(Error::NotFound(path.to_string())),
        }
    }

    /// Copy a local file into the remote namespace.
    ///
    /// Proceeds only when the source exists locally and the target is
    /// absent-but-creatable, or exists with `force` set. A missing source
    /// or unresolvable target fails with [`Error::NotFound`] before the
    /// existing-target case fails with [`Error::AlreadyExists`].
    pub async fn upload_file(
        &self,
        local_src: &Path,
        remote_target: &str,
        force: bool,
    ) -> Result<bool> {
        let src_exists = tokio::fs::try_exists(local_src).await.unwrap_or(false);
        let target = self.triage(remote_target).await;

        let remote = match (src_exists, target) {
            (true, Triage::Creatable(remote)) => remote,
            (true, Triage::Exists(remote)) if force => remote,
            (false, _) => return Err(Error::NotFound(local_src.display().to_string())),
            (true, Triage::Invalid) => return Err(Error::NotFound(remote_target.to_string())),
            (true, Triage::Exists(_)) => {
                return Err(Error::AlreadyExists(remote_target.to_string()));
            }
        };

        match self.fs.copy_from_local(local_src, &remote).await {
            Ok(()) => Ok(true),
            Err(err) => self.absorb_flag("copy_from_local", remote_target, err),
        }
    }

    /// Copy a remote file out to the local filesystem.
    ///
    /// Mirror of [`DfsGateway::upload_file`] with the roles reversed: the
    /// remote source must exist, and the local target must be absent or
    /// `force` set.
    pub async fn download_file(
        &self,
        remote_src: &str,
        local_target: &Path,
        force: bool,
    ) -> Result<bool> {
        let src = self.triage(remote_src).await;
        let target_exists = tokio::fs::try_exists(local_target).await.unwrap_or(false);

        let remote = match src {
            Triage::Exists(remote) if !target_exists || force => remote,
            Triage::Exists(_) => {
                return Err(Error::AlreadyExists(local_target.display().to_string()));
            }
            _ => return Err(Error::NotFound(remote_src.to_string())),
        };

        match self.fs.copy_to_local(&remote, local_target).await {
            Ok(()) => Ok(true),
            Err(err) => self.absorb_flag("copy_to_local", remote_src, err),
        }
    }

    /// Write a listing of a directory's immediate children to the sink,
    /// one line per entry. Fails with [`Error::NotFound`] unless the path
    /// exists.
    pub async fn list_dir<W>(&self, path: &str, out: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        match self.triage(path).await {
            Triage::Exists(target) => match self.emit_listing(&target, out).await {
                Ok(()) => Ok(()),
                Err(err) => self.absorb_report("list_status", path, err),
            },
            _ => Err(Error::NotFound(path.to_string())),
        }
    }

    /// Stream a file's raw bytes to the sink in fixed-size chunks. Fails
    /// with [`Error::NotFound`] unless the path exists.
    pub async fn view_text_file<W>(&self, path: &str, out: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        match self.triage(path).await {
            Triage::Exists(target) => match self.emit_content(&target, out).await {
                Ok(()) => Ok(()),
                Err(err) => self.absorb_report("open", path, err),
            },
            _ => Err(Error::NotFound(path.to_string())),
        }
    }

    async fn emit_listing<W>(&self, target: &str, out: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let mut statuses = self.fs.list_status(target).await?;
        statuses.sort_by(|a, b| a.path.cmp(&b.path));

        for status in &statuses {
            out.write_all(listing::format_status(status).as_bytes())
                .await?;
        }
        out.flush().await?;

        Ok(())
    }

    async fn emit_content<W>(&self, target: &str, out: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let content = self.fs.open(target).await?;

        for chunk in content.chunks(VIEW_CHUNK_SIZE) {
            out.write_all(chunk).await?;
        }
        out.flush().await?;

        Ok(())
    }

    /// Collapse an effect-stage failure into `Ok(false)`, or propagate it
    /// in strict mode.
    fn absorb_flag(&self, op: &'static str, path: &str, err: Error) -> Result<bool> {
        if self.strict_io {
            return Err(err);
        }
        error!(op, path, error = %err, "remote operation failed");
        Ok(false)
    }

    fn absorb_report(&self, op: &'static str, path: &str, err: Error) -> Result<()> {
        if self.strict_io {
            return Err(err);
        }
        error!(op, path, error = %err, "remote operation failed");
        Ok(())
    }
}

/// Builder for customized gateway construction.
///
/// Lets tests and embedders inject any [`RemoteFs`] implementation in
/// place of the scheme-selected backends.
#[derive(Default)]
pub struct GatewayBuilder {
    fs: Option<Arc<dyn RemoteFs>>,
    root: String,
    user: Option<String>,
    strict_io: bool,
}

impl GatewayBuilder {
    /// Set a custom remote filesystem client.
    pub fn fs(mut self, fs: Arc<dyn RemoteFs>) -> Self {
        self.fs = Some(fs);
        self
    }

    /// Set the root address relative paths are resolved against.
    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the identity operations run under.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Propagate effect-stage I/O failures instead of logging them and
    /// returning `false`.
    pub fn strict_io(mut self, strict: bool) -> Self {
        self.strict_io = strict;
        self
    }

    /// Build the gateway, defaulting to a fresh in-memory filesystem.
    pub fn build(self) -> DfsGateway {
        let user = self.user.unwrap_or_else(|| "root".to_string());
        let fs = self
            .fs
            .unwrap_or_else(|| Arc::new(InMemoryDfs::with_owner(&user)));

        DfsGateway {
            fs,
            root: self.root,
            user,
            strict_io: self.strict_io,
        }
    }
}

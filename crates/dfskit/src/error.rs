//! Error types for dfskit
//!
//! Operations draw a line between two failure tiers:
//! - precondition violations (the target's existence state contradicts the
//!   caller's intent) raise [`Error::NotFound`] or [`Error::AlreadyExists`];
//! - failures of the attempted effect itself are logged and collapsed into a
//!   `false` return, unless the gateway was built in strict mode.

use thiserror::Error;

/// Result type alias using dfskit's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Dfskit error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Target path, or an ancestor it needs, does not resolve.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Target path already resolves while the caller requires it not to.
    #[error("path already exists: {0}")]
    AlreadyExists(String),

    /// Root address could not be parsed, or the remote end could not be
    /// reached or authenticated. Fatal to gateway construction.
    #[error("connection error: {0}")]
    Connection(String),

    /// I/O error from filesystem operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure reported by a remote client implementation.
    #[error("remote error: {0}")]
    Remote(String),
}

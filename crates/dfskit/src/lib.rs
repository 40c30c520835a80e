//! Dfskit - path gateway over distributed-filesystem clients
//!
//! A small façade exposing directory creation, file creation, deletion,
//! upload, download, listing, and text-file viewing against a remote
//! filesystem, each guarded by a three-valued existence check. The remote
//! client is an injected trait object, so the same gateway runs against a
//! host directory, an in-memory filesystem, or any custom backend.
//!
//! # Example
//!
//! ```rust
//! use dfskit::DfsGateway;
//!
//! #[tokio::main]
//! async fn main() -> dfskit::Result<()> {
//!     let gateway = DfsGateway::builder().build();
//!
//!     assert!(gateway.create_dir("/data").await?);
//!     gateway.create_file("/data/hello.txt", "hello\n").await?;
//!
//!     let mut out = std::io::Cursor::new(Vec::new());
//!     gateway.view_text_file("/data/hello.txt", &mut out).await?;
//!     assert_eq!(out.into_inner(), b"hello\n");
//!     Ok(())
//! }
//! ```

mod error;
mod fs;
mod gateway;
mod listing;
mod path;

pub use error::{Error, Result};
pub use fs::{FileKind, FileStatus, InMemoryDfs, LocalDirFs, RemoteFs};
pub use gateway::{DfsGateway, GatewayBuilder, PathState};

// Re-exported so custom RemoteFs implementations don't need their own
// async-trait dependency.
pub use async_trait::async_trait;

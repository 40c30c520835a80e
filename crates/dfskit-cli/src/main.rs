//! Dfskit CLI - drive a path gateway from the command line
//!
//! Usage:
//!   dfskit --root file:///srv/dfs mkdir /data
//!   dfskit --root file:///srv/dfs create /data/a.txt 'hello'
//!   dfskit --root file:///srv/dfs put report.txt /data/report.txt --force
//!   dfskit --root file:///srv/dfs ls /data

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dfskit::DfsGateway;

/// Dfskit - path gateway over distributed-filesystem clients
#[derive(Parser, Debug)]
#[command(name = "dfskit")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root address of the remote filesystem (file:// or mem://)
    #[arg(long)]
    root: String,

    /// Identity to operate as
    #[arg(long, default_value = "root")]
    user: String,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Create a directory, including missing ancestors
    Mkdir { path: String },
    /// Create a text file with the given content
    Create { path: String, text: String },
    /// Delete a file or directory recursively
    Rm { path: String },
    /// Upload a local file into the remote namespace
    Put {
        src: PathBuf,
        dest: String,
        /// Overwrite an existing remote target
        #[arg(long)]
        force: bool,
    },
    /// Download a remote file to the local filesystem
    Get {
        src: String,
        dest: PathBuf,
        /// Overwrite an existing local target
        #[arg(long)]
        force: bool,
    },
    /// List a directory's immediate children
    Ls { path: String },
    /// Print a text file's contents
    Cat { path: String },
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    let gateway = DfsGateway::connect(&args.root, &args.user)
        .await
        .context("failed to open gateway")?;

    let ok = match args.command {
        Cmd::Mkdir { path } => gateway.create_dir(&path).await?,
        Cmd::Create { path, text } => gateway.create_file(&path, &text).await?,
        Cmd::Rm { path } => gateway.delete(&path).await?,
        Cmd::Put { src, dest, force } => gateway.upload_file(&src, &dest, force).await?,
        Cmd::Get { src, dest, force } => gateway.download_file(&src, &dest, force).await?,
        Cmd::Ls { path } => {
            let mut out = tokio::io::stdout();
            gateway.list_dir(&path, &mut out).await?;
            true
        }
        Cmd::Cat { path } => {
            let mut out = tokio::io::stdout();
            gateway.view_text_file(&path, &mut out).await?;
            true
        }
    };

    if !ok {
        eprintln!("dfskit: operation failed");
        std::process::exit(1);
    }

    Ok(())
}

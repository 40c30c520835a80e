//! End-to-end tests over a file:// root backed by a host directory.

use std::io::Cursor;

use dfskit::{DfsGateway, Error};

async fn connect(dir: &tempfile::TempDir) -> DfsGateway {
    let root = format!("file://{}", dir.path().display());
    DfsGateway::connect(&root, "root").await.unwrap()
}

#[tokio::test]
async fn full_round_trip_against_host_directory() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = connect(&dir).await;

    assert!(gateway.create_dir("/data").await.unwrap());
    assert!(dir.path().join("data").is_dir());

    assert!(gateway.create_file("/data/a.txt", "hello\n").await.unwrap());
    assert_eq!(
        std::fs::read(dir.path().join("data/a.txt")).unwrap(),
        b"hello\n"
    );

    let mut out = Cursor::new(Vec::new());
    gateway.view_text_file("/data/a.txt", &mut out).await.unwrap();
    assert_eq!(out.into_inner(), b"hello\n");

    let mut out = Cursor::new(Vec::new());
    gateway.list_dir("/data", &mut out).await.unwrap();
    let report = String::from_utf8(out.into_inner()).unwrap();
    assert!(report.contains("/data/a.txt"));
    assert!(report.starts_with('-'));

    assert!(gateway.delete("/data").await.unwrap());
    assert!(!dir.path().join("data").exists());
}

#[tokio::test]
async fn transfers_against_host_directory() {
    let dir = tempfile::tempdir().unwrap();
    let local = tempfile::tempdir().unwrap();
    let gateway = connect(&dir).await;

    let src = local.path().join("src.txt");
    tokio::fs::write(&src, b"payload").await.unwrap();

    assert!(gateway.upload_file(&src, "/up.txt", false).await.unwrap());
    assert!(matches!(
        gateway.upload_file(&src, "/up.txt", false).await,
        Err(Error::AlreadyExists(_))
    ));
    assert!(gateway.upload_file(&src, "/up.txt", true).await.unwrap());

    let dest = local.path().join("dest.txt");
    assert!(gateway.download_file("/up.txt", &dest, false).await.unwrap());
    assert_eq!(tokio::fs::read(&dest).await.unwrap(), b"payload");
}

#[tokio::test]
async fn connect_requires_reachable_root() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let root = format!("file://{}", missing.display());

    assert!(matches!(
        DfsGateway::connect(&root, "root").await,
        Err(Error::Connection(_))
    ));
}

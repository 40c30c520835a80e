//! Gateway behavior tests against the in-memory filesystem.

use std::io::Cursor;

use dfskit::{DfsGateway, Error, PathState};

fn gateway() -> DfsGateway {
    DfsGateway::builder().root("mem://gateway").build()
}

async fn view(gateway: &DfsGateway, path: &str) -> dfskit::Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    gateway.view_text_file(path, &mut out).await?;
    Ok(out.into_inner())
}

#[tokio::test]
async fn classify_never_created_paths() {
    let gateway = gateway();

    // Parent (the root) exists, so the path is safe to create.
    assert_eq!(
        gateway.classify_path("/fresh").await,
        PathState::AbsentCreatable
    );

    // Parent missing: not safe to create.
    assert_eq!(
        gateway.classify_path("/missing/child").await,
        PathState::AbsentInvalid
    );

    // Degraded resolutions never error.
    assert_eq!(gateway.classify_path("").await, PathState::AbsentInvalid);
    assert_eq!(
        gateway.classify_path("no-slash").await,
        PathState::AbsentInvalid
    );
}

#[tokio::test]
async fn create_dir_twice_fails_with_already_exists() {
    let gateway = gateway();

    assert!(gateway.create_dir("/test").await.unwrap());
    assert!(matches!(
        gateway.create_dir("/test").await,
        Err(Error::AlreadyExists(_))
    ));
}

#[tokio::test]
async fn create_dir_unresolvable_fails_with_not_found() {
    let gateway = gateway();

    assert!(matches!(
        gateway.create_dir("test").await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        gateway.create_dir("").await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn delete_twice_fails_with_not_found() {
    let gateway = gateway();

    gateway.create_file("/a.txt", "content").await.unwrap();

    assert!(gateway.delete("/a.txt").await.unwrap());
    assert!(matches!(
        gateway.delete("/a.txt").await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn delete_directory_is_recursive() {
    let gateway = gateway();

    gateway.create_dir("/dir/sub").await.unwrap();
    gateway.create_file("/dir/sub/a.txt", "x").await.unwrap();

    assert!(gateway.delete("/dir").await.unwrap());
    assert_eq!(
        gateway.classify_path("/dir").await,
        PathState::AbsentCreatable
    );
}

#[tokio::test]
async fn upload_missing_source_fails_regardless_of_force() {
    let gateway = gateway();
    let local = tempfile::tempdir().unwrap();
    let missing = local.path().join("missing.txt");

    assert!(matches!(
        gateway.upload_file(&missing, "/target.txt", false).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        gateway.upload_file(&missing, "/target.txt", true).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn upload_force_flag_controls_overwrite() {
    let gateway = gateway();
    let local = tempfile::tempdir().unwrap();
    let src = local.path().join("src.txt");

    tokio::fs::write(&src, b"one").await.unwrap();
    assert!(gateway.upload_file(&src, "/target.txt", false).await.unwrap());
    assert_eq!(view(&gateway, "/target.txt").await.unwrap(), b"one");

    tokio::fs::write(&src, b"two").await.unwrap();
    assert!(matches!(
        gateway.upload_file(&src, "/target.txt", false).await,
        Err(Error::AlreadyExists(_))
    ));

    assert!(gateway.upload_file(&src, "/target.txt", true).await.unwrap());
    assert_eq!(view(&gateway, "/target.txt").await.unwrap(), b"two");
}

#[tokio::test]
async fn upload_unresolvable_target_fails_with_not_found() {
    let gateway = gateway();
    let local = tempfile::tempdir().unwrap();
    let src = local.path().join("src.txt");
    tokio::fs::write(&src, b"content").await.unwrap();

    assert!(matches!(
        gateway.upload_file(&src, "/missing/deep.txt", false).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        gateway.upload_file(&src, "no-slash", true).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn download_mirrors_upload_preconditions() {
    let gateway = gateway();
    let local = tempfile::tempdir().unwrap();
    let dest = local.path().join("dest.txt");

    gateway.create_file("/src.txt", "payload").await.unwrap();

    assert!(gateway.download_file("/src.txt", &dest, false).await.unwrap());
    assert_eq!(tokio::fs::read(&dest).await.unwrap(), b"payload");

    // Existing local target: force required.
    assert!(matches!(
        gateway.download_file("/src.txt", &dest, false).await,
        Err(Error::AlreadyExists(_))
    ));
    assert!(gateway.download_file("/src.txt", &dest, true).await.unwrap());

    // Missing remote source wins over the existing local target.
    assert!(matches!(
        gateway.download_file("/gone.txt", &dest, false).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn scenario_create_view_delete() {
    let gateway = gateway();

    assert!(gateway.create_dir("/test").await.unwrap());
    assert!(matches!(
        gateway.create_dir("/test").await,
        Err(Error::AlreadyExists(_))
    ));

    assert!(gateway.create_file("/test/a.txt", "hello").await.unwrap());
    assert_eq!(view(&gateway, "/test/a.txt").await.unwrap(), b"hello");

    assert!(gateway.delete("/test/a.txt").await.unwrap());
    assert!(matches!(
        view(&gateway, "/test/a.txt").await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn create_file_on_existing_path_fails_with_already_exists() {
    let gateway = gateway();

    gateway.create_file("/a.txt", "one").await.unwrap();
    assert!(matches!(
        gateway.create_file("/a.txt", "two").await,
        Err(Error::AlreadyExists(_))
    ));
    assert_eq!(view(&gateway, "/a.txt").await.unwrap(), b"one");
}

#[tokio::test]
async fn view_streams_content_larger_than_one_chunk() {
    let gateway = gateway();
    let text = "x".repeat(3000);

    gateway.create_file("/big.txt", &text).await.unwrap();
    assert_eq!(view(&gateway, "/big.txt").await.unwrap(), text.as_bytes());
}

#[tokio::test]
async fn list_dir_reports_children_sorted() {
    let gateway = gateway();

    gateway.create_dir("/dir/sub").await.unwrap();
    gateway.create_file("/dir/a.txt", "content").await.unwrap();

    let mut out = Cursor::new(Vec::new());
    gateway.list_dir("/dir", &mut out).await.unwrap();

    let report = String::from_utf8(out.into_inner()).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 2);

    assert!(lines[0].starts_with("-rw-r--r-- root supergroup "));
    assert!(lines[0].ends_with(" /dir/a.txt"));
    assert!(lines[1].starts_with("drwxr-xr-x root supergroup "));
    assert!(lines[1].ends_with(" /dir/sub"));
}

#[tokio::test]
async fn list_dir_missing_path_fails_with_not_found() {
    let gateway = gateway();

    let mut out = Cursor::new(Vec::new());
    assert!(matches!(
        gateway.list_dir("/missing", &mut out).await,
        Err(Error::NotFound(_))
    ));
    assert!(out.into_inner().is_empty());
}

use std::fs::write;
use std::sync::{Arc, Mutex};

use clap::Parser;
use s3_uploader::cli::{execute, Cli};
use s3_uploader_core::contract::{MockObjectStore, ObjectUpload};
use tempfile::{tempdir, NamedTempFile};

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["s3-uploader"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("valid arguments")
}

#[tokio::test]
async fn uploads_every_accepted_file_with_bucket_and_key() {
    let dir = tempdir().unwrap();
    write(dir.path().join("a.py"), b"").unwrap();
    write(dir.path().join("b.jpg"), b"").unwrap();
    write(dir.path().join("c.txt"), b"").unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let mut store = MockObjectStore::new();
    store
        .expect_upload()
        .times(2)
        .returning(move |req: ObjectUpload<'_>| {
            recorder.lock().unwrap().push((
                req.bucket.to_string(),
                req.key.to_string(),
                req.content_type.map(str::to_string),
            ));
            Ok(())
        });

    let dir_arg = dir.path().to_string_lossy().into_owned();
    let cli = cli(&["-b", "target", "-d", &dir_arg]);
    let summary = execute(&cli, Arc::new(store)).await.expect("run succeeds");

    assert_eq!(summary.uploaded, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            (
                "target".to_string(),
                "python/a.py".to_string(),
                Some("text/x-python".to_string())
            ),
            (
                "target".to_string(),
                "pictures/b.jpg".to_string(),
                Some("image/jpeg".to_string())
            ),
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn upload_failures_do_not_fail_the_run() {
    let dir = tempdir().unwrap();
    for name in ["a.py", "b.py", "c.py", "d.png"] {
        write(dir.path().join(name), b"").unwrap();
    }

    let mut store = MockObjectStore::new();
    store
        .expect_upload()
        .times(4)
        .returning(|req: ObjectUpload<'_>| {
            if req.key.ends_with("b.py") {
                Err("network unreachable".into())
            } else {
                Ok(())
            }
        });

    let dir_arg = dir.path().to_string_lossy().into_owned();
    let cli = cli(&["-d", &dir_arg, "-w", "3"]);
    let summary = execute(&cli, Arc::new(store)).await.expect("run succeeds");

    assert_eq!(summary.uploaded, 3);
    assert_eq!(summary.failed, 1);
}

#[tokio::test]
async fn bad_mapping_aborts_before_any_upload() {
    let dir = tempdir().unwrap();
    write(dir.path().join("a.py"), b"").unwrap();
    let map = NamedTempFile::new().unwrap();
    write(map.path(), b"not json").unwrap();

    let mut store = MockObjectStore::new();
    store.expect_upload().times(0);

    let dir_arg = dir.path().to_string_lossy().into_owned();
    let map_arg = map.path().to_string_lossy().into_owned();
    let cli = cli(&["-d", &dir_arg, "-m", &map_arg]);
    assert!(execute(&cli, Arc::new(store)).await.is_err());
}

#[tokio::test]
async fn missing_root_aborts_before_any_upload() {
    let dir = tempdir().unwrap();
    let mut store = MockObjectStore::new();
    store.expect_upload().times(0);

    let missing = dir.path().join("missing").to_string_lossy().into_owned();
    let cli = cli(&["-d", &missing]);
    let err = execute(&cli, Arc::new(store)).await.unwrap_err();
    assert!(format!("{err:#}").contains("does not exist"));
}

#[test]
fn flags_parse_with_short_and_long_forms() {
    let cli = cli(&[
        "-b", "bucket-x", "-d", "/data", "-r", "-m", "map.json", "-w", "8", "--dry-run",
    ]);
    assert_eq!(cli.bucket, "bucket-x");
    assert_eq!(cli.dir, std::path::PathBuf::from("/data"));
    assert!(cli.recursive);
    assert!(cli.dry_run);
    assert_eq!(cli.workers, 8);
    assert_eq!(cli.map, Some(std::path::PathBuf::from("map.json")));
}

#[test]
fn defaults_match_documented_values() {
    let cli = cli(&[]);
    assert_eq!(cli.bucket, "my-s3-uploader-test");
    assert_eq!(cli.dir, std::path::PathBuf::from("."));
    assert_eq!(cli.workers, 1);
    assert!(!cli.recursive);
    assert!(!cli.dry_run);
    assert!(cli.map.is_none());
}

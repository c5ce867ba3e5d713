use std::fs::{create_dir_all, write};
use std::path::{Path, PathBuf};

use s3_uploader_core::classify::ExtensionMapping;
use s3_uploader_core::plan::{plan_uploads, PlanConfig, PlanError};
use s3_uploader_core::walk::WalkOptions;
use tempfile::tempdir;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        create_dir_all(parent).unwrap();
    }
    write(path, b"x").unwrap();
}

fn config(root: PathBuf, recursive: bool, mapping: Option<ExtensionMapping>) -> PlanConfig {
    PlanConfig {
        root,
        bucket: "test-bucket".to_string(),
        walk: WalkOptions {
            recursive,
            skip_file_name: None,
        },
        mapping,
    }
}

fn keys(config: &PlanConfig) -> Vec<String> {
    let mut keys: Vec<String> = plan_uploads(config)
        .expect("root exists")
        .map(|task| task.destination_key().to_string())
        .collect();
    keys.sort();
    keys
}

#[test]
fn flat_mode_classifies_and_queues_files() {
    let tmp = tempdir().unwrap();
    touch(tmp.path(), "script.py");
    touch(tmp.path(), "photo.JPG");
    touch(tmp.path(), "notes.txt");
    touch(tmp.path(), "sub/nested.py");

    let cfg = config(tmp.path().to_path_buf(), false, None);
    assert_eq!(keys(&cfg), vec!["pictures/photo.JPG", "python/script.py"]);
}

#[test]
fn recursive_mode_keeps_relative_directories_in_key() {
    let tmp = tempdir().unwrap();
    touch(tmp.path(), "sub/dir/script.py");
    touch(tmp.path(), "__pycache__/cached.py");

    let cfg = config(tmp.path().to_path_buf(), true, None);
    assert_eq!(keys(&cfg), vec!["python/sub/dir/script.py"]);
}

#[test]
fn tasks_carry_bucket_and_paths() {
    let tmp = tempdir().unwrap();
    touch(tmp.path(), "a/b.png");

    let cfg = config(tmp.path().to_path_buf(), true, None);
    let tasks: Vec<_> = plan_uploads(&cfg).unwrap().collect();
    assert_eq!(tasks.len(), 1);
    let task = &tasks[0];
    assert_eq!(task.bucket(), "test-bucket");
    assert_eq!(task.source_path(), tmp.path().join("a").join("b.png"));
    assert_eq!(task.relative_path(), Path::new("a").join("b.png"));
    assert_eq!(task.destination_key(), "pictures/a/b.png");
}

#[test]
fn user_mapping_adds_and_overrides_prefixes() {
    let tmp = tempdir().unwrap();
    touch(tmp.path(), "a.py");
    touch(tmp.path(), "b.txt");
    touch(tmp.path(), "c.png");

    let mapping: ExtensionMapping = [("py", "code/"), (".txt", "text")].into_iter().collect();
    let cfg = config(tmp.path().to_path_buf(), false, Some(mapping));
    assert_eq!(keys(&cfg), vec!["code/a.py", "pictures/c.png", "text/b.txt"]);
}

#[test]
fn missing_root_is_an_error() {
    let tmp = tempdir().unwrap();
    let cfg = config(tmp.path().join("does-not-exist"), false, None);
    let result = plan_uploads(&cfg);
    match result {
        Err(PlanError::RootNotFound(path)) => assert!(path.ends_with("does-not-exist")),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected an error for a missing root"),
    }
}

#[test]
fn file_root_is_an_error() {
    let tmp = tempdir().unwrap();
    touch(tmp.path(), "file.py");
    let cfg = config(tmp.path().join("file.py"), false, None);
    assert!(matches!(
        plan_uploads(&cfg),
        Err(PlanError::RootNotDirectory(_))
    ));
}

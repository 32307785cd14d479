use std::fs;

use blog_core::ContentRecord;
use blog_engine::{ensure_output_dir, AtomicFileWriter, PersistError, PostStore, PostsDocument};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("index.html", "hello").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write("index.html", "world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
}

#[test]
fn writing_into_a_file_path_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("index.html", "data");
    assert!(matches!(result, Err(PersistError::OutputDir(_))));
    assert!(!file_path.with_file_name("index.html").exists());
}

#[test]
fn posts_document_round_trips_through_disk() {
    let temp = TempDir::new().unwrap();
    let store = PostStore::new(temp.path());
    let document = PostsDocument {
        last_updated: Some("2024-01-01T00:00:00Z".to_string()),
        posts: vec![ContentRecord::new("a")
            .with_title("제목")
            .with_body("**hi**")
            .with_date("2024-01-01")
            .with_tags(["x", "x"])
            .with_published(true)],
    };

    let path = store.save(&document).unwrap();
    assert_eq!(path, store.path());
    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"lastUpdated\""));
    assert!(raw.contains("\"content\": \"**hi**\""));

    assert_eq!(store.load().unwrap(), document);
}

#[test]
fn loading_a_bare_list_document() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("posts.json"),
        r#"[{"Id": "x", "Title": "T", "Published": 1}]"#,
    )
    .unwrap();
    let document = PostStore::new(temp.path()).load().unwrap();
    assert_eq!(document.last_updated, None);
    assert_eq!(document.posts[0].title, "T");
    assert!(document.posts[0].published);
}

#[test]
fn loading_a_missing_document_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    let err = PostStore::new(temp.path()).load().unwrap_err();
    assert!(matches!(err, PersistError::Io(_)));
}

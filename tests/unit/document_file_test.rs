//! Unit tests for `DocumentFile`: seeding, round-trips and failure reporting.

use chrono::Utc;
use tempfile::TempDir;

use linkshelf::store::DocumentFile;
use linkshelf::types::errors::StoreError;
use linkshelf::types::link::{Collection, Document, LinkItem};

fn seed() -> Vec<Collection> {
    vec![Collection::new("col-inbox", "Inbox")]
}

fn sample_link(id: &str) -> LinkItem {
    LinkItem {
        id: id.to_string(),
        url: format!("https://{}.example", id),
        title: Some("Example".to_string()),
        description: None,
        tags: vec!["a".to_string()],
        collection_id: "col-inbox".to_string(),
        is_read: false,
        date_saved: Utc::now(),
        preview_image_url: None,
    }
}

#[tokio::test]
async fn test_missing_file_loads_seed_without_writing() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("dataStore.json");
    let file = DocumentFile::new(&path, seed());

    let doc = file.load().await.unwrap();
    assert_eq!(doc.collections, seed());
    assert!(doc.links.is_empty());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_ensure_exists_writes_seed_once() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("dataStore.json");
    let file = DocumentFile::new(&path, seed());

    file.ensure_exists().await.unwrap();
    assert!(path.exists());

    let mut doc = file.load().await.unwrap();
    doc.links.push(sample_link("lk-1"));
    file.save(&doc).await.unwrap();

    // A second call must not clobber existing data.
    file.ensure_exists().await.unwrap();
    assert_eq!(file.load().await.unwrap().links.len(), 1);
}

#[tokio::test]
async fn test_save_is_pretty_printed_with_top_level_keys() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("dataStore.json");
    let file = DocumentFile::new(&path, seed());

    let mut doc = Document::with_collections(seed());
    doc.links.push(sample_link("lk-1"));
    file.save(&doc).await.unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains('\n'));
    let raw: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(raw["collections"].is_array());
    assert_eq!(raw["links"][0]["id"], "lk-1");
    assert_eq!(raw["links"][0]["is_read"], false);
    assert!(raw["links"][0]["date_saved"].is_string());

    assert_eq!(file.load().await.unwrap(), doc);
    assert!(!tmp.path().join("dataStore.json.tmp").exists());
}

#[tokio::test]
async fn test_legacy_document_with_missing_optional_fields_loads() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("dataStore.json");
    std::fs::write(
        &path,
        r#"{
  "collections": [{"id": "col-inbox", "name": "Inbox"}],
  "links": [{
    "id": "lk-1700000000000-ab12",
    "url": "https://reactjs.org",
    "collection_id": "col-inbox",
    "date_saved": "2024-03-01T12:00:00.000Z"
  }]
}"#,
    )
    .unwrap();

    let doc = DocumentFile::new(&path, vec![]).load().await.unwrap();
    let link = &doc.links[0];
    assert_eq!(link.id, "lk-1700000000000-ab12");
    assert!(link.tags.is_empty());
    assert!(!link.is_read);
    assert_eq!(link.preview_image_url, None);
}

#[tokio::test]
async fn test_malformed_file_is_serialization_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("dataStore.json");
    std::fs::write(&path, "[1, 2").unwrap();

    let result = DocumentFile::new(&path, seed()).load().await;
    assert!(matches!(result, Err(StoreError::Serialization(_))));
}

#[tokio::test]
async fn test_directory_in_place_of_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("dataStore.json");
    std::fs::create_dir(&path).unwrap();

    let result = DocumentFile::new(&path, seed()).load().await;
    assert!(matches!(result, Err(StoreError::Io(_))));
}

#[tokio::test]
async fn test_record_without_collection_loads() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("dataStore.json");
    std::fs::write(
        &path,
        r#"{"links":[
  {"id":"lk-1-ab","url":"https://a.com","tags":["x"],"is_read":false,"date_saved":"2024-03-01T12:00:00.000Z"},
  {"id":"lk-2-cd","url":"https://b.com","collectionId":"col-inbox","date_saved":"2024-03-02T12:00:00.000Z"}
]}"#,
    )
    .unwrap();

    let doc = DocumentFile::new(&path, seed()).load().await.unwrap();
    assert!(doc.collections.is_empty());
    assert_eq!(doc.links.len(), 2);
    assert_eq!(doc.links[0].collection_id, "");
    assert_eq!(doc.links[0].tags, vec!["x"]);
    assert_eq!(doc.links[1].collection_id, "col-inbox");
}

#[tokio::test]
async fn test_failed_write_is_io_error_and_keeps_old_document() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("dataStore.json");
    let file = DocumentFile::new(&path, seed());
    file.ensure_exists().await.unwrap();

    // The temp file slot is taken by a directory, so the write itself fails.
    std::fs::create_dir(tmp.path().join("dataStore.json.tmp")).unwrap();
    let mut doc = file.load().await.unwrap();
    doc.links.push(sample_link("lk-1"));

    assert!(matches!(file.save(&doc).await, Err(StoreError::Io(_))));
    assert!(file.load().await.unwrap().links.is_empty());
}

#[tokio::test]
async fn test_path_under_a_regular_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let file = DocumentFile::new(blocker.join("dataStore.json"), seed());

    assert!(matches!(file.ensure_exists().await, Err(StoreError::Io(_))));
    assert!(matches!(file.load().await, Err(StoreError::Io(_))));
    assert!(matches!(
        file.save(&Document::with_collections(seed())).await,
        Err(StoreError::Io(_))
    ));
    assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "not a directory");
}

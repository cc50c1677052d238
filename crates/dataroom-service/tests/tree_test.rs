//! End-to-end tests for the virtual folder tree over the in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use dataroom_core::error::ErrorKind;
use dataroom_core::result::AppResult;
use dataroom_core::traits::storage::{ListOptions, ObjectEntry, ObjectStore};
use dataroom_core::types::pagination::PageRequest;
use dataroom_core::types::sorting::{SortColumn, SortDirection};
use dataroom_entity::entry::EntryKind;
use dataroom_service::tree::{RoomRoot, TreeService};
use dataroom_storage::MemoryObjectStore;
use uuid::Uuid;

fn room_root() -> RoomRoot {
    RoomRoot::new(Uuid::new_v4(), Uuid::new_v4())
}

fn service(store: Arc<dyn ObjectStore>) -> TreeService {
    TreeService::new(store)
}

async fn seed_pdf(store: &MemoryObjectStore, key: &str) {
    store
        .upload(key, Bytes::from_static(b"%PDF-1.7"), Some("application/pdf"))
        .await
        .unwrap();
}

async fn seed_marker(store: &MemoryObjectStore, folder_prefix: &str) {
    store
        .upload(
            &format!("{folder_prefix}/.keep"),
            Bytes::new(),
            Some("text/plain"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn upload_then_browse_round_trip() {
    let store = Arc::new(MemoryObjectStore::new());
    let tree = service(store.clone());
    let root = room_root();

    let stored_name = tree
        .upload_file(&root, "", "contract.pdf", Bytes::from_static(b"%PDF-1.7"))
        .await
        .unwrap();
    assert!(stored_name.ends_with("_contract.pdf"));

    let page = tree
        .browse(
            &root,
            "",
            SortColumn::Name,
            SortDirection::Asc,
            &PageRequest::default(),
        )
        .await;
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].name, stored_name);
    assert_eq!(page.items[0].kind, EntryKind::File);
}

#[tokio::test]
async fn non_pdf_upload_is_rejected_before_any_storage_call() {
    let store = Arc::new(MemoryObjectStore::new());
    let tree = service(store.clone());
    let root = room_root();

    let err = tree
        .upload_file(&root, "", "malware.exe", Bytes::from_static(b"MZ"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(store.object_count().await, 0);
}

#[tokio::test]
async fn empty_folder_name_is_rejected() {
    let store = Arc::new(MemoryObjectStore::new());
    let tree = service(store.clone());
    let root = room_root();

    let err = tree.create_folder(&root, "", "   ").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(store.object_count().await, 0);
}

#[tokio::test]
async fn created_folder_is_listable_but_its_marker_is_not() {
    let store = Arc::new(MemoryObjectStore::new());
    let tree = service(store.clone());
    let root = room_root();

    tree.create_folder(&root, "", "exhibits").await.unwrap();

    let page = tree
        .browse(
            &root,
            "",
            SortColumn::Name,
            SortDirection::Asc,
            &PageRequest::default(),
        )
        .await;
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].name, "exhibits");
    assert_eq!(page.items[0].kind, EntryKind::Folder);

    let inside = tree
        .browse(
            &root,
            "exhibits",
            SortColumn::Name,
            SortDirection::Asc,
            &PageRequest::default(),
        )
        .await;
    assert_eq!(inside.total_items, 0);
}

#[tokio::test]
async fn archive_of_marker_only_folder_is_empty() {
    let store = Arc::new(MemoryObjectStore::new());
    let tree = service(store.clone());
    let root = room_root();

    tree.upload_file(&root, "", "contract.pdf", Bytes::from_static(b"%PDF-1.7"))
        .await
        .unwrap();
    tree.create_folder(&root, "", "exhibits").await.unwrap();

    let bytes = tree.archive_folder(&root, "", "exhibits").await.unwrap();
    let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    assert_eq!(archive.len(), 0);
}

#[tokio::test]
async fn folder_delete_removes_whole_subtree() {
    let store = Arc::new(MemoryObjectStore::new());
    let tree = service(store.clone());
    let root = room_root();
    let base = root.prefix("");

    seed_pdf(&store, &format!("{base}/docs/a.pdf")).await;
    seed_marker(&store, &format!("{base}/docs/sub")).await;
    seed_pdf(&store, &format!("{base}/docs/sub/b.pdf")).await;
    seed_pdf(&store, &format!("{base}/keep-me.pdf")).await;

    let removed = tree.delete_folder(&root, "", "docs").await.unwrap();
    assert_eq!(removed, 3);
    assert_eq!(store.object_count().await, 1);
    assert!(store.contains(&format!("{base}/keep-me.pdf")).await);
}

#[tokio::test]
async fn folder_rename_moves_nested_descendants() {
    let store = Arc::new(MemoryObjectStore::new());
    let tree = service(store.clone());
    let root = room_root();
    let base = root.prefix("");

    seed_pdf(&store, &format!("{base}/docs/a.pdf")).await;
    seed_pdf(&store, &format!("{base}/docs/sub/deep/b.pdf")).await;

    let moved = tree.rename_folder(&root, "", "docs", "papers").await.unwrap();
    assert_eq!(moved, 2);
    assert!(store.contains(&format!("{base}/papers/a.pdf")).await);
    assert!(
        store
            .contains(&format!("{base}/papers/sub/deep/b.pdf"))
            .await
    );
    assert!(!store.contains(&format!("{base}/docs/a.pdf")).await);
}

#[tokio::test]
async fn unchanged_rename_target_is_rejected() {
    let store = Arc::new(MemoryObjectStore::new());
    let tree = service(store.clone());
    let root = room_root();

    let err = tree
        .rename_file(&root, "", "a.pdf", "a.pdf")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = tree.rename_file(&root, "", "a.pdf", "  ").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn bulk_delete_removes_every_selected_entry() {
    let store = Arc::new(MemoryObjectStore::new());
    let tree = service(store.clone());
    let root = room_root();
    let base = root.prefix("");

    seed_pdf(&store, &format!("{base}/a.pdf")).await;
    seed_pdf(&store, &format!("{base}/b.pdf")).await;
    seed_pdf(&store, &format!("{base}/folder/c.pdf")).await;

    let selection = vec!["a.pdf".to_string(), "folder".to_string()];
    let outcome = tree.bulk_delete(&root, "", &selection).await.unwrap();

    assert!(outcome.is_complete());
    assert_eq!(outcome.succeeded, selection);
    assert_eq!(store.object_count().await, 1);
    assert!(store.contains(&format!("{base}/b.pdf")).await);
}

#[tokio::test]
async fn bulk_delete_of_absent_name_does_not_fail() {
    let store = Arc::new(MemoryObjectStore::new());
    let tree = service(store.clone());
    let root = room_root();

    let selection = vec!["never-existed.pdf".to_string()];
    let outcome = tree.bulk_delete(&root, "", &selection).await.unwrap();
    assert!(outcome.is_complete());
    assert_eq!(outcome.succeeded, selection);
}

#[tokio::test]
async fn bulk_delete_continues_past_a_failing_item() {
    let inner = Arc::new(MemoryObjectStore::new());
    let root = room_root();
    let base = root.prefix("");
    seed_pdf(&inner, &format!("{base}/a.pdf")).await;
    seed_pdf(&inner, &format!("{base}/b.pdf")).await;

    let store = Arc::new(FailingRemoves {
        inner: inner.clone(),
        poisoned: "a.pdf".to_string(),
    });
    let tree = service(store);

    let selection = vec!["a.pdf".to_string(), "b.pdf".to_string()];
    let outcome = tree.bulk_delete(&root, "", &selection).await.unwrap();

    assert_eq!(outcome.succeeded, vec!["b.pdf".to_string()]);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].name, "a.pdf");
    assert!(!inner.contains(&format!("{base}/b.pdf")).await);
    assert!(inner.contains(&format!("{base}/a.pdf")).await);
}

#[tokio::test]
async fn bulk_archive_mixes_files_and_folder_subtrees() {
    let store = Arc::new(MemoryObjectStore::new());
    let tree = service(store.clone());
    let root = room_root();
    let base = root.prefix("");

    seed_pdf(&store, &format!("{base}/summary.pdf")).await;
    seed_pdf(&store, &format!("{base}/exhibits/one.pdf")).await;
    seed_pdf(&store, &format!("{base}/exhibits/annex/two.pdf")).await;

    let selection = vec!["summary.pdf".to_string(), "exhibits".to_string()];
    let bytes = tree.bulk_archive(&root, "", &selection).await.unwrap();

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let mut paths: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    paths.sort();
    assert_eq!(
        paths,
        vec![
            "exhibits/annex/two.pdf".to_string(),
            "exhibits/one.pdf".to_string(),
            "summary.pdf".to_string(),
        ]
    );
}

#[tokio::test]
async fn browse_places_folders_first_and_paginates() {
    let store = Arc::new(MemoryObjectStore::new());
    let tree = service(store.clone());
    let root = room_root();
    let base = root.prefix("");

    for i in 0..30 {
        seed_pdf(&store, &format!("{base}/file-{i:02}.pdf")).await;
    }
    seed_marker(&store, &format!("{base}/zz-folder")).await;

    let page = tree
        .browse(
            &root,
            "",
            SortColumn::Name,
            SortDirection::Asc,
            &PageRequest::default(),
        )
        .await;
    assert_eq!(page.total_items, 31);
    assert_eq!(page.items.len(), 25);
    assert_eq!(page.items[0].name, "zz-folder");
    assert!(page.items[0].is_folder());
    assert_eq!(page.items[1].name, "file-00.pdf");
}

/// Store wrapper whose `remove` fails whenever the batch touches a key
/// containing the poisoned fragment.
#[derive(Debug)]
struct FailingRemoves {
    inner: Arc<MemoryObjectStore>,
    poisoned: String,
}

#[async_trait]
impl ObjectStore for FailingRemoves {
    fn provider_type(&self) -> &str {
        "failing"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn list(&self, prefix: &str, options: &ListOptions) -> AppResult<Vec<ObjectEntry>> {
        self.inner.list(prefix, options).await
    }

    async fn upload(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()> {
        self.inner.upload(key, data, content_type).await
    }

    async fn download(&self, key: &str) -> AppResult<Bytes> {
        self.inner.download(key).await
    }

    async fn remove(&self, keys: &[String]) -> AppResult<()> {
        if keys.iter().any(|k| k.contains(&self.poisoned)) {
            return Err(dataroom_core::error::AppError::storage(
                "simulated backend error",
            ));
        }
        self.inner.remove(keys).await
    }

    async fn move_object(&self, from: &str, to: &str) -> AppResult<()> {
        self.inner.move_object(from, to).await
    }
}

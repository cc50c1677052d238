//! Recursive folder walker.
//!
//! Enumerates every descendant object key of a folder prefix using the
//! one-level `list` primitive. Runs as an explicit worklist of prefixes
//! rather than recursive awaiting; there is no cycle risk (prefixes cannot
//! self-reference) and no depth bound. Each level costs one listing
//! round-trip, capped at the listing page size — a folder with more direct
//! children than that will only enumerate the first page.

use dataroom_core::result::AppResult;
use dataroom_core::traits::storage::{ListOptions, ObjectStore};

use super::path;

/// Collect the absolute keys of every object under a folder prefix,
/// markers included.
///
/// Any listing error aborts the whole walk and propagates; no partial
/// result is returned.
pub async fn collect_descendants(
    store: &dyn ObjectStore,
    folder_prefix: &str,
) -> AppResult<Vec<String>> {
    let mut keys = Vec::new();
    let mut worklist = vec![folder_prefix.to_string()];

    while let Some(prefix) = worklist.pop() {
        let entries = store.list(&prefix, &ListOptions::default()).await?;
        for entry in entries {
            let key = path::join(&prefix, &entry.name);
            if entry.is_folder() {
                worklist.push(key);
            } else {
                keys.push(key);
            }
        }
    }

    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use dataroom_core::traits::storage::{MARKER_OBJECT, ObjectStore};
    use dataroom_storage::MemoryObjectStore;

    async fn seed(store: &MemoryObjectStore, keys: &[(&str, Option<&str>)]) {
        for (key, mime) in keys {
            store
                .upload(key, Bytes::from_static(b"x"), *mime)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn marker_only_folder_yields_exactly_the_marker_key() {
        let store = MemoryObjectStore::new();
        seed(&store, &[("u/r/exhibits/.keep", Some("text/plain"))]).await;

        let keys = collect_descendants(&store, "u/r/exhibits").await.unwrap();
        assert_eq!(keys, vec![format!("u/r/exhibits/{MARKER_OBJECT}")]);
    }

    #[tokio::test]
    async fn walks_nested_folders() {
        let store = MemoryObjectStore::new();
        seed(
            &store,
            &[
                ("u/r/docs/a.pdf", Some("application/pdf")),
                ("u/r/docs/sub/.keep", Some("text/plain")),
                ("u/r/docs/sub/deep/b.pdf", Some("application/pdf")),
            ],
        )
        .await;

        let mut keys = collect_descendants(&store, "u/r/docs").await.unwrap();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "u/r/docs/a.pdf".to_string(),
                "u/r/docs/sub/.keep".to_string(),
                "u/r/docs/sub/deep/b.pdf".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn empty_prefix_yields_no_keys() {
        let store = MemoryObjectStore::new();
        let keys = collect_descendants(&store, "u/r/nothing").await.unwrap();
        assert!(keys.is_empty());
    }
}

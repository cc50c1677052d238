//! In-memory object store.
//!
//! Backs development and tests with the exact flat-keyspace semantics of the
//! production bucket: keys are opaque strings, `list` returns one level of
//! direct children, and folder entries are synthesized from deeper keys.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_core::traits::storage::{ListOptions, ObjectEntry, ObjectStore};
use dataroom_core::types::sorting::SortDirection;

/// One stored object.
#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    content_type: Option<String>,
    created_at: DateTime<Utc>,
}

/// In-memory object store over a sorted key map.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: RwLock<BTreeMap<String, StoredObject>>,
}

impl MemoryObjectStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects currently stored.
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Whether an object exists at the given key.
    pub async fn contains(&self, key: &str) -> bool {
        self.objects.read().await.contains_key(key)
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn list(&self, prefix: &str, options: &ListOptions) -> AppResult<Vec<ObjectEntry>> {
        let objects = self.objects.read().await;
        let prefix = prefix.trim_end_matches('/');

        // Direct objects win over a folder synthesized from deeper keys of
        // the same name.
        let mut files: BTreeMap<String, ObjectEntry> = BTreeMap::new();
        let mut folders: BTreeMap<String, ObjectEntry> = BTreeMap::new();

        for (key, object) in objects.iter() {
            let remainder = if prefix.is_empty() {
                key.as_str()
            } else {
                match key.strip_prefix(prefix).and_then(|r| r.strip_prefix('/')) {
                    Some(r) => r,
                    None => continue,
                }
            };

            match remainder.split_once('/') {
                Some((segment, _)) => {
                    folders.entry(segment.to_string()).or_insert(ObjectEntry {
                        name: segment.to_string(),
                        size: None,
                        created_at: None,
                        mime_type: None,
                    });
                }
                None => {
                    files.insert(
                        remainder.to_string(),
                        ObjectEntry {
                            name: remainder.to_string(),
                            size: Some(object.data.len() as u64),
                            created_at: Some(object.created_at),
                            mime_type: object.content_type.clone(),
                        },
                    );
                }
            }
        }

        for (name, entry) in folders {
            files.entry(name).or_insert(entry);
        }

        let mut entries: Vec<ObjectEntry> = files.into_values().collect();
        if options.sort == SortDirection::Desc {
            entries.reverse();
        }
        entries.truncate(options.limit);
        Ok(entries)
    }

    async fn upload(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()> {
        let mut objects = self.objects.write().await;
        debug!(key, bytes = data.len(), "Stored object");
        objects.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.map(String::from),
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn download(&self, key: &str) -> AppResult<Bytes> {
        let objects = self.objects.read().await;
        objects
            .get(key)
            .map(|o| o.data.clone())
            .ok_or_else(|| AppError::not_found(format!("Object not found: {key}")))
    }

    async fn remove(&self, keys: &[String]) -> AppResult<()> {
        let mut objects = self.objects.write().await;
        for key in keys {
            objects.remove(key);
        }
        Ok(())
    }

    async fn move_object(&self, from: &str, to: &str) -> AppResult<()> {
        let mut objects = self.objects.write().await;
        let object = objects
            .remove(from)
            .ok_or_else(|| AppError::not_found(format!("Object not found: {from}")))?;
        objects.insert(to.to_string(), object);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with(keys: &[&str]) -> MemoryObjectStore {
        let store = MemoryObjectStore::new();
        for key in keys {
            store
                .upload(key, Bytes::from_static(b"pdf bytes"), Some("application/pdf"))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn lists_only_direct_children() {
        let store = store_with(&[
            "u/r/a.pdf",
            "u/r/docs/b.pdf",
            "u/r/docs/nested/c.pdf",
        ])
        .await;

        let entries = store.list("u/r", &ListOptions::default()).await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "docs"]);
    }

    #[tokio::test]
    async fn synthesized_folder_has_no_mime_type() {
        let store = store_with(&["u/r/docs/b.pdf"]).await;
        let entries = store.list("u/r", &ListOptions::default()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_folder());
        assert_eq!(entries[0].mime_type, None);
    }

    #[tokio::test]
    async fn listing_respects_limit() {
        let store = store_with(&["p/a.pdf", "p/b.pdf", "p/c.pdf"]).await;
        let options = ListOptions {
            limit: 2,
            ..ListOptions::default()
        };
        let entries = store.list("p", &options).await.unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn move_relocates_object() {
        let store = store_with(&["u/r/old.pdf"]).await;
        store.move_object("u/r/old.pdf", "u/r/new.pdf").await.unwrap();
        assert!(!store.contains("u/r/old.pdf").await);
        assert!(store.contains("u/r/new.pdf").await);
    }

    #[tokio::test]
    async fn move_of_absent_key_fails() {
        let store = MemoryObjectStore::new();
        let err = store.move_object("missing", "elsewhere").await.unwrap_err();
        assert_eq!(err.kind, dataroom_core::error::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = store_with(&["u/r/a.pdf"]).await;
        store.remove(&["u/r/a.pdf".to_string()]).await.unwrap();
        store.remove(&["u/r/a.pdf".to_string()]).await.unwrap();
        assert_eq!(store.object_count().await, 0);
    }
}

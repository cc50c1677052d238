//! Object storage trait for pluggable flat-keyspace backends.
//!
//! Keys are opaque `/`-joined strings. The `/` separator is a display
//! convention, not a real hierarchy: `list` returns only the direct children
//! of a prefix, and "folders" exist only as the shared prefix of deeper keys.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;
use crate::types::sorting::SortDirection;

/// Name of the zero-byte placeholder object that keeps an otherwise-empty
/// folder prefix listable.
pub const MARKER_OBJECT: &str = ".keep";

/// A single entry returned by [`ObjectStore::list`] — one direct child of
/// the listed prefix.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ObjectEntry {
    /// Entry name: a single path segment, never containing `/`.
    pub name: String,
    /// Size in bytes, when the backend reports one.
    pub size: Option<u64>,
    /// Creation timestamp, when the backend reports one.
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    /// MIME type recorded at upload time. Absent for folder entries.
    pub mime_type: Option<String>,
}

impl ObjectEntry {
    /// Classify this entry as a folder.
    ///
    /// An entry is a folder iff it carries no MIME metadata and is not the
    /// marker object itself. This is a heuristic, not a stored flag: a file
    /// whose backend recorded no MIME type would classify as a folder.
    pub fn is_folder(&self) -> bool {
        self.mime_type.as_deref().is_none_or(str::is_empty) && self.name != MARKER_OBJECT
    }

    /// Whether this entry is the `.keep` marker object.
    pub fn is_marker(&self) -> bool {
        self.name == MARKER_OBJECT
    }
}

/// Options for a single listing call.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Maximum number of entries returned. One page only — callers that
    /// need more must issue further calls themselves.
    pub limit: usize,
    /// Name ordering of the returned entries.
    pub sort: SortDirection,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: 1000,
            sort: SortDirection::Asc,
        }
    }
}

/// Trait for flat object-storage backends.
///
/// Implementations exist for S3-compatible services and an in-memory store.
/// The trait is defined here in `dataroom-core` and implemented in
/// `dataroom-storage`.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "s3", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the backend is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// List the direct children of a prefix, sorted by name.
    async fn list(&self, prefix: &str, options: &ListOptions) -> AppResult<Vec<ObjectEntry>>;

    /// Upload an object at the given key.
    async fn upload(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()>;

    /// Download an object's bytes.
    async fn download(&self, key: &str) -> AppResult<Bytes>;

    /// Remove a batch of objects. Removing an absent key is not an error.
    async fn remove(&self, keys: &[String]) -> AppResult<()>;

    /// Move (rename) a single object from one key to another.
    async fn move_object(&self, from: &str, to: &str) -> AppResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, mime: Option<&str>) -> ObjectEntry {
        ObjectEntry {
            name: name.to_string(),
            size: None,
            created_at: None,
            mime_type: mime.map(String::from),
        }
    }

    #[test]
    fn entry_with_mime_type_is_a_file() {
        assert!(!entry("contract.pdf", Some("application/pdf")).is_folder());
    }

    #[test]
    fn entry_without_mime_type_is_a_folder() {
        assert!(entry("exhibits", None).is_folder());
        assert!(entry("exhibits", Some("")).is_folder());
    }

    #[test]
    fn marker_is_never_a_folder() {
        let marker = entry(MARKER_OBJECT, None);
        assert!(!marker.is_folder());
        assert!(marker.is_marker());
    }
}

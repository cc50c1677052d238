//! Tree operations over one room's storage prefix.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::info;

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_core::traits::storage::{MARKER_OBJECT, ObjectStore};
use dataroom_core::types::pagination::{PageRequest, PageResponse};
use dataroom_core::types::sorting::{SortColumn, SortDirection};
use dataroom_entity::entry::{EntryKind, TreeEntry};

use super::archive::{self, ArchiveBuilder};
use super::bulk::{self, BulkOutcome};
use super::listing;
use super::path::{self, RoomRoot};
use super::walker;

/// Virtual-folder operations for room contents.
///
/// Holds only the object store handle; the caller supplies the room root
/// (owner + room) and relative path per call, after ownership has been
/// checked against the room record.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Object store backing all rooms.
    store: Arc<dyn ObjectStore>,
}

impl TreeService {
    /// Create a new tree service.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Browse the entries at a path: list, classify, sort, paginate.
    ///
    /// A backend listing error is logged and rendered as an empty page
    /// rather than retried or surfaced.
    pub async fn browse(
        &self,
        root: &RoomRoot,
        rel_path: &str,
        column: SortColumn,
        direction: SortDirection,
        page: &PageRequest,
    ) -> PageResponse<TreeEntry> {
        let prefix = root.prefix(rel_path);
        let mut entries = match listing::list_entries(self.store.as_ref(), &prefix).await {
            Ok(entries) => entries,
            Err(error) => {
                tracing::error!(prefix = %prefix, %error, "Listing failed, treating as empty");
                return PageResponse::empty(page);
            }
        };

        listing::sort_entries(&mut entries, column, direction);
        listing::paginate(entries, page)
    }

    /// Upload a PDF into the given path.
    ///
    /// The stored name is the original name prefixed with the upload
    /// timestamp in milliseconds, so repeated uploads of the same file
    /// never collide. Returns the stored name.
    pub async fn upload_file(
        &self,
        root: &RoomRoot,
        rel_path: &str,
        file_name: &str,
        data: Bytes,
    ) -> AppResult<String> {
        let name = validate_segment(file_name, "File name")?;
        if !name.to_lowercase().ends_with(".pdf") {
            return Err(AppError::validation("Only PDF files are allowed"));
        }

        let stored_name = format!("{}_{}", Utc::now().timestamp_millis(), name);
        let key = path::join(&root.prefix(rel_path), &stored_name);
        self.store
            .upload(&key, data, Some("application/pdf"))
            .await?;

        info!(key = %key, "File uploaded");
        Ok(stored_name)
    }

    /// Create a folder by placing its `.keep` marker object.
    pub async fn create_folder(
        &self,
        root: &RoomRoot,
        rel_path: &str,
        name: &str,
    ) -> AppResult<()> {
        let name = validate_segment(name, "Folder name")?;

        let folder_prefix = path::join(&root.prefix(rel_path), name);
        let marker_key = path::join(&folder_prefix, MARKER_OBJECT);
        self.store
            .upload(&marker_key, Bytes::new(), Some("text/plain"))
            .await?;

        info!(prefix = %folder_prefix, "Folder created");
        Ok(())
    }

    /// Delete a single file. Removing an already-absent name is a no-op.
    pub async fn delete_file(&self, root: &RoomRoot, rel_path: &str, name: &str) -> AppResult<()> {
        let key = path::join(&root.prefix(rel_path), name);
        self.store.remove(&[key.clone()]).await?;
        info!(key = %key, "File deleted");
        Ok(())
    }

    /// Delete a folder and everything under it.
    ///
    /// Walks the subtree, then removes the collected keys in one batched
    /// call. Not atomic: a failure partway leaves already-removed objects
    /// removed, with no rollback or retry.
    pub async fn delete_folder(
        &self,
        root: &RoomRoot,
        rel_path: &str,
        name: &str,
    ) -> AppResult<usize> {
        let folder_prefix = path::join(&root.prefix(rel_path), name);
        let keys = walker::collect_descendants(self.store.as_ref(), &folder_prefix).await?;

        if !keys.is_empty() {
            self.store.remove(&keys).await?;
        }

        info!(prefix = %folder_prefix, objects = keys.len(), "Folder deleted");
        Ok(keys.len())
    }

    /// Rename a file with a single move call.
    pub async fn rename_file(
        &self,
        root: &RoomRoot,
        rel_path: &str,
        old_name: &str,
        new_name: &str,
    ) -> AppResult<()> {
        let new_name = validate_rename_target(old_name, new_name)?;

        let prefix = root.prefix(rel_path);
        let from = path::join(&prefix, old_name);
        let to = path::join(&prefix, new_name);
        self.store.move_object(&from, &to).await?;

        info!(from = %from, to = %to, "File renamed");
        Ok(())
    }

    /// Rename a folder by moving every descendant object to the new prefix.
    ///
    /// A move failure aborts the loop immediately, leaving the folder split
    /// across the old and new prefixes with no rollback. Returns the number
    /// of objects moved.
    pub async fn rename_folder(
        &self,
        root: &RoomRoot,
        rel_path: &str,
        old_name: &str,
        new_name: &str,
    ) -> AppResult<usize> {
        let new_name = validate_rename_target(old_name, new_name)?;

        let prefix = root.prefix(rel_path);
        let old_prefix = path::join(&prefix, old_name);
        let new_prefix = path::join(&prefix, new_name);

        let keys = walker::collect_descendants(self.store.as_ref(), &old_prefix).await?;
        for key in &keys {
            let suffix = key
                .strip_prefix(old_prefix.as_str())
                .ok_or_else(|| AppError::internal(format!("Walked key '{key}' outside prefix")))?;
            let target = format!("{new_prefix}{suffix}");
            self.store.move_object(key, &target).await?;
        }

        info!(from = %old_prefix, to = %new_prefix, objects = keys.len(), "Folder renamed");
        Ok(keys.len())
    }

    /// Download a single file's bytes.
    pub async fn download_file(
        &self,
        root: &RoomRoot,
        rel_path: &str,
        name: &str,
    ) -> AppResult<Bytes> {
        let key = path::join(&root.prefix(rel_path), name);
        self.store.download(&key).await
    }

    /// Build a ZIP of one folder's subtree, rooted at the folder name.
    pub async fn archive_folder(
        &self,
        root: &RoomRoot,
        rel_path: &str,
        name: &str,
    ) -> AppResult<Vec<u8>> {
        let folder_prefix = path::join(&root.prefix(rel_path), name);
        archive::build_zip(self.store.as_ref(), &folder_prefix, name).await
    }

    /// Delete every selected entry, best-effort.
    ///
    /// Selected names are classified against the current listing: folders
    /// get a recursive delete, everything else a single-object remove (a
    /// no-op for names already absent from storage).
    pub async fn bulk_delete(
        &self,
        root: &RoomRoot,
        rel_path: &str,
        names: &[String],
    ) -> AppResult<BulkOutcome> {
        let prefix = root.prefix(rel_path);
        let kinds = self.classify(&prefix).await?;

        let outcome = bulk::run(names, |name| {
            let store = Arc::clone(&self.store);
            let prefix = prefix.clone();
            let is_folder = kinds.get(&name) == Some(&EntryKind::Folder);
            async move {
                let key = path::join(&prefix, &name);
                if is_folder {
                    let keys = walker::collect_descendants(store.as_ref(), &key).await?;
                    store.remove(&keys).await
                } else {
                    store.remove(&[key]).await
                }
            }
        })
        .await;

        info!(
            prefix = %prefix,
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Bulk delete finished"
        );
        Ok(outcome)
    }

    /// Build one ZIP of every selected entry: files at the archive root,
    /// folders as subtrees. Item failures are logged and skipped.
    pub async fn bulk_archive(
        &self,
        root: &RoomRoot,
        rel_path: &str,
        names: &[String],
    ) -> AppResult<Vec<u8>> {
        let prefix = root.prefix(rel_path);
        let kinds = self.classify(&prefix).await?;

        let mut builder = ArchiveBuilder::new();
        for name in names {
            let key = path::join(&prefix, name);
            let result = if kinds.get(name) == Some(&EntryKind::Folder) {
                builder.add_folder(self.store.as_ref(), &key, name).await
            } else {
                builder
                    .add_file(self.store.as_ref(), &key, name)
                    .await
                    .map(|_| ())
            };
            if let Err(error) = result {
                tracing::warn!(name = %name, %error, "Bulk archive item failed, continuing");
            }
        }

        builder.finish()
    }

    /// Classify the current listing's entries by name.
    async fn classify(&self, prefix: &str) -> AppResult<HashMap<String, EntryKind>> {
        let entries = listing::list_entries(self.store.as_ref(), prefix).await?;
        Ok(entries
            .into_iter()
            .map(|TreeEntry { name, kind, .. }| (name, kind))
            .collect())
    }
}

/// Reject empty names and names that would escape their path segment.
fn validate_segment<'a>(name: &'a str, what: &str) -> AppResult<&'a str> {
    if name.trim().is_empty() {
        return Err(AppError::validation(format!("{what} cannot be empty")));
    }
    if name.contains('/') {
        return Err(AppError::validation(format!("{what} cannot contain '/'")));
    }
    Ok(name)
}

/// Reject empty or unchanged rename targets before any network call.
fn validate_rename_target<'a>(old_name: &str, new_name: &'a str) -> AppResult<&'a str> {
    let new_name = validate_segment(new_name, "New name")?;
    if new_name == old_name {
        return Err(AppError::validation("New name is unchanged"));
    }
    Ok(new_name)
}

//! In-memory ZIP archival of folder subtrees.
//!
//! The archive is built incrementally during the walk: each folder level is
//! listed, sub-folders extend the in-archive relative path, and files are
//! downloaded and written at their accumulated path. A per-file download
//! failure is logged and that file skipped — the archive is still produced,
//! silently missing the failed entries.

use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_core::traits::storage::{ListOptions, ObjectStore};

use super::path;

/// Incrementally builds one ZIP archive in memory.
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl ArchiveBuilder {
    /// Start a new empty archive.
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated),
        }
    }

    /// Download one object and write it into the archive at `rel_path`.
    ///
    /// Returns `false` if the download failed and the entry was skipped.
    pub async fn add_file(
        &mut self,
        store: &dyn ObjectStore,
        key: &str,
        rel_path: &str,
    ) -> AppResult<bool> {
        let data = match store.download(key).await {
            Ok(data) => data,
            Err(error) => {
                tracing::warn!(key, %error, "Skipping archive entry that failed to download");
                return Ok(false);
            }
        };

        self.writer
            .start_file(rel_path, self.options)
            .map_err(|e| AppError::internal(format!("Failed to start archive entry: {e}")))?;
        self.writer
            .write_all(&data)
            .map_err(|e| AppError::internal(format!("Failed to write archive entry: {e}")))?;
        Ok(true)
    }

    /// Walk a folder prefix and add every descendant file under `rel_root`.
    ///
    /// Markers are skipped; a listing error aborts the walk and propagates.
    pub async fn add_folder(
        &mut self,
        store: &dyn ObjectStore,
        folder_prefix: &str,
        rel_root: &str,
    ) -> AppResult<()> {
        let mut worklist = vec![(folder_prefix.to_string(), rel_root.to_string())];

        while let Some((prefix, rel)) = worklist.pop() {
            let entries = store.list(&prefix, &ListOptions::default()).await?;
            for entry in entries {
                if entry.is_marker() {
                    continue;
                }
                let key = path::join(&prefix, &entry.name);
                let entry_rel = format!("{rel}/{}", entry.name);
                if entry.is_folder() {
                    worklist.push((key, entry_rel));
                } else {
                    self.add_file(store, &key, &entry_rel).await?;
                }
            }
        }

        Ok(())
    }

    /// Finish the archive and return its bytes.
    pub fn finish(self) -> AppResult<Vec<u8>> {
        let cursor = self
            .writer
            .finish()
            .map_err(|e| AppError::internal(format!("Failed to finish archive: {e}")))?;
        Ok(cursor.into_inner())
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a ZIP of one folder subtree, entries rooted at the folder's name.
pub async fn build_zip(
    store: &dyn ObjectStore,
    folder_prefix: &str,
    folder_name: &str,
) -> AppResult<Vec<u8>> {
    let mut builder = ArchiveBuilder::new();
    builder.add_folder(store, folder_prefix, folder_name).await?;
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use dataroom_storage::MemoryObjectStore;
    use std::collections::BTreeSet;

    fn archive_paths(bytes: &[u8]) -> BTreeSet<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[tokio::test]
    async fn preserves_nested_structure() {
        let store = MemoryObjectStore::new();
        for key in [
            "u/r/exhibits/one.pdf",
            "u/r/exhibits/annex/two.pdf",
        ] {
            store
                .upload(key, Bytes::from_static(b"pdf"), Some("application/pdf"))
                .await
                .unwrap();
        }

        let bytes = build_zip(&store, "u/r/exhibits", "exhibits").await.unwrap();
        assert_eq!(
            archive_paths(&bytes),
            BTreeSet::from([
                "exhibits/one.pdf".to_string(),
                "exhibits/annex/two.pdf".to_string(),
            ])
        );
    }

    #[tokio::test]
    async fn marker_only_folder_produces_empty_archive() {
        let store = MemoryObjectStore::new();
        store
            .upload(
                "u/r/exhibits/.keep",
                Bytes::from_static(b""),
                Some("text/plain"),
            )
            .await
            .unwrap();

        let bytes = build_zip(&store, "u/r/exhibits", "exhibits").await.unwrap();
        assert!(archive_paths(&bytes).is_empty());
    }
}

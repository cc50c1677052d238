//! User-visible tree entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dataroom_core::traits::storage::ObjectEntry;

/// What kind of node a tree entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A virtual folder (a shared key prefix).
    Folder,
    /// A stored file.
    File,
}

impl EntryKind {
    /// Display label for the kind column ("Folder" / "PDF").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Folder => "Folder",
            Self::File => "PDF",
        }
    }
}

/// One row of a room listing, after marker filtering and classification.
///
/// Folders have no independent existence in storage; a folder entry here is
/// witnessed by at least one object sharing its prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Entry name: a single path segment.
    pub name: String,
    /// Folder or file.
    pub kind: EntryKind,
    /// Size in bytes; `None` for folders.
    pub size: Option<u64>,
    /// Creation timestamp, when the backend reports one.
    pub created_at: Option<DateTime<Utc>>,
}

impl TreeEntry {
    /// Whether this entry is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    /// Size used for ordering: folders count as zero.
    pub fn sort_size(&self) -> u64 {
        self.size.unwrap_or(0)
    }
}

impl From<ObjectEntry> for TreeEntry {
    fn from(entry: ObjectEntry) -> Self {
        let kind = if entry.is_folder() {
            EntryKind::Folder
        } else {
            EntryKind::File
        };
        Self {
            kind,
            size: if kind == EntryKind::Folder {
                None
            } else {
                entry.size
            },
            name: entry.name,
            created_at: entry.created_at,
        }
    }
}

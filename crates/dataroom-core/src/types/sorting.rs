//! Sorting types for tree listings.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Flip the direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Column a tree listing can be sorted by.
///
/// Folders always order before files regardless of the chosen column; the
/// column provides the secondary ordering within each group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    /// Entry name, lexicographic.
    #[default]
    Name,
    /// Entry kind label ("Folder" before "PDF").
    Kind,
    /// Entry size in bytes (folders count as zero).
    Size,
}

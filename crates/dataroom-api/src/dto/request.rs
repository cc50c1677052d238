//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use dataroom_core::types::sorting::{SortColumn, SortDirection};
use dataroom_entity::entry::EntryKind;

/// Signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Login email.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Email confirmation query.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmQuery {
    /// The token carried by the confirmation link.
    pub token: String,
}

/// Create room request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoomRequest {
    /// Room name.
    #[validate(length(min = 1, max = 200, message = "Room name is required"))]
    pub name: String,
}

/// Query parameters of a tree listing.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeListQuery {
    /// Relative path inside the room; empty for the room root.
    #[serde(default)]
    pub path: String,
    /// Sort column.
    #[serde(default)]
    pub sort_by: SortColumn,
    /// Sort direction.
    #[serde(default)]
    pub order: SortDirection,
}

/// Query parameters naming one entry at a path.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryQuery {
    /// Relative path inside the room.
    #[serde(default)]
    pub path: String,
    /// Entry name.
    pub name: String,
}

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Relative path the folder is created under.
    #[serde(default)]
    pub path: String,
    /// Folder name.
    pub name: String,
}

/// Rename request body, for files and folders alike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameRequest {
    /// Relative path containing the entry.
    #[serde(default)]
    pub path: String,
    /// Current entry name.
    pub old_name: String,
    /// New entry name.
    pub new_name: String,
    /// Whether the entry is a folder or a file.
    pub kind: EntryKind,
}

/// Bulk operation request body: the client's selection set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkRequest {
    /// Relative path the selection was made in.
    #[serde(default)]
    pub path: String,
    /// Selected entry names, in selection order.
    pub names: Vec<String>,
}

//! Room entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named container owned by one user, holding a file/folder tree in
/// object storage. Room rows are never updated in place: they are created
/// once and deleted by their owner.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    /// Unique room identifier.
    pub id: Uuid,
    /// The owning user.
    pub owner_id: Uuid,
    /// Room name, unique per owner.
    pub name: String,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoom {
    /// The owning user.
    pub owner_id: Uuid,
    /// Room name.
    pub name: String,
}

//! Room CRUD with ownership checks.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_database::repositories::room::RoomRepository;
use dataroom_entity::room::{CreateRoom, Room};

use crate::context::RequestContext;
use crate::tree::RoomRoot;

/// Manages room records. Rooms are created and deleted, never updated.
#[derive(Debug, Clone)]
pub struct RoomService {
    /// Room repository.
    rooms: Arc<RoomRepository>,
}

impl RoomService {
    /// Create a new room service.
    pub fn new(rooms: Arc<RoomRepository>) -> Self {
        Self { rooms }
    }

    /// Create a room for the caller.
    ///
    /// The insert is guarded by a pre-check for a name collision among the
    /// caller's rooms; the unique constraint backs it up.
    pub async fn create(&self, ctx: &RequestContext, name: &str) -> AppResult<Room> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Room name cannot be empty"));
        }

        if self
            .rooms
            .find_by_owner_and_name(ctx.user_id, name)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("A room with this name already exists"));
        }

        let room = self
            .rooms
            .create(&CreateRoom {
                owner_id: ctx.user_id,
                name: name.to_string(),
            })
            .await?;

        info!(user_id = %ctx.user_id, room_id = %room.id, name = %room.name, "Room created");
        Ok(room)
    }

    /// List the caller's rooms, newest first.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Room>> {
        self.rooms.find_by_owner(ctx.user_id).await
    }

    /// Fetch one room, verifying the caller owns it.
    ///
    /// A room owned by someone else reads as not found, so existence is
    /// not leaked across accounts.
    pub async fn get(&self, ctx: &RequestContext, room_id: Uuid) -> AppResult<Room> {
        let room = self
            .rooms
            .find_by_id(room_id)
            .await?
            .filter(|room| room.owner_id == ctx.user_id)
            .ok_or_else(|| AppError::not_found("Room not found"))?;
        Ok(room)
    }

    /// Delete a room the caller owns.
    ///
    /// Does not sweep the room's storage prefix; objects uploaded to the
    /// room stay in the bucket.
    pub async fn delete(&self, ctx: &RequestContext, room_id: Uuid) -> AppResult<()> {
        let room = self.get(ctx, room_id).await?;
        self.rooms.delete(room.id, ctx.user_id).await?;

        info!(user_id = %ctx.user_id, room_id = %room.id, "Room deleted");
        Ok(())
    }

    /// The storage root of a room the caller owns.
    pub async fn room_root(&self, ctx: &RequestContext, room_id: Uuid) -> AppResult<RoomRoot> {
        let room = self.get(ctx, room_id).await?;
        Ok(RoomRoot::new(room.owner_id, room.id))
    }
}

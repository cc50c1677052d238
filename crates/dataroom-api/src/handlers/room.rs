//! Room handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use dataroom_core::error::AppError;

use crate::dto::request::CreateRoomRequest;
use crate::dto::response::{ApiResponse, MessageResponse, RoomResponse};
use crate::error::ApiError;
use crate::extractors::ConfirmedUser;
use crate::state::AppState;

/// GET /api/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    ConfirmedUser(ctx): ConfirmedUser,
) -> Result<Json<ApiResponse<Vec<RoomResponse>>>, ApiError> {
    let rooms = state.room_service.list(&ctx).await?;
    Ok(Json(ApiResponse::ok(
        rooms.into_iter().map(RoomResponse::from).collect(),
    )))
}

/// POST /api/rooms
pub async fn create_room(
    State(state): State<AppState>,
    ConfirmedUser(ctx): ConfirmedUser,
    Json(req): Json<CreateRoomRequest>,
) -> Result<Json<ApiResponse<RoomResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let room = state.room_service.create(&ctx, &req.name).await?;
    Ok(Json(ApiResponse::ok(room.into())))
}

/// GET /api/rooms/{id}
pub async fn get_room(
    State(state): State<AppState>,
    ConfirmedUser(ctx): ConfirmedUser,
    Path(room_id): Path<Uuid>,
) -> Result<Json<ApiResponse<RoomResponse>>, ApiError> {
    let room = state.room_service.get(&ctx, room_id).await?;
    Ok(Json(ApiResponse::ok(room.into())))
}

/// DELETE /api/rooms/{id}
pub async fn delete_room(
    State(state): State<AppState>,
    ConfirmedUser(ctx): ConfirmedUser,
    Path(room_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.room_service.delete(&ctx, room_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Room deleted"))))
}

//! Tree handlers: listing, upload, download, folders, renames, bulk.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_core::types::pagination::PageResponse;
use dataroom_entity::entry::{EntryKind, TreeEntry};

use crate::dto::request::{
    BulkRequest, CreateFolderRequest, EntryQuery, RenameRequest, TreeListQuery,
};
use crate::dto::response::{ApiResponse, BulkOutcomeResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{ConfirmedUser, PaginationParams};
use crate::state::AppState;

/// GET /api/rooms/{id}/entries?path=&sort_by=&order=&page=&page_size=
pub async fn list_entries(
    State(state): State<AppState>,
    ConfirmedUser(ctx): ConfirmedUser,
    Path(room_id): Path<Uuid>,
    Query(query): Query<TreeListQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<TreeEntry>>>, ApiError> {
    let root = state.room_service.room_root(&ctx, room_id).await?;
    let page = state
        .tree_service
        .browse(
            &root,
            &query.path,
            query.sort_by,
            query.order,
            &pagination.into_page_request(),
        )
        .await;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/rooms/{id}/files — multipart upload (`path`, `file`)
pub async fn upload_file(
    State(state): State<AppState>,
    ConfirmedUser(ctx): ConfirmedUser,
    Path(room_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let mut rel_path = String::new();
    let mut file_name: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "path" => {
                rel_path = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
            }
            "file" => {
                file_name = field.file_name().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let file_name = file_name.ok_or_else(|| AppError::validation("A file part is required"))?;
    let data = data.ok_or_else(|| AppError::validation("A file part is required"))?;

    let root = state.room_service.room_root(&ctx, room_id).await?;
    let stored_name = state
        .tree_service
        .upload_file(&root, &rel_path, &file_name, data)
        .await?;

    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "stored_name": stored_name }),
    )))
}

/// GET /api/rooms/{id}/files/download?path=&name=
pub async fn download_file(
    State(state): State<AppState>,
    ConfirmedUser(ctx): ConfirmedUser,
    Path(room_id): Path<Uuid>,
    Query(query): Query<EntryQuery>,
) -> Result<Response, ApiError> {
    let root = state.room_service.room_root(&ctx, room_id).await?;
    let data = state
        .tree_service
        .download_file(&root, &query.path, &query.name)
        .await?;

    attachment(data, "application/pdf", &query.name)
}

/// DELETE /api/rooms/{id}/files?path=&name=
pub async fn delete_file(
    State(state): State<AppState>,
    ConfirmedUser(ctx): ConfirmedUser,
    Path(room_id): Path<Uuid>,
    Query(query): Query<EntryQuery>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let root = state.room_service.room_root(&ctx, room_id).await?;
    state
        .tree_service
        .delete_file(&root, &query.path, &query.name)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("File deleted"))))
}

/// PUT /api/rooms/{id}/files/rename
pub async fn rename_entry(
    State(state): State<AppState>,
    ConfirmedUser(ctx): ConfirmedUser,
    Path(room_id): Path<Uuid>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let root = state.room_service.room_root(&ctx, room_id).await?;

    match req.kind {
        EntryKind::File => {
            state
                .tree_service
                .rename_file(&root, &req.path, &req.old_name, &req.new_name)
                .await?;
        }
        EntryKind::Folder => {
            state
                .tree_service
                .rename_folder(&root, &req.path, &req.old_name, &req.new_name)
                .await?;
        }
    }

    Ok(Json(ApiResponse::ok(MessageResponse::new("Renamed"))))
}

/// POST /api/rooms/{id}/folders
pub async fn create_folder(
    State(state): State<AppState>,
    ConfirmedUser(ctx): ConfirmedUser,
    Path(room_id): Path<Uuid>,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let root = state.room_service.room_root(&ctx, room_id).await?;
    state
        .tree_service
        .create_folder(&root, &req.path, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Folder created"))))
}

/// DELETE /api/rooms/{id}/folders?path=&name=
pub async fn delete_folder(
    State(state): State<AppState>,
    ConfirmedUser(ctx): ConfirmedUser,
    Path(room_id): Path<Uuid>,
    Query(query): Query<EntryQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let root = state.room_service.room_root(&ctx, room_id).await?;
    let removed = state
        .tree_service
        .delete_folder(&root, &query.path, &query.name)
        .await?;
    Ok(Json(ApiResponse::ok(serde_json::json!({ "removed": removed }))))
}

/// GET /api/rooms/{id}/folders/archive?path=&name=
pub async fn archive_folder(
    State(state): State<AppState>,
    ConfirmedUser(ctx): ConfirmedUser,
    Path(room_id): Path<Uuid>,
    Query(query): Query<EntryQuery>,
) -> Result<Response, ApiError> {
    let root = state.room_service.room_root(&ctx, room_id).await?;
    let data = state
        .tree_service
        .archive_folder(&root, &query.path, &query.name)
        .await?;

    attachment(
        Bytes::from(data),
        "application/zip",
        &format!("{}.zip", safe_archive_name(&query.name)),
    )
}

/// POST /api/rooms/{id}/bulk/delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    ConfirmedUser(ctx): ConfirmedUser,
    Path(room_id): Path<Uuid>,
    Json(req): Json<BulkRequest>,
) -> Result<Json<ApiResponse<BulkOutcomeResponse>>, ApiError> {
    let root = state.room_service.room_root(&ctx, room_id).await?;
    let outcome = state
        .tree_service
        .bulk_delete(&root, &req.path, &req.names)
        .await?;
    Ok(Json(ApiResponse::ok(outcome.into())))
}

/// POST /api/rooms/{id}/bulk/download
pub async fn bulk_download(
    State(state): State<AppState>,
    ConfirmedUser(ctx): ConfirmedUser,
    Path(room_id): Path<Uuid>,
    Json(req): Json<BulkRequest>,
) -> Result<Response, ApiError> {
    let room = state.room_service.get(&ctx, room_id).await?;
    let root = state.room_service.room_root(&ctx, room_id).await?;
    let data = state
        .tree_service
        .bulk_archive(&root, &req.path, &req.names)
        .await?;

    attachment(
        Bytes::from(data),
        "application/zip",
        &format!("{}.zip", safe_archive_name(&room.name)),
    )
}

/// Build an attachment response.
fn attachment(data: Bytes, content_type: &str, filename: &str) -> Result<Response, ApiError> {
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// Reduce a user-supplied name to something safe for a download filename.
fn safe_archive_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if safe.is_empty() {
        "archive".to_string()
    } else {
        safe
    }
}

#[cfg(test)]
mod tests {
    use super::safe_archive_name;

    #[test]
    fn strips_unsafe_filename_characters() {
        assert_eq!(safe_archive_name("Acme Deal/2026"), "AcmeDeal2026");
        assert_eq!(safe_archive_name("???"), "archive");
        assert_eq!(safe_archive_name("exhibits"), "exhibits");
    }
}

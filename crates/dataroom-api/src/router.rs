//! Route definitions for the Dataroom HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(room_routes())
        .merge(tree_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Account endpoints: signup, login, refresh, confirm, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/confirm", get(handlers::auth::confirm))
        .route("/auth/me", get(handlers::auth::me))
}

/// Room CRUD
fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(handlers::room::list_rooms))
        .route("/rooms", post(handlers::room::create_room))
        .route("/rooms/{id}", get(handlers::room::get_room))
        .route("/rooms/{id}", delete(handlers::room::delete_room))
}

/// Tree browsing, uploads, downloads, folders, renames, bulk actions
fn tree_routes() -> Router<AppState> {
    Router::new()
        .route("/rooms/{id}/entries", get(handlers::tree::list_entries))
        .route("/rooms/{id}/files", post(handlers::tree::upload_file))
        .route("/rooms/{id}/files", delete(handlers::tree::delete_file))
        .route(
            "/rooms/{id}/files/download",
            get(handlers::tree::download_file),
        )
        .route(
            "/rooms/{id}/files/rename",
            put(handlers::tree::rename_entry),
        )
        .route("/rooms/{id}/folders", post(handlers::tree::create_folder))
        .route("/rooms/{id}/folders", delete(handlers::tree::delete_folder))
        .route(
            "/rooms/{id}/folders/archive",
            get(handlers::tree::archive_folder),
        )
        .route("/rooms/{id}/bulk/delete", post(handlers::tree::bulk_delete))
        .route(
            "/rooms/{id}/bulk/download",
            post(handlers::tree::bulk_download),
        )
}

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

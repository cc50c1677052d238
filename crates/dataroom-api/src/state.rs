//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use dataroom_auth::jwt::JwtDecoder;
use dataroom_core::config::AppConfig;
use dataroom_core::traits::storage::ObjectStore;
use dataroom_service::account::AccountService;
use dataroom_service::room::RoomService;
use dataroom_service::tree::TreeService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Object store backing all rooms.
    pub store: Arc<dyn ObjectStore>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Account service.
    pub account_service: Arc<AccountService>,
    /// Room service.
    pub room_service: Arc<RoomService>,
    /// Virtual folder tree service.
    pub tree_service: Arc<TreeService>,
}

//! Application wiring — builds state, router, and the serving loop.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use dataroom_auth::jwt::{JwtDecoder, JwtEncoder};
use dataroom_core::config::AppConfig;
use dataroom_core::error::AppError;
use dataroom_core::traits::storage::ObjectStore;
use dataroom_database::repositories::room::RoomRepository;
use dataroom_database::repositories::user::UserRepository;
use dataroom_service::account::AccountService;
use dataroom_service::room::RoomService;
use dataroom_service::tree::TreeService;

use crate::router::build_router;
use crate::state::AppState;

/// Wire repositories and services into the shared application state.
pub fn build_state(config: AppConfig, db_pool: PgPool, store: Arc<dyn ObjectStore>) -> AppState {
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let room_repo = Arc::new(RoomRepository::new(db_pool.clone()));

    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    let account_service = Arc::new(AccountService::new(
        Arc::clone(&user_repo),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        &config.auth,
    ));
    let room_service = Arc::new(RoomService::new(Arc::clone(&room_repo)));
    let tree_service = Arc::new(TreeService::new(Arc::clone(&store)));

    AppState {
        config: Arc::new(config),
        db_pool,
        store,
        jwt_decoder,
        account_service,
        room_service,
        tree_service,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: AppState) -> Result<(), AppError> {
    let addr = state.config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(addr = %addr, "Dataroom API listening");

    axum::serve(listener, build_app(state))
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

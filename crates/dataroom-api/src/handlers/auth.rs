//! Account handlers: signup, login, refresh, confirmation, me.

use axum::Json;
use axum::extract::{Query, State};
use validator::Validate;

use dataroom_core::error::AppError;

use crate::dto::request::{ConfirmQuery, LoginRequest, RefreshRequest, SignupRequest};
use crate::dto::response::{ApiResponse, SignupResponse, TokenResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<ApiResponse<SignupResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (user, confirmation_token) = state
        .account_service
        .signup(&req.email, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(SignupResponse {
        user: user.into(),
        confirmation_token,
    })))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (user, tokens) = state.account_service.login(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(TokenResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        access_expires_at: tokens.access_expires_at,
        refresh_expires_at: tokens.refresh_expires_at,
        user: Some(user.into()),
    })))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let tokens = state.account_service.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(TokenResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        access_expires_at: tokens.access_expires_at,
        refresh_expires_at: tokens.refresh_expires_at,
        user: None,
    })))
}

/// GET /api/auth/confirm?token=...
pub async fn confirm(
    State(state): State<AppState>,
    Query(query): Query<ConfirmQuery>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.account_service.confirm(&query.token).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.account_service.current_user(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

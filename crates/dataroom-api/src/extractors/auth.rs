//! Authentication extractors.
//!
//! `AuthUser` pulls the bearer token from the Authorization header,
//! validates it, and injects the caller's context. `ConfirmedUser` adds the
//! rule that room paths are blocked for accounts whose email is
//! unconfirmed.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use dataroom_core::error::AppError;
use dataroom_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode_access_token(token)?;

        Ok(AuthUser(RequestContext::new(
            claims.user_id(),
            claims.email,
            claims.confirmed,
        )))
    }
}

/// An authenticated caller whose email address is confirmed.
///
/// Room and tree routes require this; unconfirmed accounts can still reach
/// `/api/auth/*`.
#[derive(Debug, Clone)]
pub struct ConfirmedUser(pub RequestContext);

impl std::ops::Deref for ConfirmedUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for ConfirmedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(ctx) = AuthUser::from_request_parts(parts, state).await?;

        if !ctx.confirmed {
            return Err(ApiError(AppError::authorization(
                "Email address is not confirmed",
            )));
        }

        Ok(ConfirmedUser(ctx))
    }
}

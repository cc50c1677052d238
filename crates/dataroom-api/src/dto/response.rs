//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dataroom_entity::room::Room;
use dataroom_entity::user::User;
use dataroom_service::tree::BulkOutcome;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Whether the email is confirmed.
    pub confirmed: bool,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            confirmed: user.is_confirmed(),
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Signup response.
///
/// The confirmation token stands in for the email the hosted original sent;
/// an operator-run mailer would consume it instead of the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    /// The created user.
    pub user: UserResponse,
    /// Token for `GET /api/auth/confirm`.
    pub confirmation_token: String,
}

/// Login / refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
    /// User info, when the call authenticated a user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

/// Room summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomResponse {
    /// Room ID.
    pub id: Uuid,
    /// Room name.
    pub name: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            name: room.name,
            created_at: room.created_at,
        }
    }
}

/// One failed item of a bulk pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkFailureResponse {
    /// Selected entry name.
    pub name: String,
    /// Why it failed.
    pub message: String,
}

/// Outcome of a bulk delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkOutcomeResponse {
    /// Names whose operation completed; the client drops these from its
    /// selection set.
    pub succeeded: Vec<String>,
    /// Per-item failures.
    pub failed: Vec<BulkFailureResponse>,
}

impl From<BulkOutcome> for BulkOutcomeResponse {
    fn from(outcome: BulkOutcome) -> Self {
        Self {
            succeeded: outcome.succeeded,
            failed: outcome
                .failed
                .into_iter()
                .map(|f| BulkFailureResponse {
                    name: f.name,
                    message: f.error.message,
                })
                .collect(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

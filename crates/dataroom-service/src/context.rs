//! Per-request caller context.

use uuid::Uuid;

/// Identity of the authenticated caller, carried into every service call.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The caller's user ID.
    pub user_id: Uuid,
    /// The caller's login email.
    pub email: String,
    /// Whether the caller's email address is confirmed.
    pub confirmed: bool,
}

impl RequestContext {
    /// Create a new request context.
    pub fn new(user_id: Uuid, email: impl Into<String>, confirmed: bool) -> Self {
        Self {
            user_id,
            email: email.into(),
            confirmed,
        }
    }
}

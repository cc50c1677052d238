//! Request extractors.

pub mod auth;
pub mod pagination;

pub use auth::{AuthUser, ConfirmedUser};
pub use pagination::PaginationParams;

//! Account lifecycle: signup, login, token refresh, email confirmation.

pub mod service;

pub use service::AccountService;

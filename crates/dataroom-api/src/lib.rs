//! # dataroom-api
//!
//! HTTP API layer for Dataroom, built on Axum. Routes live under `/api`;
//! handlers call into `dataroom-service` and translate [`AppError`]s into
//! HTTP responses.
//!
//! [`AppError`]: dataroom_core::AppError

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, serve};
pub use state::AppState;

//! # dataroom-core
//!
//! Core crate for Dataroom. Contains the object-storage trait, configuration
//! schemas, pagination/sorting types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Dataroom crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

//! # dataroom-service
//!
//! Business logic for Dataroom. `room` and `account` orchestrate the
//! relational repositories; `tree` implements the virtual folder layer over
//! the flat object store (listing, recursive walks, archival, bulk
//! operations, renames).

pub mod account;
pub mod context;
pub mod room;
pub mod tree;

pub use context::RequestContext;

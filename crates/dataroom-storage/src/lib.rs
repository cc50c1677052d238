//! # dataroom-storage
//!
//! Object storage providers for Dataroom. The production backend is an
//! S3-compatible bucket; an in-memory store with identical flat-keyspace
//! semantics backs development and tests.

pub mod providers;

pub use providers::from_config;
pub use providers::memory::MemoryObjectStore;

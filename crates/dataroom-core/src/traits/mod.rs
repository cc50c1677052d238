//! Trait definitions implemented by other Dataroom crates.

pub mod storage;

pub use storage::{ListOptions, ObjectEntry, ObjectStore};

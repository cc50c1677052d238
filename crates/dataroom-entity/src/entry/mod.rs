//! Tree entry entity.

pub mod model;

pub use model::{EntryKind, TreeEntry};

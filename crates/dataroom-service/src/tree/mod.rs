//! The virtual folder tree over flat object storage.
//!
//! Object storage has no real directories: `/` in a key is a display
//! convention, and a "folder" exists only while at least one object (its
//! own `.keep` marker or a descendant file) shares its prefix. This module
//! builds browsing, recursive deletes and renames, ZIP archival, and bulk
//! operations on top of the one-level `list` primitive.

pub mod archive;
pub mod bulk;
pub mod listing;
pub mod path;
pub mod service;
pub mod walker;

pub use bulk::{BulkFailure, BulkOutcome};
pub use path::RoomRoot;
pub use service::TreeService;

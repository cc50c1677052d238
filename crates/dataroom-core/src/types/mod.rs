//! Shared value types used across Dataroom crates.

pub mod pagination;
pub mod sorting;

pub use pagination::{PageRequest, PageResponse};
pub use sorting::{SortColumn, SortDirection};

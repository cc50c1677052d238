//! Room lifecycle.

pub mod service;

pub use service::RoomService;

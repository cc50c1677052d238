//! # dataroom-entity
//!
//! Domain entity models for Dataroom: users, rooms, and tree entries.

pub mod entry;
pub mod room;
pub mod user;

//! # dataroom-database
//!
//! PostgreSQL connection management, migrations, and repositories for the
//! relational side of Dataroom (users and room records). The file tree
//! itself lives in object storage and never touches this crate.

pub mod connection;
pub mod migration;
pub mod repositories;

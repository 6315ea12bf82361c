//! Database layer for mindbloom
//!
//! Local SQLite stand-in for the hosted document store:
//! - Schema migrations
//! - Per-user, newest-first entry queries
//! - Create and hard-delete operations

pub mod repo;
pub mod schema;

pub use repo::Database;

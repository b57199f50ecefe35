//! Settings store for rewind
//!
//! This module provides per-user settings storage using SQLite with:
//! - Schema migrations
//! - Repository pattern for queries
//! - Load-or-create semantics for first-contact users

pub mod repo;
pub mod schema;

pub use repo::Database;

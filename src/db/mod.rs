//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool setup, seeding, and the attempt log

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{AttemptLog, Comment, Product, User};
pub use schema::SQLITE_INIT;
pub use sqlite::{LabStorage, SqlitePool, connect};

//! Data models
//!
//! Row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).
//! `*Record` types are the complete values written to storage.

pub mod appointment;
pub mod department;
pub mod employee;

// Re-exports
pub use appointment::*;
pub use department::*;
pub use employee::*;

//! Relational notices storage.
//!
//! Production runs against the crawler's MySQL database; tests use a SQLite
//! file. Both go through sqlx's `Any` driver so one query serves both.

pub mod notice;

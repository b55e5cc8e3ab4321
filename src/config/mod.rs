//! Configuration management.
//!
//! All runtime configuration is environment-driven; `database` owns the
//! connection string, connection setup, and schema creation.

pub mod database;

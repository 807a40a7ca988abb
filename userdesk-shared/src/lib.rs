//! # userdesk Shared Library
//!
//! Data layer used by the userdesk API server.
//!
//! ## Module Organization
//!
//! - `db`: MySQL connection pool management
//! - `models`: Database models and their SQL statements
//! - `narrowing`: Identifier narrowing at the JSON boundary

pub mod db;
pub mod models;
pub mod narrowing;

/// Current version of the userdesk shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

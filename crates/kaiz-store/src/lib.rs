//! Kaiz Store - SQLite persistence for visit records
//!
//! Provides:
//! - Connection management and pragmas
//! - Embedded, checksummed schema migrations
//! - `VisitStore`: create, partial update and ordered queries over visits

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::VisitStore;

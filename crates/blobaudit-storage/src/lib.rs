//! Storage layer for blobaudit
//!
//! This crate provides:
//! - Schema creation for the `BlobAudit` table
//! - Audit row inserts and queries
//! - Scoped per-invocation store sessions (SQLite via sqlx)

pub mod error;
pub mod recorder;
pub mod schema;
pub mod session;
mod tx;

pub use error::{Result, StorageError};
pub use schema::TABLE_NAME;
pub use session::{AuditSession, SqliteConnector, SqliteSession, StoreConnector};

//! Blob ingest pipeline for blobaudit
//!
//! One invocation per uploaded blob: ensure the audit table, classify the
//! blob, record the audit row, then report the running total.

pub mod error;
pub mod handler;

pub use error::{Fault, Result};
pub use handler::{BlobIngestHandler, IngestReport, require_connection_string};

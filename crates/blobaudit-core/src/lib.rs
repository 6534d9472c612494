//! Core domain models for blobaudit
//!
//! This crate contains:
//! - The blob event handed over by the trigger runtime
//! - Audit record models (stored rows and insert payloads)
//! - Content-type classification by file extension

pub mod content_type;
pub mod error;
pub mod event;
pub mod record;

pub use content_type::{DEFAULT_CONTENT_TYPE, classify, extension};
pub use error::{Error, Result};
pub use event::BlobEvent;
pub use record::{AuditRecord, AuditStatus, NewAuditRecord};

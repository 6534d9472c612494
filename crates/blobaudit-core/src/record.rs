use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::content_type::classify;
use crate::error::{Error, Result};
use crate::event::BlobEvent;

/// Processing status stored with each audit row.
///
/// Every ingested blob is written as `Processed`; the enum keeps the
/// `Status` column's text in one place instead of a loose string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AuditStatus {
    #[default]
    Processed,
}

impl AuditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditStatus::Processed => "Processed",
        }
    }
}

impl std::fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of the `BlobAudit` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: i64,
    pub blob_name: String,
    pub blob_size: i64,
    #[serde(with = "time::serde::timestamp")]
    pub processed_at: OffsetDateTime,
    pub content_type: String,
    pub status: String,
}

/// Insert payload; `Id` and `ProcessedAt` are assigned by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditRecord {
    pub blob_name: String,
    pub blob_size: i64,
    pub content_type: String,
    pub status: AuditStatus,
}

impl NewAuditRecord {
    pub fn new(blob_name: impl Into<String>, blob_size: i64, content_type: impl Into<String>) -> Self {
        Self {
            blob_name: blob_name.into(),
            blob_size,
            content_type: content_type.into(),
            status: AuditStatus::default(),
        }
    }

    /// Build the audit entry for an event, classifying its content type
    pub fn for_event(event: &BlobEvent) -> Result<Self> {
        let blob_size =
            i64::try_from(event.length).map_err(|_| Error::SizeOutOfRange(event.length))?;
        Ok(Self::new(event.name.clone(), blob_size, classify(&event.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_event() {
        let event = BlobEvent::new("invoice-2024.edi", Vec::new()).with_length(4096);
        let record = NewAuditRecord::for_event(&event).unwrap();
        assert_eq!(record.blob_name, "invoice-2024.edi");
        assert_eq!(record.blob_size, 4096);
        assert_eq!(record.content_type, "application/edi");
        assert_eq!(record.status, AuditStatus::Processed);
    }

    #[test]
    fn test_size_out_of_range() {
        let event = BlobEvent::new("huge.bin", Vec::new()).with_length(u64::MAX);
        assert!(matches!(
            NewAuditRecord::for_event(&event),
            Err(Error::SizeOutOfRange(u64::MAX))
        ));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(AuditStatus::Processed.to_string(), "Processed");
        assert_eq!(AuditStatus::default().as_str(), "Processed");
    }
}

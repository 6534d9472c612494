use blobaudit_config::{CONNECTION_STRING_ENV, StoreConfig};
use blobaudit_core::{BlobEvent, NewAuditRecord};
use blobaudit_storage::{AuditSession, SqliteConnector, StoreConnector};
use tracing::{debug, error, info, warn};

use crate::{Fault, Result};

/// Outcome of a successful invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub record_id: i64,
    pub content_type: String,
    pub total_records: i64,
}

/// Records one audit row per uploaded blob.
///
/// Holds no per-invocation state; every `handle` call opens its own session
/// and releases it before returning.
pub struct BlobIngestHandler<C = SqliteConnector> {
    connector: C,
}

impl BlobIngestHandler<SqliteConnector> {
    pub fn sqlite() -> Self {
        Self::new(SqliteConnector::new())
    }
}

impl Default for BlobIngestHandler<SqliteConnector> {
    fn default() -> Self {
        Self::sqlite()
    }
}

impl<C: StoreConnector> BlobIngestHandler<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub async fn handle(&self, event: BlobEvent, config: &StoreConfig) -> Result<IngestReport> {
        info!(blob = %event.name, size = event.length, "Blob ingest started");
        debug!(bytes = event.content_len(), "Read blob content");

        let result = self.run(&event, config).await;

        match &result {
            Ok(report) => info!(
                blob = %event.name,
                id = report.record_id,
                content_type = %report.content_type,
                total = report.total_records,
                "Blob ingest completed"
            ),
            Err(fault) => error!(
                blob = %event.name,
                kind = fault.kind(),
                error = %fault,
                "Blob ingest failed"
            ),
        }
        result
    }

    async fn run(&self, event: &BlobEvent, config: &StoreConfig) -> Result<IngestReport> {
        require_connection_string(config)?;

        let mut session = self.connector.connect(config).await?;
        let outcome = record(session.as_mut(), event).await;

        // Release failures are logged only; they never replace the outcome
        if let Err(err) = session.close().await {
            warn!(error = %err, "Failed to release audit store connection");
        }

        outcome
    }
}

/// The configured connection string, or a configuration fault when absent
pub fn require_connection_string(config: &StoreConfig) -> Result<&str> {
    config
        .connection_string()
        .ok_or_else(|| Fault::Config(format!("{CONNECTION_STRING_ENV} is not configured")))
}

async fn record(session: &mut dyn AuditSession, event: &BlobEvent) -> Result<IngestReport> {
    session.ensure_schema().await?;

    let record = NewAuditRecord::for_event(event)?;
    let record_id = session.record_audit(&record).await?;

    let total_records = session.count_all().await?;
    info!(total = total_records, "Total files processed so far");

    Ok(IngestReport {
        record_id,
        content_type: record.content_type,
        total_records,
    })
}

//! Scoped per-invocation store sessions

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use blobaudit_config::StoreConfig;
use blobaudit_core::{AuditRecord, NewAuditRecord};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sqlx::{ConnectOptions, Connection, SqliteConnection};

use crate::{Result, StorageError, recorder, schema};

/// One exclusive connection to the audit store.
///
/// Dropping a session releases the connection; `close` does the same but
/// reports failures.
#[async_trait]
pub trait AuditSession: Send {
    /// Create the audit table if missing; `true` when it was created
    async fn ensure_schema(&mut self) -> Result<bool>;

    /// Insert and commit one audit row, returning its id
    async fn record_audit(&mut self, record: &NewAuditRecord) -> Result<i64>;

    async fn count_all(&mut self) -> Result<i64>;

    async fn recent(&mut self, limit: u32) -> Result<Vec<AuditRecord>>;

    /// Release the connection
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Opens sessions against the audit store
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self, config: &StoreConfig) -> Result<Box<dyn AuditSession>>;
}

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connector for SQLite connection strings (`sqlite://path`, `sqlite::memory:`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteConnector;

impl SqliteConnector {
    pub fn new() -> Self {
        Self
    }

    pub async fn open(&self, config: &StoreConfig) -> Result<SqliteSession> {
        let url = config
            .connection_string()
            .ok_or(StorageError::NotConfigured)?;

        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // Concurrent invocations may contend on the same database file
            .busy_timeout(BUSY_TIMEOUT);

        if !url.contains(":memory:") {
            if let Some(parent) = options.get_filename().parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::debug!(
            timeout_secs = config.connect_timeout_secs,
            "Connecting to audit store"
        );
        let timeout = Duration::from_secs(config.connect_timeout_secs);
        let conn = tokio::time::timeout(timeout, options.connect())
            .await
            .map_err(|_| StorageError::ConnectTimeout(config.connect_timeout_secs))??;
        tracing::info!("Connected to audit store");

        Ok(SqliteSession { conn })
    }
}

#[async_trait]
impl StoreConnector for SqliteConnector {
    async fn connect(&self, config: &StoreConfig) -> Result<Box<dyn AuditSession>> {
        let session = self.open(config).await?;
        Ok(Box::new(session))
    }
}

pub struct SqliteSession {
    conn: SqliteConnection,
}

impl SqliteSession {
    /// Direct access to the underlying connection
    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}

#[async_trait]
impl AuditSession for SqliteSession {
    async fn ensure_schema(&mut self) -> Result<bool> {
        schema::ensure(&mut self.conn).await
    }

    async fn record_audit(&mut self, record: &NewAuditRecord) -> Result<i64> {
        recorder::record_audit(&mut self.conn, record).await
    }

    async fn count_all(&mut self) -> Result<i64> {
        recorder::count_all(&mut self.conn).await
    }

    async fn recent(&mut self, limit: u32) -> Result<Vec<AuditRecord>> {
        recorder::recent(&mut self.conn, limit).await
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.conn.close().await?;
        tracing::debug!("Released audit store connection");
        Ok(())
    }
}

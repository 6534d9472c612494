//! Create-if-absent schema management for the audit table

use sqlx::SqliteConnection;

use crate::Result;
use crate::tx;

pub const TABLE_NAME: &str = "BlobAudit";

const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS BlobAudit (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    BlobName VARCHAR(500) CHECK (length(BlobName) <= 500),
    BlobSize BIGINT,
    ProcessedAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    ContentType VARCHAR(100) CHECK (length(ContentType) <= 100),
    Status VARCHAR(50) DEFAULT 'Processed' CHECK (length(Status) <= 50)
)
"#;

/// Make sure the audit table exists, creating it when missing.
///
/// Returns `true` when this call created the table. Safe to run on every
/// invocation. Creation runs under the write lock, so concurrent first uses
/// queue on the busy timeout and all but one find the table already there.
pub async fn ensure(conn: &mut SqliteConnection) -> Result<bool> {
    if table_exists(conn).await? {
        tracing::debug!(table = TABLE_NAME, "Audit table already present");
        return Ok(false);
    }

    tx::begin_immediate(conn).await?;
    let result = create_if_missing(conn).await;
    let created = tx::finish(conn, result).await?;

    if created {
        tracing::info!(table = TABLE_NAME, "Created audit table");
    } else {
        tracing::debug!(table = TABLE_NAME, "Audit table created concurrently");
    }
    Ok(created)
}

async fn create_if_missing(conn: &mut SqliteConnection) -> Result<bool> {
    if table_exists(conn).await? {
        return Ok(false);
    }
    sqlx::query(CREATE_TABLE_SQL).execute(&mut *conn).await?;
    Ok(true)
}

/// Check the store catalog for the audit table
pub async fn table_exists(conn: &mut SqliteConnection) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)",
    )
    .bind(TABLE_NAME)
    .fetch_one(&mut *conn)
    .await?;
    Ok(exists)
}

/// Column names of the audit table, in declaration order
pub async fn columns(conn: &mut SqliteConnection) -> Result<Vec<String>> {
    let rows: Vec<(i32, String, String, i32, Option<String>, i32)> =
        sqlx::query_as("PRAGMA table_info(BlobAudit)")
            .fetch_all(&mut *conn)
            .await?;
    Ok(rows.into_iter().map(|(_, name, _, _, _, _)| name).collect())
}

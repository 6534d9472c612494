//! Audit row inserts and queries

use blobaudit_core::{AuditRecord, NewAuditRecord};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use time::PrimitiveDateTime;

use crate::Result;
use crate::tx;

/// Insert one audit row and commit it. Returns the new row id.
pub async fn record_audit(conn: &mut SqliteConnection, record: &NewAuditRecord) -> Result<i64> {
    tx::begin_immediate(conn).await?;
    let result = insert(conn, record).await;
    let id = tx::finish(conn, result).await?;

    tracing::info!(id, blob = %record.blob_name, "Inserted audit record");
    Ok(id)
}

async fn insert(conn: &mut SqliteConnection, record: &NewAuditRecord) -> Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO BlobAudit (BlobName, BlobSize, ContentType, Status)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&record.blob_name)
    .bind(record.blob_size)
    .bind(&record.content_type)
    .bind(record.status.as_str())
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();
    Ok(id)
}

/// Total number of audit rows
pub async fn count_all(conn: &mut SqliteConnection) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM BlobAudit")
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

/// Most recent audit rows, newest first
pub async fn recent(conn: &mut SqliteConnection, limit: u32) -> Result<Vec<AuditRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT Id, BlobName, BlobSize, ProcessedAt, ContentType, Status
        FROM BlobAudit
        ORDER BY Id DESC
        LIMIT ?
        "#,
    )
    .bind(i64::from(limit))
    .fetch_all(&mut *conn)
    .await?;

    rows.iter().map(row_to_record).collect()
}

fn row_to_record(row: &SqliteRow) -> Result<AuditRecord> {
    // CURRENT_TIMESTAMP is always UTC
    let processed_at: PrimitiveDateTime = row.try_get("ProcessedAt")?;

    Ok(AuditRecord {
        id: row.try_get("Id")?,
        blob_name: row.try_get("BlobName")?,
        blob_size: row.try_get("BlobSize")?,
        processed_at: processed_at.assume_utc(),
        content_type: row.try_get("ContentType")?,
        status: row.try_get("Status")?,
    })
}

//! Write transactions that take the database write lock up front

use sqlx::SqliteConnection;

use crate::Result;

/// Start a transaction holding the write lock.
///
/// A deferred transaction that reads before writing cannot wait out a
/// concurrent writer; `BEGIN IMMEDIATE` blocks on the busy timeout instead.
pub(crate) async fn begin_immediate(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;
    Ok(())
}

/// Commit on success, roll back on failure. A failed rollback never replaces
/// the original error.
pub(crate) async fn finish<T>(conn: &mut SqliteConnection, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            sqlx::query("COMMIT").execute(&mut *conn).await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback) = sqlx::query("ROLLBACK").execute(&mut *conn).await {
                tracing::warn!(error = %rollback, "Failed to roll back transaction");
            }
            Err(err)
        }
    }
}

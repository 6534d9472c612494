use anyhow::Result;
use blobaudit_config::StoreConfig;
use blobaudit_engine::require_connection_string;
use blobaudit_storage::{AuditSession, SqliteConnector, SqliteSession, schema};
use time::OffsetDateTime;
use time::macros::format_description;

/// Open a session for read-only commands. `None` when the audit table does
/// not exist yet; the store is never modified.
async fn open_existing(config: &StoreConfig) -> Result<Option<SqliteSession>> {
    require_connection_string(config)?;
    let mut session = SqliteConnector::new().open(config).await?;
    if schema::table_exists(session.connection()).await? {
        Ok(Some(session))
    } else {
        Box::new(session).close().await?;
        Ok(None)
    }
}

fn report_missing_table() {
    println!(
        "No audit table {} yet. Ingest a blob or run `blobaudit init`.",
        schema::TABLE_NAME
    );
}

/// Total audit rows, or `None` when the table does not exist
async fn total(config: &StoreConfig) -> Result<Option<i64>> {
    let Some(mut session) = open_existing(config).await? else {
        return Ok(None);
    };
    let total = session.count_all().await?;
    Box::new(session).close().await?;
    Ok(Some(total))
}

pub async fn count(config: &StoreConfig) -> Result<()> {
    match total(config).await? {
        Some(total) => println!("{}", total),
        None => report_missing_table(),
    }
    Ok(())
}

pub async fn list(config: &StoreConfig, limit: u32, json: bool) -> Result<()> {
    let Some(mut session) = open_existing(config).await? else {
        report_missing_table();
        return Ok(());
    };
    let records = session.recent(limit).await?;
    Box::new(session).close().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No blobs recorded yet.");
        return Ok(());
    }

    println!(
        "{:<6} {:<20} {:>12} {:<18} {:<10} NAME",
        "ID", "PROCESSED AT", "SIZE", "CONTENT TYPE", "STATUS"
    );
    for record in &records {
        println!(
            "{:<6} {:<20} {:>12} {:<18} {:<10} {}",
            record.id,
            format_timestamp(record.processed_at)?,
            record.blob_size,
            record.content_type,
            record.status,
            record.blob_name
        );
    }
    Ok(())
}

pub async fn init(config: &StoreConfig) -> Result<()> {
    require_connection_string(config)?;
    let mut session = SqliteConnector::new().open(config).await?;
    let created = session.ensure_schema().await?;
    let columns = schema::columns(session.connection()).await?;
    Box::new(session).close().await?;

    if created {
        println!("✓ Created table {}", schema::TABLE_NAME);
    } else {
        println!("✓ Table {} already exists", schema::TABLE_NAME);
    }
    println!("  Columns: {}", columns.join(", "));
    Ok(())
}

fn format_timestamp(at: OffsetDateTime) -> Result<String> {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    Ok(at.format(&format)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn temp_config(dir: &tempfile::TempDir) -> StoreConfig {
        StoreConfig::new(format!("sqlite://{}", dir.path().join("audit.db").display()))
    }

    async fn table_exists(config: &StoreConfig) -> bool {
        let mut session = SqliteConnector::new().open(config).await.unwrap();
        schema::table_exists(session.connection()).await.unwrap()
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(datetime!(2024-01-02 03:04:05 UTC)).unwrap(),
            "2024-01-02 03:04:05"
        );
    }

    #[tokio::test]
    async fn test_read_commands_do_not_create_table() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);

        assert_eq!(total(&config).await.unwrap(), None);
        count(&config).await.unwrap();
        list(&config, 10, false).await.unwrap();

        assert!(!table_exists(&config).await);
    }

    #[tokio::test]
    async fn test_count_after_init() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);

        init(&config).await.unwrap();
        assert!(table_exists(&config).await);
        assert_eq!(total(&config).await.unwrap(), Some(0));
    }

    #[tokio::test]
    async fn test_missing_connection_string() {
        let err = count(&StoreConfig::default()).await.unwrap_err();
        assert!(err.to_string().contains("SQLConnectionString"));
    }
}

use anyhow::{Context, Result};
use blobaudit_config::StoreConfig;
use blobaudit_core::BlobEvent;
use blobaudit_engine::BlobIngestHandler;
use std::path::PathBuf;

pub async fn handle(
    file: PathBuf,
    name: Option<String>,
    length: Option<u64>,
    config: &StoreConfig,
) -> Result<()> {
    let content = tokio::fs::read(&file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let name = name.unwrap_or_else(|| file.display().to_string());
    let mut event = BlobEvent::new(name.clone(), content);
    if let Some(length) = length {
        event = event.with_length(length);
    }

    let report = BlobIngestHandler::sqlite().handle(event, config).await?;

    println!("✓ Recorded blob: {}", name);
    println!("  ID: {}", report.record_id);
    println!("  Content type: {}", report.content_type);
    println!("  Total records: {}", report.total_records);
    Ok(())
}

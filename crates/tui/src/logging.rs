use std::{fs::OpenOptions, sync::Arc};

use crate::{config::AppConfig, error::Result};

/// Sends `tracing` output to the log file; stdout belongs to the UI.
pub fn init(config: &AppConfig) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "sheetbook_tui={level},api_types={level}",
            level = config.log_level
        ))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

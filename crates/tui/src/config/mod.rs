use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Spreadsheet web-app endpoint; reads and writes share this URL.
    pub api_url: String,
    /// When set, the session credential survives restarts in this file.
    pub session_file: Option<String>,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:3000/exec".to_string(),
            session_file: None,
            log_file: "sheetbook_tui.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "sheetbook_tui", disable_version_flag = true)]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the endpoint URL.
    #[arg(long)]
    api_url: Option<String>,
    /// Keep the session credential in this file (the password is never read from CLI).
    #[arg(long)]
    session_file: Option<String>,
    /// Override the log file path.
    #[arg(long)]
    log_file: Option<String>,
    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    load_from(Args::parse())
}

pub fn load_from(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SHEETBOOK_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    if let Some(session_file) = args.session_file {
        settings.session_file = Some(session_file);
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}

use sheetbook_tui::{app, config, error::Result, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config)?;
    tracing::info!(api_url = config.api_url.as_str(), "starting");

    let mut app = app::App::new(&config)?;
    app.run().await?;
    Ok(())
}

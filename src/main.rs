use anyhow::Context;
use chatline::{app, config, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = config::load().context("Failed to load configuration")?;

    let log_dir = logging::log_directory()?;
    let _logger = logging::init(&config.log_level, &log_dir)
        .with_context(|| format!("Failed to start logging in {}", log_dir.display()))?;
    log::info!("Starting chatline against {}", config.endpoint);

    app::run(config).await?;

    log::info!("Session ended");
    Ok(())
}

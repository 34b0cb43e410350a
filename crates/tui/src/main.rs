mod app;
mod config;
mod error;
mod ui;

use std::{fs::OpenOptions, path::Path, sync::Mutex};

use crate::{config::AppConfig, error::Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_logging(&config)?;
    tracing::info!(base_url = %config.base_url, "starting fintrack_tui");

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}

/// The terminal owns stdout, so logs go to a file.
fn init_logging(config: &AppConfig) -> Result<()> {
    let path = Path::new(&config.log_file);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "fintrack_tui={level},client={level}",
            level = config.log_level
        ))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

mod app;
mod error;
mod fixtures;
mod paths;
mod settings;
mod terminal;

use std::fs::{self, File};

use log::info;
use simplelog::{Config, WriteLogger};

use crate::app::App;
use crate::error::AppError;
use crate::settings::Settings;

/// Send logs to `latest.log` in the cache directory, archiving the
/// previous run's log. Without a cache directory nothing is logged.
fn init_logging(settings: &Settings) -> Result<(), AppError> {
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    paths::rotate_logs();

    let log_file = File::create(&path)?;
    WriteLogger::init(settings.level_filter()?, Config::default(), log_file)?;
    info!("Logging to {}", path.display());
    Ok(())
}

async fn run() -> Result<(), AppError> {
    let settings = Settings::load()?;
    init_logging(&settings)?;
    info!("Starting with {:?}", settings);
    App::new(&settings).run().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

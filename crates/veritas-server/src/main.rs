//! `veritas` binary: the HTTP server and account administration.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use veritas_core::logging::init_tracing;
use veritas_core::{IVeritasStorage, VeritasConfig};
use veritas_detect::ImageDetector;
use veritas_server::cli::{run_user_command, Cli, Command};
use veritas_server::{run, AppState};
use veritas_storage::StorageEngine;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = VeritasConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(&config.logging);

    let storage = StorageEngine::open(
        std::path::Path::new(&config.storage.db_path),
        config.storage.read_pool_size,
    )
    .with_context(|| format!("opening database {}", config.storage.db_path))?;

    match cli.command {
        Command::Serve => {
            let detector =
                ImageDetector::from_config(&config.detector).context("building image detector")?;
            let storage: Arc<dyn IVeritasStorage> = Arc::new(storage);
            let state = AppState::new(storage, Arc::new(detector), &config);
            run(config, state).await.context("HTTP server failed")?;
        }
        Command::User(command) => {
            let mut stdout = std::io::stdout().lock();
            run_user_command(&storage, &command, &mut stdout)?;
        }
    }
    Ok(())
}

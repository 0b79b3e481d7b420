//! Binary entry point: load configuration, connect, migrate, serve.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use agro_catalog::config::AppConfig;
use agro_catalog::server::{AppState, serve};
use agro_catalog::storage::HttpStorage;
use agro_catalog::{database, logging};

#[derive(Parser)]
#[command(name = "agro-catalog", version, about = "Agro catalog admin backend")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let db = database::connect(&config.database).await?;
    database::run_migrations(&db).await?;
    tracing::info!(url = %config.database.url, "database ready");

    let http = reqwest::Client::new();
    let storage = Arc::new(HttpStorage::new(http.clone(), &config.storage));
    let state = AppState::new(config, db, storage, http);

    serve(state).await
}

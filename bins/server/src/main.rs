//! Cash-flow statement server
//!
//! Main entry point for the upload/download web service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cashflow_api::{AppState, create_router};
use cashflow_core::Pipeline;
use cashflow_core::classify::ClassificationRules;
use cashflow_core::ingest::ReportingPeriod;
use cashflow_core::storage::{StagingStore, StorageConfig};
use cashflow_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cashflow=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let rules = match &config.classification.rules_path {
        Some(path) => ClassificationRules::from_file(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        None => ClassificationRules::default(),
    };
    info!(rules = rules.rules.len(), "Classification rules loaded");

    let pipeline = Pipeline::new(ReportingPeriod::from(&config.reporting), rules);

    std::fs::create_dir_all(&config.staging.root).with_context(|| {
        format!(
            "Failed to create staging directory {}",
            config.staging.root.display()
        )
    })?;
    let staging = StagingStore::from_config(StorageConfig::from(&config.staging))?;
    info!(
        provider = staging.provider_name(),
        root = %config.staging.root.display(),
        retention_secs = config.staging.retention_secs,
        "Staging area configured"
    );

    let state = AppState::new(pipeline, staging, config.staging.max_upload_bytes);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

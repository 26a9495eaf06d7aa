//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the CHW diagnosis REST API on its own.
//!
//! ## Intended use
//! Useful for development and debugging when you only want the REST server (with OpenAPI/Swagger
//! UI) and not the workspace's main `chw-run` binary.

use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use chw_core::config::{
    outbreak_context_from_env_value, resolve_catalog_dir, season_month_from_env_value,
};
use chw_core::{CoreConfig, DiagnosisEngine, KnowledgeBase};

/// Main entry point for the CHW REST API server
///
/// # Environment Variables
/// - `CHW_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `CHW_CATALOG_DIR`: Directory with replacement catalog YAML files (optional)
/// - `CHW_SEASON_MONTH`: Fixed month 1-12 for the seasonal rule (optional)
/// - `CHW_OUTBREAK_CONTEXT`: Default outbreak-context flag (default: true)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - configuration values are invalid or the catalog cannot be loaded,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("chw_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("CHW_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting CHW REST API on {}", addr);

    let catalog_dir =
        resolve_catalog_dir(std::env::var("CHW_CATALOG_DIR").ok().map(PathBuf::from))?;
    let season_month = season_month_from_env_value(std::env::var("CHW_SEASON_MONTH").ok())?;
    let include_outbreak_context =
        outbreak_context_from_env_value(std::env::var("CHW_OUTBREAK_CONTEXT").ok())?;

    let cfg = Arc::new(CoreConfig::new(
        season_month,
        catalog_dir,
        include_outbreak_context,
    )?);
    let kb = Arc::new(KnowledgeBase::load(cfg.catalog_dir())?);
    let engine = DiagnosisEngine::with_in_memory_feedback(cfg, kb);

    let app = router(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

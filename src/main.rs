use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use chw_core::config::{
    outbreak_context_from_env_value, resolve_catalog_dir, season_month_from_env_value,
};
use chw_core::{CoreConfig, DiagnosisEngine, KnowledgeBase};

/// Main entry point for the CHW diagnosis service
///
/// Loads configuration and the knowledge base once, then serves the REST API.
///
/// # Environment Variables
/// - `CHW_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CHW_CATALOG_DIR`: Directory with replacement catalog YAML files (optional)
/// - `CHW_SEASON_MONTH`: Fixed month 1-12 for the seasonal rule (optional)
/// - `CHW_OUTBREAK_CONTEXT`: Default outbreak-context flag for requests (default: true)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, catalog loading or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("chw=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("CHW_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

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

    tracing::info!("++ Starting CHW REST on {}", rest_addr);

    let rest_app = router(AppState::new(engine));
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, rest_app).await?;

    Ok(())
}

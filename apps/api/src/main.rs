mod analysis;
mod config;
mod errors;
mod jobs;
mod routes;
mod search;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::analyzer::TextAnalyzer;
use crate::analysis::rules::ClassifierRules;
use crate::config::Config;
use crate::jobs::aggregator::JobAggregator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Finder API v{}", env!("CARGO_PKG_VERSION"));

    // Classifier registries: built-in tables unless a rules file is configured
    let rules = match &config.classifier_rules_path {
        Some(path) => {
            info!("Loading classifier rules from {}", path.display());
            ClassifierRules::from_json_file(path)?
        }
        None => ClassifierRules::default(),
    };
    info!(
        "Classifier ready: {} roles, {} skills, {} stop words",
        rules.roles.len(),
        rules.skills.len(),
        rules.stop_words.len()
    );
    let analyzer = TextAnalyzer::new(rules);

    let aggregator =
        JobAggregator::from_config(&config).context("Failed to initialize job sources")?;
    info!("Job sources: {}", aggregator.source_names().join(", "));

    let state = AppState {
        analyzer: Arc::new(analyzer),
        aggregator: Arc::new(aggregator),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

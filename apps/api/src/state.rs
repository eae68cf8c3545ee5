use std::sync::Arc;

use crate::analysis::analyzer::TextAnalyzer;
use crate::jobs::aggregator::JobAggregator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<TextAnalyzer>,
    /// Remote source (when enabled) followed by synthetic filler.
    pub aggregator: Arc<JobAggregator>,
}

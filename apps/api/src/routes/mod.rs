pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::search::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/analyze", post(handlers::handle_analyze))
        .route("/api/analyze-text", post(handlers::handle_analyze_text))
        .route("/api/analyze-resume", post(handlers::handle_analyze_resume))
        .route("/api/search-jobs", post(handlers::handle_search_jobs))
        .with_state(state)
}

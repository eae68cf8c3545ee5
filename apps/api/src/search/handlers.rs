//! Axum route handlers for query analysis and job search.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::analyzer::AnalysisResult;
use crate::errors::AppError;
use crate::jobs::models::JobListing;
use crate::search::resume::{extract_text, ResumeFormat, RESUME_FIELD};
use crate::state::AppState;

const LOCATION_FIELD: &str = "location";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeTextResponse {
    pub query: String,
    pub analysis: AnalysisResult,
    pub search_keywords: String,
    pub jobs: Vec<JobListing>,
    pub total_jobs: usize,
}

#[derive(Debug, Deserialize)]
pub struct SearchJobsRequest {
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct SearchJobsResponse {
    pub keywords: String,
    pub location: String,
    pub jobs: Vec<JobListing>,
    pub total_jobs: usize,
}

fn require_text<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed)
}

/// Analysis, keyword derivation and aggregation shared by the text and resume flows.
async fn analyze_and_search(state: &AppState, query: &str, location: &str) -> AnalyzeTextResponse {
    let analysis = state.analyzer.analyze(query).await;
    let search_keywords = analysis.search_keywords();

    let jobs = state.aggregator.search(&search_keywords, location).await;

    AnalyzeTextResponse {
        query: query.to_string(),
        analysis,
        search_keywords,
        total_jobs: jobs.len(),
        jobs,
    }
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart body: {e}"))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze
///
/// Classification only: roles, skills, preferences and confidence for a query.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let query = require_text(&request.query, "query")?;
    Ok(Json(state.analyzer.analyze(query).await))
}

/// POST /api/analyze-text
///
/// Full pipeline: analyze the query, derive search keywords, aggregate listings.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalyzeTextResponse>, AppError> {
    require_text(&request.query, "query")?;

    Ok(Json(
        analyze_and_search(&state, &request.query, request.location.trim()).await,
    ))
}

/// POST /api/analyze-resume
///
/// Multipart upload: a `resume` file (PDF or TXT) and an optional `location` text
/// field. The extracted text goes through the same pipeline as `/api/analyze-text`.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeTextResponse>, AppError> {
    let mut upload = None;
    let mut location = String::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let format = ResumeFormat::detect(field.file_name(), field.content_type())
                    .ok_or_else(|| {
                        AppError::Validation(
                            "Unsupported file type, upload a PDF or TXT resume".to_string(),
                        )
                    })?;
                let data = field.bytes().await.map_err(multipart_error)?;
                upload = Some((format, data));
            }
            Some(LOCATION_FIELD) => {
                location = field.text().await.map_err(multipart_error)?;
            }
            _ => {}
        }
    }

    let (format, data) = upload
        .ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;
    if data.is_empty() {
        return Err(AppError::Validation("Uploaded resume is empty".to_string()));
    }

    let text = extract_text(format, data.to_vec()).await?;
    info!("Extracted {} characters from {:?} resume", text.len(), format);

    Ok(Json(analyze_and_search(&state, &text, location.trim()).await))
}

/// POST /api/search-jobs
///
/// Direct keyword search, bypassing analysis.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Json(request): Json<SearchJobsRequest>,
) -> Result<Json<SearchJobsResponse>, AppError> {
    let keywords = require_text(&request.keywords, "keywords")?;
    let location = request.location.trim();

    let jobs = state.aggregator.search(keywords, location).await;

    Ok(Json(SearchJobsResponse {
        keywords: keywords.to_string(),
        location: location.to_string(),
        total_jobs: jobs.len(),
        jobs,
    }))
}

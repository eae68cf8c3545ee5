//! Job sources — pluggable, trait-based providers of raw listings.
//!
//! The aggregator holds a priority-ordered `Vec<Box<dyn JobSource>>` and isolates
//! each one: a `SourceError` is logged and counted as zero results.

use async_trait::async_trait;
use thiserror::Error;

use crate::jobs::models::JobListing;

pub mod remote_ok;
pub mod synthetic;

pub use remote_ok::RemoteOkSource;
pub use synthetic::SyntheticSource;

/// Failure talking to an external job source. Never surfaced to API callers.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// A provider of job listings. Implement this to add a source without touching
/// the aggregator's merge and dedup logic.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Source label, also used as `JobListing::source`.
    fn name(&self) -> &str;

    async fn fetch(&self, keywords: &str, location: &str) -> Result<Vec<JobListing>, SourceError>;
}

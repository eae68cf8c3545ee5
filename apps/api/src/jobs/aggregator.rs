//! Job aggregator — queries every source in priority order, merges, deduplicates.
//!
//! Source failures are absorbed here: logged at `warn` and counted as zero results.
//! The synthetic source always runs last, so a search never comes back empty.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::config::Config;
use crate::jobs::models::JobListing;
use crate::jobs::sources::{JobSource, RemoteOkSource, SourceError, SyntheticSource};

pub struct JobAggregator {
    sources: Vec<Box<dyn JobSource>>,
}

impl JobAggregator {
    /// Sources are queried in the given order; earlier sources win dedup ties.
    pub fn new(sources: Vec<Box<dyn JobSource>>) -> Self {
        Self { sources }
    }

    /// Remote listings (when enabled) followed by synthetic filler.
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        let mut sources: Vec<Box<dyn JobSource>> = Vec::new();

        if config.remote_jobs.enabled {
            sources.push(Box::new(RemoteOkSource::new(config.remote_jobs.clone())?));
        } else {
            info!("RemoteOK source disabled by configuration");
        }
        sources.push(Box::new(SyntheticSource::new(&config.synthetic_jobs)));

        Ok(Self::new(sources))
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Runs every source, merges in source order and drops duplicate listings.
    pub async fn search(&self, keywords: &str, location: &str) -> Vec<JobListing> {
        info!("Searching jobs for '{keywords}' in '{location}'");

        let mut all_jobs = Vec::new();

        for source in &self.sources {
            match source.fetch(keywords, location).await {
                Ok(jobs) => {
                    info!("Found {} jobs from {}", jobs.len(), source.name());
                    all_jobs.extend(jobs);
                }
                Err(e) => {
                    warn!("Job source {} unavailable: {e}", source.name());
                }
            }
        }

        let unique_jobs = dedupe_listings(all_jobs);
        info!("Total unique jobs found: {}", unique_jobs.len());

        unique_jobs
    }
}

/// Keeps the first listing for each (title, company) key, preserving order.
pub fn dedupe_listings(listings: Vec<JobListing>) -> Vec<JobListing> {
    let mut seen = HashSet::new();
    listings
        .into_iter()
        .filter(|job| seen.insert(job.dedup_key()))
        .collect()
}

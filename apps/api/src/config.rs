use std::path::PathBuf;

use anyhow::{Context, Result};

/// Upper bound on synthetic listings; there are only five templates.
pub const MAX_SYNTHETIC_JOBS: usize = 5;

/// Application configuration loaded from environment variables.
/// Every variable has a default, so a bare environment boots a working server.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON file overriding the built-in classifier registries.
    pub classifier_rules_path: Option<PathBuf>,
    pub remote_jobs: RemoteJobsConfig,
    pub synthetic_jobs: SyntheticJobsConfig,
}

/// Settings for the RemoteOK bulk listing source.
#[derive(Debug, Clone)]
pub struct RemoteJobsConfig {
    pub enabled: bool,
    pub api_url: String,
    pub listing_base_url: String,
    /// Accepted listings kept after filtering.
    pub max_jobs: usize,
    /// Records inspected after the metadata element.
    pub scan_limit: usize,
    pub timeout_secs: u64,
}

impl Default for RemoteJobsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: "https://remoteok.io/api".to_string(),
            listing_base_url: "https://remoteok.io/remote-jobs".to_string(),
            max_jobs: 10,
            scan_limit: 20,
            timeout_secs: 10,
        }
    }
}

/// Settings for the templated filler source.
#[derive(Debug, Clone)]
pub struct SyntheticJobsConfig {
    pub max_jobs: usize,
}

impl Default for SyntheticJobsConfig {
    fn default() -> Self {
        Self {
            max_jobs: MAX_SYNTHETIC_JOBS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let remote_defaults = RemoteJobsConfig::default();

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            classifier_rules_path: std::env::var("CLASSIFIER_RULES_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            remote_jobs: RemoteJobsConfig {
                enabled: parse_env("REMOTE_JOBS_ENABLED", remote_defaults.enabled)?,
                api_url: std::env::var("REMOTE_JOBS_API_URL")
                    .unwrap_or_else(|_| remote_defaults.api_url.clone()),
                max_jobs: parse_env("REMOTE_JOBS_MAX", remote_defaults.max_jobs)?,
                timeout_secs: parse_env("REMOTE_JOBS_TIMEOUT_SECS", remote_defaults.timeout_secs)?,
                ..remote_defaults
            },
            synthetic_jobs: SyntheticJobsConfig {
                max_jobs: parse_env("SYNTHETIC_JOBS_MAX", MAX_SYNTHETIC_JOBS)?
                    .clamp(1, MAX_SYNTHETIC_JOBS),
            },
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

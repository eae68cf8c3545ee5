//! RemoteOK bulk listing source.
//!
//! The endpoint returns a JSON array whose first element is metadata. Only the next
//! `scan_limit` records are inspected; each is kept when any keyword token longer
//! than two characters appears in its position, description or tags.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::RemoteJobsConfig;
use crate::jobs::formatting::{clean_description, format_salary};
use crate::jobs::models::JobListing;
use crate::jobs::sources::{JobSource, SourceError};

pub const SOURCE_NAME: &str = "RemoteOK";
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko)";
const MIN_KEYWORD_CHARS: usize = 3;

/// One job record as RemoteOK publishes it. Everything is optional; salaries and
/// ids arrive as numbers or strings depending on the listing.
#[derive(Debug, Deserialize)]
struct RemoteOkRecord {
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, deserialize_with = "string_tags")]
    tags: Vec<String>,
    #[serde(default)]
    salary_min: Option<Value>,
    #[serde(default)]
    salary_max: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
}

impl RemoteOkRecord {
    fn searchable_text(&self) -> String {
        format!(
            "{} {} {}",
            self.position.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default(),
            self.tags.join(" ")
        )
        .to_lowercase()
    }

    fn into_listing(self, listing_base_url: &str) -> JobListing {
        let salary = format_salary(
            self.salary_min.as_ref().and_then(as_amount),
            self.salary_max.as_ref().and_then(as_amount),
        );
        let id = match &self.id {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        JobListing {
            title: self.position.unwrap_or_else(|| "Unknown Title".to_string()),
            company: self.company.unwrap_or_else(|| "Unknown Company".to_string()),
            location: "Remote".to_string(),
            salary,
            description: clean_description(self.description.as_deref().unwrap_or_default()),
            url: format!("{listing_base_url}/{id}"),
            source: SOURCE_NAME.to_string(),
            posted_date: "Recently".to_string(),
            tags: self.tags,
        }
    }
}

/// Keeps the string tags of a record; anything else in the array is dropped.
fn string_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|tag| match tag {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

/// Salary bound from a JSON number or numeric string.
fn as_amount(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Whitespace tokens of the lowercased keywords long enough to be meaningful.
fn keyword_tokens(keywords: &str) -> Vec<String> {
    keywords
        .to_lowercase()
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_KEYWORD_CHARS)
        .map(str::to_string)
        .collect()
}

fn matches_keywords(record: &RemoteOkRecord, tokens: &[String]) -> bool {
    let text = record.searchable_text();
    tokens.iter().any(|t| text.contains(t.as_str()))
}

/// Applies the metadata skip, scan window, keyword filter and cap to a decoded payload.
pub fn filter_records(
    payload: &[Value],
    keywords: &str,
    config: &RemoteJobsConfig,
) -> Vec<JobListing> {
    let tokens = keyword_tokens(keywords);

    payload
        .iter()
        .skip(1)
        .take(config.scan_limit)
        .filter(|v| v.is_object())
        .filter_map(|v| match RemoteOkRecord::deserialize(v) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipping undecodable RemoteOK record: {e}");
                None
            }
        })
        .filter(|record| matches_keywords(record, &tokens))
        .take(config.max_jobs)
        .map(|record| record.into_listing(&config.listing_base_url))
        .collect()
}

pub struct RemoteOkSource {
    client: Client,
    config: RemoteJobsConfig,
}

impl RemoteOkSource {
    pub fn new(config: RemoteJobsConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl JobSource for RemoteOkSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn fetch(&self, keywords: &str, _location: &str) -> Result<Vec<JobListing>, SourceError> {
        info!("Fetching RemoteOK listings from {}", self.config.api_url);

        let response = self.client.get(&self.config.api_url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SourceError::Status(status.as_u16()));
        }

        let payload: Vec<Value> = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        Ok(filter_records(&payload, keywords, &self.config))
    }
}

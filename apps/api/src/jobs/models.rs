use serde::{Deserialize, Serialize};

/// A normalized job posting, whatever source it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    /// Tag-stripped, at most 300 characters.
    pub description: String,
    pub url: String,
    pub source: String,
    pub posted_date: String,
    pub tags: Vec<String>,
}

/// Identity used for deduplication: (lowercased-trimmed title, lowercased-trimmed company).
pub type DedupKey = (String, String);

impl JobListing {
    pub fn dedup_key(&self) -> DedupKey {
        (
            self.title.trim().to_lowercase(),
            self.company.trim().to_lowercase(),
        )
    }
}

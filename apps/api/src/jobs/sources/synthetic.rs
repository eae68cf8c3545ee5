//! Synthetic source — templated filler postings built from the search keywords.
//!
//! Pure computation, never fails. It anchors the guarantee that a search always
//! returns something, whatever happened to the network sources.

use async_trait::async_trait;
use rand::Rng;

use crate::analysis::text::capitalize;
use crate::config::{SyntheticJobsConfig, MAX_SYNTHETIC_JOBS};
use crate::jobs::formatting::{format_hourly, format_salary};
use crate::jobs::models::JobListing;
use crate::jobs::sources::{JobSource, SourceError};

pub const SOURCE_NAME: &str = "Synthetic";
const DEFAULT_CONCEPT: &str = "Professional";
const DEFAULT_LOCATION: &str = "Various Locations";
const MAX_TAGS: usize = 4;
const CATEGORY_TAG_COUNT: usize = 2;

const CONCEPT_STOP_WORDS: &[&str] = &[
    "looking", "for", "job", "position", "work", "career", "remote", "part", "time", "full",
    "part-time", "full-time",
];

enum SalaryBand {
    Annual(u64, u64),
    Hourly(u64, u64),
}

struct ListingTemplate {
    title: &'static str,
    company: &'static str,
    salary: SalaryBand,
    description: &'static str,
}

/// `{concept}` is replaced by the job concept derived from the keywords.
const TEMPLATES: [ListingTemplate; MAX_SYNTHETIC_JOBS] = [
    ListingTemplate {
        title: "{concept}",
        company: "TechCorp Solutions",
        salary: SalaryBand::Annual(50_000, 80_000),
        description: "Join our team as a {concept}. We offer competitive salary, great benefits, and growth opportunities.",
    },
    ListingTemplate {
        title: "Senior {concept}",
        company: "Innovation Labs",
        salary: SalaryBand::Annual(70_000, 120_000),
        description: "Experienced {concept} needed for exciting projects. Remote work available with flexible schedule.",
    },
    ListingTemplate {
        title: "{concept} - Entry Level",
        company: "StartupXYZ",
        salary: SalaryBand::Annual(40_000, 65_000),
        description: "Great opportunity for new {concept} to learn and grow with our dynamic team.",
    },
    ListingTemplate {
        title: "Freelance {concept}",
        company: "Freelance Network",
        salary: SalaryBand::Hourly(30, 80),
        description: "Flexible {concept} position. Work on your own schedule with multiple clients.",
    },
    ListingTemplate {
        title: "{concept} Specialist",
        company: "MegaCorp Industries",
        salary: SalaryBand::Annual(60_000, 100_000),
        description: "Specialized {concept} role in established company. Excellent benefits package included.",
    },
];

/// Category triggers and the tags they contribute. First matching category wins.
const CATEGORIES: &[(&[&str], &[&str])] = &[
    (
        &["developer", "programming", "software", "tech"],
        &["programming", "software", "development", "coding"],
    ),
    (
        &["nurse", "healthcare", "medical"],
        &["healthcare", "medical", "patient care", "health"],
    ),
    (
        &["manager", "business", "sales"],
        &["business", "management", "strategy", "operations"],
    ),
    (
        &["designer", "artist", "creative"],
        &["creative", "design", "art", "visual"],
    ),
];

/// First two meaningful keyword tokens, capitalized; "Professional" if none survive.
pub fn extract_job_concept(keywords: &str) -> String {
    let words: Vec<String> = keywords
        .split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .filter(|w| !CONCEPT_STOP_WORDS.contains(&w.to_lowercase().as_str()))
        .take(2)
        .map(capitalize)
        .collect();

    if words.is_empty() {
        DEFAULT_CONCEPT.to_string()
    } else {
        words.join(" ")
    }
}

/// Category tags plus arrangement tags, at most four.
pub fn relevant_tags(keywords: &str) -> Vec<String> {
    let lowered = keywords.to_lowercase();
    let mut tags: Vec<String> = CATEGORIES
        .iter()
        .find(|(triggers, _)| triggers.iter().any(|t| lowered.contains(t)))
        .map(|(_, category_tags)| {
            category_tags
                .iter()
                .take(CATEGORY_TAG_COUNT)
                .map(|t| t.to_string())
                .collect()
        })
        .unwrap_or_default();

    if lowered.contains("remote") {
        tags.push("remote".to_string());
    }
    if lowered.contains("part time") || lowered.contains("part-time") {
        tags.push("part-time".to_string());
    }

    tags.truncate(MAX_TAGS);
    tags
}

fn resolve_location(keywords: &str, location: &str) -> String {
    if keywords.to_lowercase().contains("remote") {
        "Remote".to_string()
    } else if location.trim().is_empty() {
        DEFAULT_LOCATION.to_string()
    } else {
        location.trim().to_string()
    }
}

pub struct SyntheticSource {
    max_jobs: usize,
}

impl SyntheticSource {
    pub fn new(config: &SyntheticJobsConfig) -> Self {
        Self {
            max_jobs: config.max_jobs.min(MAX_SYNTHETIC_JOBS),
        }
    }

    /// Builds the templated listings for one search.
    pub fn generate(&self, keywords: &str, location: &str) -> Vec<JobListing> {
        let concept = extract_job_concept(keywords);
        let location = resolve_location(keywords, location);
        let tags = relevant_tags(keywords);
        let mut rng = rand::thread_rng();

        TEMPLATES
            .iter()
            .take(self.max_jobs)
            .enumerate()
            .map(|(i, template)| {
                let salary = match template.salary {
                    SalaryBand::Annual(min, max) => format_salary(Some(min), Some(max)),
                    SalaryBand::Hourly(min, max) => format_hourly(min, max),
                };
                let days_ago: u8 = rng.gen_range(1..=7);

                JobListing {
                    title: template.title.replace("{concept}", &concept),
                    company: template.company.to_string(),
                    location: location.clone(),
                    salary,
                    description: template.description.replace("{concept}", &concept),
                    url: format!("https://example.com/job/{}", i + 1),
                    source: SOURCE_NAME.to_string(),
                    posted_date: format!("{days_ago} days ago"),
                    tags: tags.clone(),
                }
            })
            .collect()
    }
}

#[async_trait]
impl JobSource for SyntheticSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn fetch(&self, keywords: &str, location: &str) -> Result<Vec<JobListing>, SourceError> {
        Ok(self.generate(keywords, location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> SyntheticSource {
        SyntheticSource::new(&SyntheticJobsConfig::default())
    }

    #[test]
    fn test_concept_from_first_two_meaningful_words() {
        assert_eq!(extract_job_concept("looking for dog walker job"), "Dog Walker");
        assert_eq!(extract_job_concept("Software Developer remote part-time"), "Software Developer");
    }

    #[test]
    fn test_concept_default_when_nothing_survives() {
        assert_eq!(extract_job_concept("remote part time job"), "Professional");
        assert_eq!(extract_job_concept("a an to"), "Professional");
    }

    #[test]
    fn test_generates_five_templated_listings() {
        let jobs = source().generate("nurse", "Boston");
        let titles: Vec<&str> = jobs.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Nurse",
                "Senior Nurse",
                "Nurse - Entry Level",
                "Freelance Nurse",
                "Nurse Specialist"
            ]
        );
        assert!(jobs.iter().all(|j| j.location == "Boston"));
        assert!(jobs.iter().all(|j| j.source == "Synthetic"));
        assert_eq!(jobs[4].url, "https://example.com/job/5");
    }

    #[test]
    fn test_salary_bands() {
        let jobs = source().generate("nurse", "");
        assert_eq!(jobs[0].salary, "$50,000 - $80,000");
        assert_eq!(jobs[1].salary, "$70,000 - $120,000");
        assert_eq!(jobs[2].salary, "$40,000 - $65,000");
        assert_eq!(jobs[3].salary, "$30-$80/hour");
        assert_eq!(jobs[4].salary, "$60,000 - $100,000");
    }

    #[test]
    fn test_max_jobs_respected() {
        let source = SyntheticSource::new(&SyntheticJobsConfig { max_jobs: 2 });
        assert_eq!(source.generate("nurse", "").len(), 2);
    }

    #[test]
    fn test_location_resolution() {
        assert_eq!(source().generate("nurse", "")[0].location, "Various Locations");
        assert_eq!(source().generate("remote nurse", "Boston")[0].location, "Remote");
    }

    #[test]
    fn test_posted_date_within_a_week() {
        for job in source().generate("developer", "") {
            let days: u8 = job
                .posted_date
                .strip_suffix(" days ago")
                .and_then(|n| n.parse().ok())
                .expect("posted label");
            assert!((1..=7).contains(&days));
        }
    }

    #[test]
    fn test_tags_by_category() {
        assert_eq!(relevant_tags("software developer"), vec!["programming", "software"]);
        assert_eq!(relevant_tags("nurse"), vec!["healthcare", "medical"]);
        assert_eq!(relevant_tags("sales manager"), vec!["business", "management"]);
        assert_eq!(relevant_tags("graphic designer"), vec!["creative", "design"]);
        assert!(relevant_tags("dog walker").is_empty());
    }

    #[test]
    fn test_tags_include_arrangements_capped() {
        let tags = relevant_tags("remote part-time developer");
        assert_eq!(tags, vec!["programming", "software", "remote", "part-time"]);
        assert!(tags.len() <= 4);
    }

    #[tokio::test]
    async fn test_fetch_never_fails() {
        let jobs = source().fetch("?!", "").await.unwrap();
        assert_eq!(jobs.len(), 5);
        assert_eq!(jobs[0].title, "Professional");
    }
}

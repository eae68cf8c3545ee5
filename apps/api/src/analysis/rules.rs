//! Classifier registries — the data the pattern and fallback phases run over.
//!
//! The built-in tables cover common job families. A deployment can replace them
//! wholesale with a JSON file (see `ClassifierRules::from_json_file`) without
//! touching analyzer logic.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One entry of the role registry: a canonical role and its trigger phrases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRule {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Role registry, skill list and fallback stop words.
///
/// Roles keep registry order so ties in confidence resolve deterministically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierRules {
    pub roles: Vec<RoleRule>,
    pub skills: Vec<String>,
    pub stop_words: HashSet<String>,
}

const DEFAULT_ROLES: &[(&str, &[&str])] = &[
    (
        "Software Developer",
        &[
            "developer",
            "programmer",
            "software engineer",
            "coding",
            "web development",
            "frontend",
            "backend",
            "full stack",
        ],
    ),
    (
        "Data Scientist",
        &[
            "data scientist",
            "data science",
            "machine learning",
            "data analyst",
            "analytics",
            "statistics",
        ],
    ),
    (
        "Nurse",
        &["nurse", "nursing", "registered nurse", "patient care", "clinical"],
    ),
    (
        "Teacher",
        &["teacher", "teaching", "tutor", "educator", "classroom", "instructor"],
    ),
    (
        "Graphic Designer",
        &[
            "graphic design",
            "designer",
            "illustrator",
            "branding",
            "visual design",
            "ui/ux",
        ],
    ),
    (
        "Sales Representative",
        &["sales", "account executive", "business development", "retail"],
    ),
    (
        "Project Manager",
        &["project manager", "project management", "scrum master", "program manager"],
    ),
    (
        "Accountant",
        &["accountant", "accounting", "bookkeeping", "bookkeeper", "auditor", "tax preparation"],
    ),
    (
        "Marketing Specialist",
        &["marketing", "seo", "social media", "content strategy", "digital marketing"],
    ),
    (
        "Customer Service Representative",
        &["customer service", "customer support", "call center", "help desk"],
    ),
    (
        "Writer",
        &["writer", "copywriter", "editor", "content writing", "journalist"],
    ),
];

const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "react",
    "angular",
    "node.js",
    "rust",
    "sql",
    "aws",
    "docker",
    "kubernetes",
    "excel",
    "photoshop",
    "figma",
    "salesforce",
    "tableau",
    "quickbooks",
];

const DEFAULT_STOP_WORDS: &[&str] = &[
    "looking", "for", "job", "jobs", "position", "positions", "work", "career", "remote", "part",
    "time", "full", "want", "need", "seeking", "find", "hiring", "opportunity", "role", "the",
    "and", "with", "near", "any", "some", "new",
];

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            roles: DEFAULT_ROLES
                .iter()
                .map(|(name, keywords)| RoleRule {
                    name: name.to_string(),
                    keywords: keywords.iter().map(|k| k.to_string()).collect(),
                })
                .collect(),
            skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ClassifierRules {
    /// Loads replacement registries from a JSON document.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read classifier rules from {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("Invalid classifier rules in {}", path.display()))
    }

    /// Parses registries and lower-cases every entry so matching against
    /// lowercased text works regardless of how the file was written.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let rules: ClassifierRules = serde_json::from_str(raw)?;
        Ok(rules.normalized())
    }

    fn normalized(self) -> Self {
        Self {
            roles: self
                .roles
                .into_iter()
                .map(|r| RoleRule {
                    name: r.name,
                    keywords: r.keywords.iter().map(|k| k.to_lowercase()).collect(),
                })
                .collect(),
            skills: self.skills.iter().map(|s| s.to_lowercase()).collect(),
            stop_words: self.stop_words.iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}

//! Normalization helpers applied to raw source records.

use lazy_static::lazy_static;
use regex::Regex;

pub const MAX_DESCRIPTION_CHARS: usize = 300;
const TRUNCATION_SUFFIX: &str = "...";
const NO_DESCRIPTION: &str = "No description available";
const NO_SALARY: &str = "Salary not specified";

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]+>").expect("valid regex");
}

/// Renders an integer with comma thousands separators: 1234567 → "1,234,567".
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// "$min - $max", "$min+", or "Salary not specified". A zero bound counts as absent.
pub fn format_salary(min: Option<u64>, max: Option<u64>) -> String {
    let min = min.filter(|v| *v > 0);
    let max = max.filter(|v| *v > 0);

    match (min, max) {
        (Some(lo), Some(hi)) => format!("${} - ${}", format_thousands(lo), format_thousands(hi)),
        (Some(lo), None) => format!("${}+", format_thousands(lo)),
        _ => NO_SALARY.to_string(),
    }
}

/// Hourly band for freelance postings: "$30-$80/hour".
pub fn format_hourly(min: u64, max: u64) -> String {
    format!("${min}-${max}/hour")
}

/// Strips HTML tags, truncates to 300 characters (297 + "...") and trims.
pub fn clean_description(description: &str) -> String {
    if description.is_empty() {
        return NO_DESCRIPTION.to_string();
    }

    let stripped = HTML_TAG.replace_all(description, "");

    let truncated = if stripped.chars().count() > MAX_DESCRIPTION_CHARS {
        let keep = MAX_DESCRIPTION_CHARS - TRUNCATION_SUFFIX.len();
        let mut short: String = stripped.chars().take(keep).collect();
        short.push_str(TRUNCATION_SUFFIX);
        short
    } else {
        stripped.into_owned()
    };

    truncated.trim().to_string()
}

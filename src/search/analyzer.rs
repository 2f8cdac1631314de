use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use url::Url;

use super::codes::WORKPLACE_REMOTE;
use super::types::{SearchParams, SortBy};
use super::url_builder::{
    KEY_EXPERIENCE, KEY_GEO_ID, KEY_JOB_TYPE, KEY_LOCATION, KEY_TIME_POSTED, KEY_WORKPLACE,
};

pub const WARN_INVALID_URL: &str = "Invalid URL format";
pub const WARN_NO_KEYWORDS: &str = "No keywords specified - results may be too broad";
pub const WARN_NO_TIME_FILTER: &str = "No time filter - you may see old job postings";
pub const WARN_SHORT_WINDOW: &str = "Very short time filter may return few results";

pub const SUGGEST_LOCATION: &str = "Consider adding a location or selecting \"Remote\" work type";
pub const SUGGEST_DATE_SORT: &str = "Consider sorting by \"Date Posted\" when using time filters";
pub const SUGGEST_BROADEN: &str = "Try reducing filters or broadening keywords for more results";

/// Coarse estimate of how many postings a search returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultVolume {
    High,
    Medium,
    Low,
}

impl ResultVolume {
    /// Map a specificity score onto a volume bucket
    pub fn from_specificity(score: u32) -> Self {
        if score >= 6 {
            ResultVolume::Low
        } else if score >= 3 {
            ResultVolume::Medium
        } else {
            ResultVolume::High
        }
    }
}

impl fmt::Display for ResultVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResultVolume::High => "high",
            ResultVolume::Medium => "medium",
            ResultVolume::Low => "low",
        })
    }
}

/// Diagnostic report for a generated URL. Always derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlAnalysis {
    pub is_valid: bool,
    pub parameter_count: usize,
    pub has_time_filter: bool,
    pub has_location_filter: bool,
    pub has_experience_filter: bool,
    pub estimated_results: Option<ResultVolume>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl UrlAnalysis {
    fn invalid() -> Self {
        Self {
            is_valid: false,
            parameter_count: 0,
            has_time_filter: false,
            has_location_filter: false,
            has_experience_filter: false,
            estimated_results: None,
            warnings: vec![WARN_INVALID_URL.to_string()],
            suggestions: Vec::new(),
        }
    }
}

/// Inspect a built URL together with the criteria it came from.
///
/// A malformed URL yields a degraded report instead of an error.
pub fn analyze_url(url: &str, params: &SearchParams) -> UrlAnalysis {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return UrlAnalysis::invalid(),
    };

    let keys: HashSet<String> = parsed.query_pairs().map(|(k, _)| k.into_owned()).collect();
    let has = |key: &str| keys.contains(key);

    let has_time_filter = has(KEY_TIME_POSTED);
    let has_location_filter = has(KEY_LOCATION) || has(KEY_GEO_ID);
    let has_experience_filter = has(KEY_EXPERIENCE);
    let has_keywords = params.keywords.as_deref().is_some_and(|k| !k.is_empty());

    let mut specificity = 0;
    if has_keywords {
        specificity += 2;
    }
    if has_location_filter {
        specificity += 1;
    }
    if has_time_filter {
        specificity += 2;
    }
    if has_experience_filter {
        specificity += 1;
    }
    if has(KEY_JOB_TYPE) {
        specificity += 1;
    }
    if has(KEY_WORKPLACE) {
        specificity += 1;
    }
    let estimated = ResultVolume::from_specificity(specificity);

    let mut warnings = Vec::new();
    if !has_keywords {
        warnings.push(WARN_NO_KEYWORDS.to_string());
    }
    if !has_time_filter {
        warnings.push(WARN_NO_TIME_FILTER.to_string());
    }
    if params.custom_hours.is_some_and(|h| h != 0.0 && h < 1.0) {
        warnings.push(WARN_SHORT_WINDOW.to_string());
    }

    let mut suggestions = Vec::new();
    if !has_location_filter && !params.workplace_type.iter().any(|c| c == WORKPLACE_REMOTE) {
        suggestions.push(SUGGEST_LOCATION.to_string());
    }
    if params.sort_by == Some(SortBy::Relevance) && has_time_filter {
        suggestions.push(SUGGEST_DATE_SORT.to_string());
    }
    if estimated == ResultVolume::Low {
        suggestions.push(SUGGEST_BROADEN.to_string());
    }

    UrlAnalysis {
        is_valid: true,
        parameter_count: keys.len(),
        has_time_filter,
        has_location_filter,
        has_experience_filter,
        estimated_results: Some(estimated),
        warnings,
        suggestions,
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::codes::{DEFAULT_WORKPLACE_TYPES, ORIGIN_JOB_SEARCH};

/// Default search radius in miles
pub const DEFAULT_DISTANCE: f64 = 100.0;

/// Result ordering on the job board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    #[serde(rename = "R")]
    Relevance,
    #[default]
    #[serde(rename = "DD")]
    DatePosted,
}

impl SortBy {
    /// Query-string code for this ordering
    pub fn as_code(&self) -> &'static str {
        match self {
            SortBy::Relevance => "R",
            SortBy::DatePosted => "DD",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" | "relevance" => Ok(SortBy::Relevance),
            "DD" | "date" | "date-posted" => Ok(SortBy::DatePosted),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// Search criteria for one job search.
///
/// The generated URL is never stored here; it is derived on every build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Free-text keywords, trimmed before use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Free-text location, trimmed before use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Search radius in miles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Numeric geographic identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_id: Option<String>,
    /// Pre-encoded `r<seconds>` token; wins over `custom_hours`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_posted: Option<String>,
    /// Custom window in hours, used only without `time_posted`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_hours: Option<f64>,
    #[serde(default)]
    pub experience_level: Vec<String>,
    #[serde(default)]
    pub job_type: Vec<String>,
    #[serde(default)]
    pub workplace_type: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_job_id: Option<String>,
    /// Platform tag for where the search came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl SearchParams {
    /// A model with every field unset
    pub fn empty() -> Self {
        Self {
            keywords: None,
            location: None,
            distance: None,
            geo_id: None,
            time_posted: None,
            custom_hours: None,
            experience_level: Vec::new(),
            job_type: Vec::new(),
            workplace_type: Vec::new(),
            sort_by: None,
            current_job_id: None,
            origin: None,
        }
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Keywords as they would be emitted, if any
    pub fn trimmed_keywords(&self) -> Option<&str> {
        non_blank(self.keywords.as_deref())
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            keywords: Some(String::new()),
            location: Some(String::new()),
            distance: Some(DEFAULT_DISTANCE),
            geo_id: Some(String::new()),
            time_posted: Some(String::new()),
            custom_hours: None,
            experience_level: Vec::new(),
            job_type: Vec::new(),
            workplace_type: DEFAULT_WORKPLACE_TYPES.iter().map(|c| c.to_string()).collect(),
            sort_by: Some(SortBy::DatePosted),
            current_job_id: Some(String::new()),
            origin: Some(ORIGIN_JOB_SEARCH.to_string()),
        }
    }
}

/// Trim an optional string, treating blank as absent
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

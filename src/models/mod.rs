use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::search::codes::DEFAULT_WORKPLACE_TYPES;
use crate::search::{SearchParams, SortBy};

/// Default history capacity
pub const DEFAULT_MAX_HISTORY_ITEMS: usize = 100;

/// Fresh id of the form `<prefix>_<uuid>`
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// One executed search, newest first in the history ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub params: SearchParams,
    pub searched_at: DateTime<Utc>,
    /// Never filled in locally; kept so records written by other clients
    /// of the same storage keys load and save without losing the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_found: Option<u64>,
    pub url: String,
}

impl HistoryItem {
    pub fn new(params: SearchParams, url: impl Into<String>) -> Self {
        Self {
            id: new_id("history"),
            params,
            searched_at: Utc::now(),
            results_found: None,
            url: url.into(),
        }
    }
}

/// A named, user-saved search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: String,
    pub name: String,
    pub params: SearchParams,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
    System,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// User preferences, persisted under the `settings` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: Theme,
    pub auto_save_history: bool,
    pub max_history_items: usize,
    pub show_analytics: bool,
    pub default_sort_by: SortBy,
    pub default_workplace_types: Vec<String>,
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            auto_save_history: true,
            max_history_items: DEFAULT_MAX_HISTORY_ITEMS,
            show_analytics: true,
            default_sort_by: SortBy::DatePosted,
            default_workplace_types: DEFAULT_WORKPLACE_TYPES.iter().map(|c| c.to_string()).collect(),
            language: "en".to_string(),
        }
    }
}

/// Partial settings update; absent fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_save_history: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_history_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_analytics: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort_by: Option<SortBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_workplace_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Settings {
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(auto_save) = patch.auto_save_history {
            self.auto_save_history = auto_save;
        }
        if let Some(max) = patch.max_history_items {
            self.max_history_items = max;
        }
        if let Some(show) = patch.show_analytics {
            self.show_analytics = show;
        }
        if let Some(sort_by) = patch.default_sort_by {
            self.default_sort_by = sort_by;
        }
        if let Some(types) = patch.default_workplace_types {
            self.default_workplace_types = types;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
    }
}

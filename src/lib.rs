//! Job search URL builder: turns search form fields into a job-board
//! search URL, analyzes how specific the search is, and keeps a local
//! history and favorites list.

pub mod config;
pub mod debounce;
pub mod error;
pub mod integrations;
pub mod ledger;
pub mod models;
pub mod notifications;
pub mod search;
pub mod storage;
pub mod store;

pub use error::{SearchError, SearchResult};
pub use models::{Favorite, HistoryItem, Settings, SettingsPatch};
pub use search::{analyze_url, build_search_url, parse_search_url, SearchParams, SortBy, UrlAnalysis};
pub use store::{JobSearchStore, SharedStore, StoreOptions};

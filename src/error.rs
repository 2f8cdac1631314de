use thiserror::Error;

use crate::storage::StorageError;

/// Result alias for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors surfaced by the search store and its collaborators
#[derive(Debug, Error)]
pub enum SearchError {
    /// The URL could not be parsed or is not a job search URL
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),

    /// A favorite was saved without a usable name
    #[error("Please provide a name for the favorite search")]
    EmptyFavoriteName,

    /// There is no generated or explicit URL to act on
    #[error("No URL to {0}")]
    NothingToDeliver(&'static str),

    /// The key-value store rejected a read or write
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A persisted record could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Every clipboard strategy failed or none was available
    #[error("Failed to copy to clipboard: {0}")]
    Clipboard(String),

    /// Every opener strategy failed or none was available
    #[error("Failed to open URL: {0}")]
    Open(String),
}

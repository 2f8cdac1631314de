pub mod analyzer;
pub mod codes;
pub mod time_filter;
pub mod types;
pub mod url_builder;
pub mod validation;

pub use analyzer::{analyze_url, ResultVolume, UrlAnalysis};
pub use types::{SearchParams, SortBy};
pub use url_builder::{build_search_url, parse_search_url, BASE_URL};
pub use validation::{FieldValue, FormField, FormValidation};

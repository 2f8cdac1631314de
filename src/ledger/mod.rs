//! History and favorites collections plus the history page cursor.

pub mod favorites;
pub mod history;
pub mod pagination;

pub use favorites::Favorites;
pub use history::SearchHistory;
pub use pagination::Pagination;

use crate::models::HistoryItem;

/// Executed searches, newest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHistory {
    items: Vec<HistoryItem>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap items that are already newest-first
    pub fn from_items(items: Vec<HistoryItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Prepend `item`, then drop the oldest entries beyond `capacity`.
    /// Returns how many entries were dropped.
    pub fn record(&mut self, item: HistoryItem, capacity: usize) -> usize {
        self.items.insert(0, item);
        self.truncate(capacity)
    }

    /// Keep at most `capacity` newest entries
    pub fn truncate(&mut self, capacity: usize) -> usize {
        let dropped = self.items.len().saturating_sub(capacity);
        self.items.truncate(capacity);
        dropped
    }

    /// Remove by id; `false` when nothing matched
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

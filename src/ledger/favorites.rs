use chrono::{DateTime, Utc};

use crate::error::{SearchError, SearchResult};
use crate::models::{new_id, Favorite};
use crate::search::SearchParams;

/// Saved searches in creation order. Unbounded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Favorites {
    items: Vec<Favorite>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Favorite>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Favorite] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Favorite> {
        self.items.iter().find(|fav| fav.id == id)
    }

    /// Append a snapshot of `params` under `name`.
    ///
    /// Name and description are trimmed; a blank name is rejected and
    /// leaves the collection untouched.
    pub fn add(
        &mut self,
        name: &str,
        params: SearchParams,
        description: Option<&str>,
        tags: Vec<String>,
    ) -> SearchResult<&Favorite> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SearchError::EmptyFavoriteName);
        }

        self.items.push(Favorite {
            id: new_id("favorite"),
            name: name.to_string(),
            params,
            created_at: Utc::now(),
            last_used: None,
            tags,
            description: description.map(|d| d.trim().to_string()),
        });
        Ok(&self.items[self.items.len() - 1])
    }

    /// Stamp `last_used` and hand back the favorite
    pub fn touch(&mut self, id: &str, now: DateTime<Utc>) -> Option<&Favorite> {
        let favorite = self.items.iter_mut().find(|fav| fav.id == id)?;
        favorite.last_used = Some(now);
        Some(favorite)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|fav| fav.id != id);
        self.items.len() != before
    }

    /// Whether any favorite was created after `cutoff`
    pub fn created_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.items.iter().any(|fav| fav.created_at > cutoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn blank_names_are_rejected() {
        let mut favorites = Favorites::new();
        let result = favorites.add("   ", SearchParams::default(), None, Vec::new());
        assert!(matches!(result, Err(SearchError::EmptyFavoriteName)));
        assert!(favorites.is_empty());
    }

    #[test]
    fn add_trims_and_snapshots() {
        let mut favorites = Favorites::new();
        let params = SearchParams::default().with_keywords("Rust");
        let fav = favorites
            .add("  Rust jobs ", params.clone(), Some(" remote only "), vec!["rust".into()])
            .unwrap();
        assert_eq!(fav.name, "Rust jobs");
        assert_eq!(fav.description.as_deref(), Some("remote only"));
        assert_eq!(fav.params, params);
        assert!(fav.last_used.is_none());
    }

    #[test]
    fn touch_and_remove() {
        let mut favorites = Favorites::new();
        let id = favorites.add("a", SearchParams::default(), None, Vec::new()).unwrap().id.clone();
        let now = Utc::now();
        assert_eq!(favorites.touch(&id, now).unwrap().last_used, Some(now));
        assert!(favorites.touch("favorite_missing", now).is_none());
        assert!(!favorites.remove("favorite_missing"));
        assert!(favorites.remove(&id));
    }

    #[test]
    fn recent_favorites_use_creation_time() {
        let mut favorites = Favorites::new();
        assert!(!favorites.created_since(Utc::now() - Duration::days(7)));
        favorites.add("recent", SearchParams::default(), None, Vec::new()).unwrap();
        assert!(favorites.created_since(Utc::now() - Duration::days(7)));
        assert!(!favorites.created_since(Utc::now() + Duration::days(1)));
    }
}

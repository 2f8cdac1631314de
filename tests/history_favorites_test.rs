//! History and favorites lifecycle through the store

use job_scout::models::HistoryItem;
use job_scout::search::{SearchParams, SortBy};
use job_scout::storage::{KeyValueStore, KEY_FAVORITES, KEY_HISTORY};
use job_scout::{JobSearchStore, SearchError, SettingsPatch};

mod common;

use common::{fast_options, memory_store, FailingWrites};

fn sample_params() -> SearchParams {
    SearchParams {
        keywords: Some("Senior Software Engineer".into()),
        location: Some("Remote".into()),
        distance: Some(50.0),
        geo_id: Some("103644278".into()),
        time_posted: Some("r86400".into()),
        custom_hours: None,
        experience_level: vec!["4".into(), "5".into()],
        job_type: vec!["F".into()],
        workplace_type: vec!["2".into()],
        sort_by: Some(SortBy::DatePosted),
        current_job_id: Some("4185657072".into()),
        origin: Some("JOB_SEARCH_PAGE_JOB_FILTER".into()),
    }
}

#[tokio::test]
async fn test_history_entry_restores_exact_snapshot() {
    let (mut store, _) = memory_store();
    store.set_form(sample_params());
    let url = store.generate_url(None).await.unwrap();
    let id = store.add_to_history(store.form().clone(), url.clone()).unwrap();

    store.reset_form();
    assert_eq!(store.form(), &SearchParams::default());

    assert!(store.load_history_item(&id));
    assert_eq!(store.form(), &sample_params());
    assert_eq!(store.generated_url(), url);
    let analysis = store.url_analysis().unwrap();
    assert!(analysis.is_valid);
    assert!(analysis.has_time_filter && analysis.has_location_filter);
}

#[tokio::test]
async fn test_load_from_history_uses_stored_url() {
    let (mut store, _) = memory_store();
    let item = HistoryItem::new(SearchParams::empty(), "not a url at all");
    store.load_from_history(&item);
    assert_eq!(store.generated_url(), "not a url at all");
    assert!(!store.url_analysis().unwrap().is_valid);
}

#[test]
fn test_history_never_exceeds_capacity() {
    let (mut store, storage) = memory_store();
    for n in 0..100 {
        store.add_to_history(SearchParams::empty().with_keywords(format!("q{}", n)), "https://x.test/");
    }
    assert_eq!(store.history().len(), 100);
    let oldest = store.history()[99].id.clone();

    store.add_to_history(SearchParams::empty().with_keywords("q100"), "https://x.test/");
    assert_eq!(store.history().len(), 100);
    assert!(store.history().iter().all(|item| item.id != oldest));
    assert_eq!(store.history()[0].params.keywords.as_deref(), Some("q100"));

    let saved: Vec<HistoryItem> =
        serde_json::from_str(&storage.get(KEY_HISTORY).unwrap().unwrap()).unwrap();
    assert_eq!(saved.len(), 100);
    assert_eq!(saved[0].id, store.history()[0].id);
}

#[test]
fn test_delete_and_clear_history() {
    let (mut store, _) = memory_store();
    for _ in 0..12 {
        store.add_to_history(SearchParams::default(), "https://x.test/");
    }
    store.set_history_page(3);
    assert_eq!(store.pagination().current_page(), 3);
    assert_eq!(store.paginated_history().len(), 2);

    assert!(!store.delete_history_item("history_missing"));
    assert_eq!(store.history().len(), 12);
    let id = store.history()[0].id.clone();
    assert!(store.delete_history_item(&id));
    assert_eq!(store.history().len(), 11);

    store.clear_history();
    assert!(store.history().is_empty());
    assert_eq!(store.pagination().current_page(), 1);
    assert_eq!(store.total_history_pages(), 0);
}

#[test]
fn test_history_pagination_navigation() {
    let (mut store, _) = memory_store();
    for _ in 0..7 {
        store.add_to_history(SearchParams::default(), "https://x.test/");
    }
    assert_eq!(store.total_history_pages(), 2);
    assert!(store.has_next_history_page());
    assert!(!store.has_prev_history_page());

    store.next_history_page();
    store.next_history_page();
    assert_eq!(store.pagination().current_page(), 2);
    assert_eq!(store.paginated_history().len(), 2);

    store.set_history_items_per_page(3);
    assert_eq!(store.pagination().current_page(), 1);
    assert_eq!(store.total_history_pages(), 3);
    store.prev_history_page();
    assert_eq!(store.pagination().current_page(), 1);
}

#[tokio::test]
async fn test_add_current_search_generates_url_first() {
    let (mut store, _) = memory_store();
    store.form_mut().keywords = Some("Rust".into());
    let id = store.add_current_search_to_history().await.unwrap();
    assert!(!store.generated_url().is_empty());
    assert_eq!(store.history()[0].id, id);
    assert_eq!(store.history()[0].url, store.generated_url());
}

#[test]
fn test_auto_save_toggle_gates_history() {
    let (mut store, _) = memory_store();
    store.update_settings(SettingsPatch { auto_save_history: Some(false), ..Default::default() });
    assert!(store.add_to_history(SearchParams::default(), "https://x.test/").is_none());
    assert!(store.history().is_empty());

    store.update_settings(SettingsPatch { auto_save_history: Some(true), ..Default::default() });
    assert!(store.add_to_history(SearchParams::default(), "https://x.test/").is_some());
}

#[test]
fn test_save_favorite_rejects_blank_name() {
    let (mut store, storage) = memory_store();
    let err = store.save_favorite("", None, Vec::new()).unwrap_err();
    assert!(matches!(err, SearchError::EmptyFavoriteName));
    assert_eq!(store.favorite_count(), 0);
    assert!(store.error().is_some());
    assert!(storage.get(KEY_FAVORITES).unwrap().is_none());

    store.clear_error();
    assert!(store.error().is_none());
}

#[test]
fn test_favorite_lifecycle() {
    let (mut store, storage) = memory_store();
    store.set_form(sample_params());
    let id = store
        .save_favorite(" Remote Rust ", Some("  weekly check "), vec!["rust".into(), "remote".into()])
        .unwrap();

    assert_eq!(store.favorite_count(), 1);
    assert!(store.has_recent_favorites());
    let fav = &store.favorites()[0];
    assert_eq!(fav.name, "Remote Rust");
    assert_eq!(fav.description.as_deref(), Some("weekly check"));
    assert!(fav.last_used.is_none());

    store.reset_form();
    assert!(store.load_favorite(&id));
    assert_eq!(store.form(), &sample_params());
    assert!(store.favorites()[0].last_used.is_some());

    assert!(!store.load_favorite("favorite_missing"));
    assert!(!store.delete_favorite("favorite_missing"));
    assert!(store.delete_favorite(&id));
    assert_eq!(store.favorite_count(), 0);
    assert_eq!(storage.get(KEY_FAVORITES).unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_storage_failures_do_not_block_in_memory_state() {
    let mut store = JobSearchStore::with_options(FailingWrites::default(), fast_options());
    store.add_to_history(SearchParams::default(), "https://x.test/");
    store.set_form(sample_params());
    store.save_favorite("still saved", None, Vec::new()).unwrap();

    assert_eq!(store.history().len(), 1);
    assert_eq!(store.favorite_count(), 1);
}

//! Session store: the live search form, generated URL, history and
//! favorites ledgers, settings and notification state.
//!
//! The store is the only writer of its state. Persistence is a best-effort
//! mirror: load and save failures are logged and never block the
//! in-memory operation that triggered them.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::{AppConfig, DEFAULT_LOADING_DELAY};
use crate::debounce::{Debouncer, DEFAULT_DEBOUNCE};
use crate::error::{SearchError, SearchResult};
use crate::integrations::StrategyChain;
use crate::ledger::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::ledger::{Favorites, Pagination, SearchHistory};
use crate::models::{Favorite, HistoryItem, Settings, SettingsPatch};
use crate::notifications::{Notification, NotificationKind, UiState, DEFAULT_NOTIFICATION_DURATION};
use crate::search::time_filter::{time_filter_display, time_filter_token};
use crate::search::{
    analyze_url, build_search_url, FieldValue, FormField, FormValidation, SearchParams, UrlAnalysis,
};
use crate::storage::{KeyValueStore, KEY_FAVORITES, KEY_HISTORY, KEY_SETTINGS};

/// Store behind an async mutex, for debounced auto-generation
pub type SharedStore = Arc<Mutex<JobSearchStore>>;

pub const MSG_COPIED: &str = "URL copied to clipboard!";
pub const MSG_COPY_FAILED: &str = "Failed to copy to clipboard";
pub const MSG_OPENING: &str = "Opening job search in your browser...";

const COPY_NOTIFICATION: Duration = Duration::from_secs(3);
const OPEN_NOTIFICATION: Duration = Duration::from_secs(2);
const RECENT_FAVORITE_DAYS: i64 = 7;

/// Timing knobs for a store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreOptions {
    pub loading_delay: Duration,
    pub debounce: Duration,
    pub history_page_size: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            loading_delay: DEFAULT_LOADING_DELAY,
            debounce: DEFAULT_DEBOUNCE,
            history_page_size: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl From<&AppConfig> for StoreOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            loading_delay: config.loading_delay(),
            debounce: config.debounce(),
            history_page_size: config.history_page_size,
        }
    }
}

pub struct JobSearchStore {
    form: SearchParams,
    generated_url: String,
    url_analysis: Option<UrlAnalysis>,
    favorites: Favorites,
    history: SearchHistory,
    settings: Settings,
    ui: UiState,
    is_loading: bool,
    error: Option<String>,
    validation: FormValidation,
    pagination: Pagination,
    auto_generate_enabled: bool,
    loading_delay: Duration,
    debouncer: Debouncer,
    storage: Box<dyn KeyValueStore>,
    clipboard: StrategyChain,
    opener: StrategyChain,
}

impl JobSearchStore {
    /// Store with default form and settings. Nothing is loaded until
    /// [`initialize`](Self::initialize) runs.
    pub fn new(storage: impl KeyValueStore + 'static) -> Self {
        Self::with_options(storage, StoreOptions::default())
    }

    pub fn with_options(storage: impl KeyValueStore + 'static, options: StoreOptions) -> Self {
        Self {
            form: SearchParams::default(),
            generated_url: String::new(),
            url_analysis: None,
            favorites: Favorites::new(),
            history: SearchHistory::new(),
            settings: Settings::default(),
            ui: UiState::default(),
            is_loading: false,
            error: None,
            validation: FormValidation::default(),
            pagination: Pagination::new(options.history_page_size),
            auto_generate_enabled: true,
            loading_delay: options.loading_delay,
            debouncer: Debouncer::new(options.debounce),
            storage: Box::new(storage),
            clipboard: StrategyChain::new(),
            opener: StrategyChain::new(),
        }
    }

    pub fn with_clipboard(mut self, clipboard: StrategyChain) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn with_opener(mut self, opener: StrategyChain) -> Self {
        self.opener = opener;
        self
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    // ---- state access ----

    pub fn form(&self) -> &SearchParams {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SearchParams {
        &mut self.form
    }

    pub fn set_form(&mut self, params: SearchParams) {
        self.form = params;
    }

    pub fn generated_url(&self) -> &str {
        &self.generated_url
    }

    pub fn url_analysis(&self) -> Option<&UrlAnalysis> {
        self.url_analysis.as_ref()
    }

    pub fn favorites(&self) -> &[Favorite] {
        self.favorites.items()
    }

    pub fn history(&self) -> &[HistoryItem] {
        self.history.items()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn validation(&self) -> &FormValidation {
        &self.validation
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn auto_generate_enabled(&self) -> bool {
        self.auto_generate_enabled
    }

    pub fn set_auto_generate_enabled(&mut self, enabled: bool) {
        self.auto_generate_enabled = enabled;
        if !enabled {
            self.debouncer.cancel();
        }
    }

    // ---- URL generation ----

    /// Build the URL for `params` (or the live form), analyze it and keep
    /// both as the current result.
    pub async fn generate_url(&mut self, params: Option<SearchParams>) -> SearchResult<String> {
        self.is_loading = true;
        self.error = None;

        let params = params.unwrap_or_else(|| self.form.clone());
        let url = build_search_url(&params);
        let analysis = analyze_url(&url, &params);

        if !analysis.is_valid {
            let err = SearchError::InvalidUrl(url);
            self.error = Some(err.to_string());
            self.is_loading = false;
            return Err(err);
        }

        info!(
            "Generated search URL with {} parameters ({} results expected)",
            analysis.parameter_count,
            analysis.estimated_results.map(|v| v.to_string()).unwrap_or_default()
        );
        self.generated_url = url.clone();
        self.url_analysis = Some(analysis);

        tokio::time::sleep(self.loading_delay).await;
        self.is_loading = false;
        Ok(url)
    }

    /// Regenerate the URL once the form has been idle for the debounce
    /// period. Repeated calls restart the idle timer.
    pub async fn auto_generate_url(store: &SharedStore) {
        let mut guard = store.lock().await;
        if !guard.auto_generate_enabled {
            return;
        }
        let handle = Arc::clone(store);
        guard.debouncer.schedule(async move {
            let mut store = handle.lock().await;
            if let Err(e) = store.generate_url(None).await {
                warn!("Auto-generation failed: {}", e);
            }
        });
    }

    pub fn analyze_url(&self, url: &str, params: &SearchParams) -> UrlAnalysis {
        analyze_url(url, params)
    }

    // ---- validation ----

    /// Validate `field`, using the live form value when `value` is `None`
    pub fn validate_field(&mut self, field: FormField, value: Option<FieldValue<'_>>) -> bool {
        let value = match value {
            Some(value) => value,
            None => form_value(&self.form, field),
        };
        self.validation.validate(field, value)
    }

    /// Validate by field name; unknown names are ignored
    pub fn validate_named(&mut self, name: &str, value: FieldValue<'_>) -> Option<bool> {
        self.validation.validate_named(name, value)
    }

    /// Re-check every field of the live form
    pub fn validate_form(&mut self) -> bool {
        for field in FormField::ALL {
            let value = form_value(&self.form, field);
            self.validation.validate(field, value);
        }
        self.validation.is_form_valid()
    }

    pub fn is_form_valid(&self) -> bool {
        self.validation.is_form_valid()
    }

    pub fn reset_form(&mut self) {
        self.form = SearchParams::default();
        self.generated_url.clear();
        self.url_analysis = None;
        self.error = None;
        self.validation = FormValidation::default();
    }

    // ---- history ----

    /// Record a search. No-op when auto-save is off.
    /// Returns the id of the new entry, or `None` if it was not kept.
    pub fn add_to_history(&mut self, params: SearchParams, url: impl Into<String>) -> Option<String> {
        if !self.settings.auto_save_history {
            debug!("Auto-save history is disabled");
            return None;
        }

        info!("Adding search to history: {}", params.trimmed_keywords().unwrap_or("No keywords"));
        let item = HistoryItem::new(params, url);
        let id = item.id.clone();

        let dropped = self.history.record(item, self.settings.max_history_items);
        if dropped > 0 {
            debug!("History trimmed to max items: {}", self.settings.max_history_items);
        }

        self.save_history();
        self.history.get(&id).is_some().then_some(id)
    }

    /// Record the live form, generating its URL first if there is none
    pub async fn add_current_search_to_history(&mut self) -> Option<String> {
        if !self.settings.auto_save_history {
            debug!("Auto-save history is disabled");
            return None;
        }
        if self.generated_url.is_empty() {
            if let Err(e) = self.generate_url(None).await {
                warn!("Could not generate URL for history: {}", e);
                return None;
            }
        }
        let url = self.generated_url.clone();
        self.add_to_history(self.form.clone(), url)
    }

    /// Restore a history snapshot and re-analyze its stored URL
    pub fn load_from_history(&mut self, item: &HistoryItem) {
        self.form = item.params.clone();
        self.generated_url = item.url.clone();
        if !item.url.is_empty() {
            self.url_analysis = Some(analyze_url(&item.url, &item.params));
        }
    }

    /// [`load_from_history`](Self::load_from_history) by id
    pub fn load_history_item(&mut self, id: &str) -> bool {
        match self.history.get(id).cloned() {
            Some(item) => {
                self.load_from_history(&item);
                true
            }
            None => false,
        }
    }

    pub fn delete_history_item(&mut self, id: &str) -> bool {
        let removed = self.history.remove(id);
        if removed {
            self.pagination.set_page(self.pagination.current_page(), self.history.len());
        }
        self.save_history();
        removed
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.pagination.reset();
        self.save_history();
    }

    pub fn paginated_history(&self) -> &[HistoryItem] {
        self.pagination.slice(self.history.items())
    }

    pub fn total_history_pages(&self) -> usize {
        self.pagination.total_pages(self.history.len())
    }

    pub fn has_next_history_page(&self) -> bool {
        self.pagination.has_next(self.history.len())
    }

    pub fn has_prev_history_page(&self) -> bool {
        self.pagination.has_prev()
    }

    pub fn set_history_page(&mut self, page: usize) {
        self.pagination.set_page(page, self.history.len());
    }

    pub fn next_history_page(&mut self) {
        self.pagination.next(self.history.len());
    }

    pub fn prev_history_page(&mut self) {
        self.pagination.prev();
    }

    pub fn set_history_items_per_page(&mut self, items_per_page: usize) {
        self.pagination.set_items_per_page(items_per_page);
    }

    // ---- favorites ----

    /// Save the live form as a favorite. A blank name sets the store
    /// error and leaves the favorites untouched.
    pub fn save_favorite(
        &mut self,
        name: &str,
        description: Option<&str>,
        tags: Vec<String>,
    ) -> SearchResult<String> {
        let id = match self.favorites.add(name, self.form.clone(), description, tags) {
            Ok(favorite) => favorite.id.clone(),
            Err(e) => {
                self.error = Some(e.to_string());
                self.notify(NotificationKind::Error, e.to_string());
                return Err(e);
            }
        };

        info!("Saved favorite \"{}\"", name.trim());
        self.save_favorites();
        self.notify(NotificationKind::Success, format!("Favorite \"{}\" saved!", name.trim()));
        Ok(id)
    }

    /// Load a favorite into the form and stamp its `last_used`
    pub fn load_favorite(&mut self, id: &str) -> bool {
        let params = match self.favorites.touch(id, Utc::now()) {
            Some(favorite) => favorite.params.clone(),
            None => return false,
        };
        self.form = params;
        self.save_favorites();
        true
    }

    pub fn delete_favorite(&mut self, id: &str) -> bool {
        let removed = self.favorites.remove(id);
        if removed {
            self.save_favorites();
        }
        removed
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }

    /// Any favorite created in the last week
    pub fn has_recent_favorites(&self) -> bool {
        self.favorites.created_since(Utc::now() - chrono::Duration::days(RECENT_FAVORITE_DAYS))
    }

    // ---- settings ----

    pub fn update_settings(&mut self, patch: SettingsPatch) {
        self.settings.apply(patch);
        if self.history.truncate(self.settings.max_history_items) > 0 {
            self.save_history();
        }
        self.save_settings();
    }

    // ---- notifications ----

    pub fn show_notification(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        duration: Duration,
    ) {
        self.ui.notification = Some(Notification::new(kind, message, duration));
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.show_notification(kind, message, DEFAULT_NOTIFICATION_DURATION);
    }

    pub fn hide_notification(&mut self) {
        if let Some(notification) = self.ui.notification.as_mut() {
            notification.visible = false;
        }
    }

    /// The notification that should be on screen at `now`
    pub fn active_notification(&self, now: DateTime<Utc>) -> Option<&Notification> {
        self.ui.notification.as_ref().filter(|n| n.is_active(now))
    }

    // ---- copy / open ----

    /// Pick an explicit URL, falling back to the generated one
    fn target_url(&self, url: Option<&str>) -> (String, bool) {
        match url.filter(|u| !u.is_empty()) {
            Some(url) => (url.to_string(), true),
            None => (self.generated_url.clone(), false),
        }
    }

    /// Copy `url` (or the generated URL) to the clipboard.
    ///
    /// Copying the generated URL also records it in history.
    pub async fn copy_to_clipboard(&mut self, url: Option<&str>) -> bool {
        let (text, explicit) = self.target_url(url);
        if text.is_empty() {
            let err = SearchError::NothingToDeliver("copy");
            self.error = Some(err.to_string());
            self.notify(NotificationKind::Error, err.to_string());
            return false;
        }

        match self.clipboard.deliver(&text).await {
            Ok(strategy) => {
                info!("Copied URL to clipboard via {}", strategy);
                self.show_notification(NotificationKind::Success, MSG_COPIED, COPY_NOTIFICATION);
                if !explicit && text == self.generated_url {
                    self.add_to_history(self.form.clone(), text);
                }
                true
            }
            Err(e) => {
                let err = SearchError::Clipboard(format!("{:#}", e));
                warn!("{}", err);
                self.error = Some(MSG_COPY_FAILED.to_string());
                self.notify(
                    NotificationKind::Error,
                    "Failed to copy to clipboard. Please copy the URL manually.",
                );
                false
            }
        }
    }

    /// Open `url` (or the generated URL) in a browser.
    ///
    /// Opening the generated URL also records it in history.
    pub async fn open_in_browser(&mut self, url: Option<&str>) -> bool {
        let (target, explicit) = self.target_url(url);
        if target.is_empty() {
            self.notify(NotificationKind::Error, SearchError::NothingToDeliver("open").to_string());
            return false;
        }

        match self.opener.deliver(&target).await {
            Ok(strategy) => {
                info!("Opened URL via {}", strategy);
                self.show_notification(NotificationKind::Info, MSG_OPENING, OPEN_NOTIFICATION);
                if !explicit && target == self.generated_url {
                    self.add_to_history(self.form.clone(), target);
                }
                true
            }
            Err(e) => {
                warn!("{}", SearchError::Open(format!("{:#}", e)));
                self.notify(
                    NotificationKind::Warning,
                    "Could not open a browser. Please open the URL manually.",
                );
                false
            }
        }
    }

    // ---- time filters ----

    pub fn convert_custom_time_to_filter(&self, hours: f64) -> String {
        time_filter_token(hours)
    }

    pub fn time_filter_display(&self, token: &str) -> &'static str {
        time_filter_display(token)
    }

    // ---- persistence ----

    /// Load settings, favorites and history from storage
    pub fn initialize(&mut self) {
        info!("Initializing store from {} storage", self.storage.backend_name());
        // Settings first: history is bounded by the stored capacity
        self.load_settings();
        self.load_favorites();
        self.load_history();
        info!(
            "Store initialized: {} history items, {} favorites",
            self.history.len(),
            self.favorites.len()
        );
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> SearchResult<Option<T>> {
        match self.storage.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(SearchError::from)
            .and_then(|json| self.storage.set(key, &json).map_err(SearchError::from));
        if let Err(e) = result {
            warn!("Failed to save {} to storage: {}", key, e);
        }
    }

    pub fn load_favorites(&mut self) {
        match self.read::<Vec<Favorite>>(KEY_FAVORITES) {
            Ok(Some(items)) => self.favorites = Favorites::from_items(items),
            Ok(None) => debug!("No favorites found in storage"),
            Err(e) => warn!("Failed to load favorites from storage: {}", e),
        }
    }

    pub fn save_favorites(&self) {
        self.write(KEY_FAVORITES, self.favorites.items());
    }

    pub fn load_history(&mut self) {
        match self.read::<Vec<HistoryItem>>(KEY_HISTORY) {
            Ok(Some(items)) => {
                self.history = SearchHistory::from_items(items);
                self.history.truncate(self.settings.max_history_items);
                debug!("Search history loaded: {} items", self.history.len());
            }
            Ok(None) => debug!("No search history found in storage"),
            Err(e) => {
                warn!("Failed to load history from storage: {}", e);
                self.history.clear();
            }
        }
    }

    pub fn save_history(&self) {
        debug!("Saving search history: {} items", self.history.len());
        self.write(KEY_HISTORY, self.history.items());
    }

    /// Merge stored settings over the current ones
    pub fn load_settings(&mut self) {
        match self.read::<SettingsPatch>(KEY_SETTINGS) {
            Ok(Some(patch)) => self.settings.apply(patch),
            Ok(None) => debug!("No settings found in storage"),
            Err(e) => warn!("Failed to load settings from storage: {}", e),
        }
    }

    pub fn save_settings(&self) {
        self.write(KEY_SETTINGS, &self.settings);
    }
}

/// Current form value of a validated field
fn form_value(form: &SearchParams, field: FormField) -> FieldValue<'_> {
    match field {
        FormField::Keywords => form.keywords.as_deref().into(),
        FormField::Location => form.location.as_deref().into(),
        FormField::GeoId => form.geo_id.as_deref().into(),
        FormField::Distance => form.distance.into(),
        FormField::CustomHours => form.custom_hours.into(),
    }
}

impl std::fmt::Debug for JobSearchStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobSearchStore")
            .field("form", &self.form)
            .field("generated_url", &self.generated_url)
            .field("history", &self.history.len())
            .field("favorites", &self.favorites.len())
            .field("storage", &self.storage.backend_name())
            .finish_non_exhaustive()
    }
}

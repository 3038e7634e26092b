//! Debounced search box with a keyboard-navigable suggestion list.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::domain::client::Client;
use crate::services::ServiceResult;
use crate::{MIN_SUGGESTION_CHARS, SEARCH_DEBOUNCE_MS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
    /// Trimmed queries shorter than this never hit the source.
    pub min_chars: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(SEARCH_DEBOUNCE_MS),
            min_chars: MIN_SUGGESTION_CHARS,
        }
    }
}

/// Supplies the bounded suggestion list for a query.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn suggestions(&self, query: &str) -> ServiceResult<Vec<Client>>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub suggestions: Vec<Client>,
    pub visible: bool,
    pub highlighted: Option<usize>,
}

impl SearchState {
    /// Whether the suggestion list is currently shown.
    pub fn is_open(&self) -> bool {
        self.visible && !self.suggestions.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchKey {
    Down,
    Up,
    Enter,
    Escape,
}

/// Notifications for the page hosting the search box.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchEvent {
    /// Debounced query for the page-level listing.
    Search(String),
    /// A suggestion was picked.
    Select(Client),
}

#[derive(Debug, Default)]
struct Shared {
    state: SearchState,
    latest_fetch: u64,
}

type SharedState = Arc<Mutex<Shared>>;

fn lock(shared: &SharedState) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn emit(events: &UnboundedSender<SearchEvent>, event: SearchEvent) {
    if let Err(err) = events.send(event) {
        log::debug!("Search event dropped, receiver is gone: {:?}", err.0);
    }
}

pub struct SearchSuggestionController<S: ?Sized> {
    source: Arc<S>,
    settings: SearchSettings,
    events: UnboundedSender<SearchEvent>,
    shared: SharedState,
    timer: Option<JoinHandle<()>>,
}

impl<S> SearchSuggestionController<S>
where
    S: SuggestionSource + ?Sized + 'static,
{
    pub fn new(
        source: Arc<S>,
        settings: SearchSettings,
        events: UnboundedSender<SearchEvent>,
    ) -> Self {
        Self {
            source,
            settings,
            events,
            shared: SharedState::default(),
            timer: None,
        }
    }

    pub fn state(&self) -> SearchState {
        lock(&self.shared).state.clone()
    }

    /// Records a keystroke and restarts the debounce timer.
    pub fn input(&mut self, text: impl Into<String>) {
        {
            let mut shared = lock(&self.shared);
            shared.state.query = text.into();
            shared.state.visible = true;
            shared.state.highlighted = None;
        }
        self.schedule();
    }

    /// Moves the highlight or acts on it. Returns the selected client on
    /// `Enter`. Ignored while the list is hidden or empty.
    pub fn handle_key(&mut self, key: SearchKey) -> Option<Client> {
        let highlighted = {
            let mut shared = lock(&self.shared);
            let state = &mut shared.state;
            if !state.is_open() {
                return None;
            }
            let last = state.suggestions.len() - 1;
            match key {
                SearchKey::Down => {
                    state.highlighted = Some(state.highlighted.map_or(0, |i| (i + 1).min(last)));
                    return None;
                }
                SearchKey::Up => {
                    state.highlighted = Some(state.highlighted.map_or(0, |i| i.saturating_sub(1)));
                    return None;
                }
                SearchKey::Escape => {
                    state.visible = false;
                    return None;
                }
                SearchKey::Enter => state.highlighted,
            }
        };
        highlighted.and_then(|index| self.select(index))
    }

    /// Picks the suggestion at `index`, hiding the list and clearing the query.
    pub fn select(&mut self, index: usize) -> Option<Client> {
        let client = {
            let mut shared = lock(&self.shared);
            let client = shared.state.suggestions.get(index).cloned()?;
            shared.state = SearchState::default();
            client
        };
        emit(&self.events, SearchEvent::Select(client.clone()));
        self.schedule();
        Some(client)
    }

    /// Focus left the control; the list is dropped, not cached.
    pub fn blur(&mut self) {
        let mut shared = lock(&self.shared);
        shared.state.visible = false;
        shared.state.highlighted = None;
        shared.state.suggestions.clear();
        shared.latest_fetch += 1;
    }

    /// Focus returned; long enough queries get a fresh fetch.
    pub fn focus(&mut self) {
        let long_enough = {
            let mut shared = lock(&self.shared);
            let long_enough = shared.state.query.trim().chars().count() >= self.settings.min_chars;
            if long_enough {
                shared.state.visible = true;
                shared.state.suggestions.clear();
            }
            long_enough
        };
        if long_enough {
            self.schedule();
        }
    }

    /// Empties the box and notifies the page right away.
    pub fn clear(&mut self) {
        self.cancel_timer();
        {
            let mut shared = lock(&self.shared);
            shared.state = SearchState::default();
            shared.latest_fetch += 1;
        }
        emit(&self.events, SearchEvent::Search(String::new()));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn schedule(&mut self) {
        self.cancel_timer();

        let source = Arc::clone(&self.source);
        let shared = Arc::clone(&self.shared);
        let events = self.events.clone();
        let settings = self.settings;

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(settings.debounce).await;

            let (query, token) = {
                let mut guard = lock(&shared);
                guard.latest_fetch += 1;
                (guard.state.query.clone(), guard.latest_fetch)
            };
            emit(&events, SearchEvent::Search(query.clone()));

            let term = query.trim().to_string();
            if term.chars().count() < settings.min_chars {
                let mut guard = lock(&shared);
                guard.state.suggestions.clear();
                guard.state.highlighted = None;
                return;
            }

            // The fetch outlives the timer slot so a later keystroke cannot abort it.
            tokio::spawn(async move {
                let result = source.suggestions(&term).await;
                let mut guard = lock(&shared);
                if guard.latest_fetch != token {
                    log::debug!("Discarding stale suggestions for '{term}'");
                    return;
                }
                guard.state.highlighted = None;
                match result {
                    Ok(clients) => guard.state.suggestions = clients,
                    Err(err) => {
                        log::warn!("Suggestion fetch failed: {err}");
                        guard.state.suggestions.clear();
                    }
                }
            });
        }));
    }
}

impl<S: ?Sized> Drop for SearchSuggestionController<S> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

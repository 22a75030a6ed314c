// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::ContentSource;
use crate::config::SearchOptions;
use crate::model::Section;
use crate::normalize::normalize_search;

use super::state::StateCell;

const SEARCH_FAILED: &str = "Search failed";

/// Snapshot of the search screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub is_loading: bool,
    /// Sections with at least one item
    pub sections: Vec<Section>,
    pub error: Option<String>,
    /// Items across every returned section
    pub total_results: usize,
    /// Set once a search has finished, successfully or not
    pub search_performed: bool,
}

/// Debounced search over a [`ContentSource`].
///
/// Query updates restart a quiet-period timer; only a query that survives the
/// window, differs from the last settled query, and is long enough is
/// searched. A blank query clears the results at once.
///
/// Must be created inside a Tokio runtime. Dropping the controller stops the
/// pipeline and cancels any search in flight.
pub struct Search {
    shared: Arc<Shared>,
    query: watch::Sender<String>,
    pipeline: JoinHandle<()>,
}

struct Shared {
    source: Arc<dyn ContentSource>,
    options: SearchOptions,
    state: StateCell<SearchState>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
    /// Set when the query is cleared; the next settled query is searched even
    /// if it repeats the one before the clear
    cleared: AtomicBool,
}

impl Search {
    pub fn new(source: Arc<dyn ContentSource>, options: SearchOptions) -> Self {
        let (query, queries) = watch::channel(String::new());
        let shared = Arc::new(Shared {
            source,
            options,
            state: StateCell::default(),
            in_flight: Mutex::new(None),
            cleared: AtomicBool::new(false),
        });
        let pipeline = tokio::spawn(run_pipeline(Arc::clone(&shared), queries));

        Self {
            shared,
            query,
            pipeline,
        }
    }

    pub fn state(&self) -> SearchState {
        self.shared.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.shared.state.subscribe()
    }

    /// Current raw query text
    pub fn query(&self) -> String {
        self.query.borrow().clone()
    }

    pub fn subscribe_query(&self) -> watch::Receiver<String> {
        self.query.subscribe()
    }

    /// Feed a new query value (typically on every keystroke)
    pub fn update_query(&self, query: impl Into<String>) {
        let query = query.into();
        let blank = query.trim().is_empty();
        if blank {
            self.shared.cleared.store(true, Ordering::SeqCst);
        }
        self.query.send_replace(query);

        if blank {
            self.shared.cancel_in_flight();
            self.shared.state.replace(SearchState::default());
        }
    }

    /// Search the current query again, skipping the debounce window.
    ///
    /// No-op unless the trimmed query is long enough.
    pub fn retry(&self) {
        let query = self.query.borrow().trim().to_string();
        if self.shared.accepts(&query) {
            self.shared.dispatch(query);
        }
    }
}

impl Drop for Search {
    fn drop(&mut self) {
        self.pipeline.abort();
        self.shared.cancel_in_flight();
    }
}

impl Shared {
    fn accepts(&self, trimmed: &str) -> bool {
        !trimmed.is_empty() && trimmed.chars().count() >= self.options.min_query_len
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cancel_in_flight(&self) {
        if let Some(handle) = self.lock_in_flight().take() {
            handle.abort();
        }
    }

    /// Start a search, superseding any search still in flight
    fn dispatch(self: &Arc<Self>, query: String) {
        let mut in_flight = self.lock_in_flight();
        if let Some(previous) = in_flight.take() {
            previous.abort();
        }

        self.state.update(|state| SearchState {
            is_loading: true,
            error: None,
            ..state.clone()
        });

        let shared = Arc::clone(self);
        *in_flight = Some(tokio::spawn(async move { shared.perform(query).await }));
    }

    async fn perform(&self, query: String) {
        debug!(query = %query, "searching");

        match self.source.fetch_search_results(&query).await {
            Ok(payload) => {
                let response = normalize_search(&payload);
                let total_results = response.total_results();
                let sections: Vec<Section> = response
                    .sections
                    .into_iter()
                    .filter(|section| !section.content.is_empty())
                    .collect();
                debug!(query = %query, total_results, sections = sections.len(), "search finished");

                self.state.update(move |state| SearchState {
                    is_loading: false,
                    sections,
                    total_results,
                    search_performed: true,
                    ..state.clone()
                });
            }
            Err(e) => {
                warn!(query = %query, error = %e, "search failed");
                let message = e.message_or(SEARCH_FAILED);
                self.state.update(move |state| SearchState {
                    is_loading: false,
                    error: Some(message),
                    search_performed: true,
                    ..state.clone()
                });
            }
        }
    }
}

/// Debounce, deduplicate and length-filter query updates
async fn run_pipeline(shared: Arc<Shared>, mut queries: watch::Receiver<String>) {
    let mut last_settled: Option<String> = None;

    while queries.changed().await.is_ok() {
        // every further update restarts the window
        loop {
            tokio::select! {
                changed = queries.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
                () = tokio::time::sleep(shared.options.debounce) => break,
            }
        }

        let query = queries.borrow_and_update().clone();
        if shared.cleared.swap(false, Ordering::SeqCst) {
            last_settled = None;
        }
        if last_settled.as_deref() == Some(query.as_str()) {
            continue;
        }
        last_settled = Some(query.clone());

        let trimmed = query.trim();
        if !shared.accepts(trimmed) {
            debug!(query = %trimmed, "query too short, not searching");
            continue;
        }
        shared.dispatch(trimmed.to_string());
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::api::ContentSource;
use crate::model::Section;
use crate::normalize::normalize_home;

use super::state::StateCell;

const LOAD_FAILED: &str = "Unknown error occurred";
const LOAD_MORE_FAILED: &str = "Failed to load more content";

/// Snapshot of the home feed
#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    pub is_loading: bool,
    pub is_loading_more: bool,
    pub sections: Vec<Section>,
    pub error: Option<String>,
    /// Last page successfully loaded
    pub current_page: u32,
    pub total_pages: u32,
    /// Page number decoded from the last cursor, if any
    pub next_page: Option<u32>,
    pub has_next_page: bool,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            is_loading: false,
            is_loading_more: false,
            sections: Vec::new(),
            error: None,
            current_page: 1,
            total_pages: 1,
            next_page: None,
            has_next_page: false,
        }
    }
}

/// Paginated home feed.
///
/// Must be created inside a Tokio runtime. Requests run on tasks owned by the
/// feed; dropping the feed aborts them.
pub struct HomeFeed {
    shared: Arc<Shared>,
    tasks: Mutex<JoinSet<()>>,
}

struct Shared {
    source: Arc<dyn ContentSource>,
    state: StateCell<HomeState>,
}

impl HomeFeed {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            shared: Arc::new(Shared {
                source,
                state: StateCell::default(),
            }),
            tasks: Mutex::new(JoinSet::new()),
        }
    }

    pub fn state(&self) -> HomeState {
        self.shared.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<HomeState> {
        self.shared.state.subscribe()
    }

    /// Load page 1, replacing whatever has been accumulated.
    ///
    /// Any request still in flight is cancelled first.
    pub fn load_initial(&self) {
        let mut tasks = self.lock_tasks();
        tasks.abort_all();
        while tasks.try_join_next().is_some() {}

        self.shared.state.update(|state| HomeState {
            is_loading: true,
            is_loading_more: false,
            error: None,
            ..state.clone()
        });

        let shared = Arc::clone(&self.shared);
        tasks.spawn(async move { shared.load_first_page().await });
    }

    /// Load the page after `current_page` and merge it into the feed.
    ///
    /// No-op while a page is loading or when there is no next page.
    pub fn load_more(&self) {
        let mut tasks = self.lock_tasks();
        while tasks.try_join_next().is_some() {}

        let started = self.shared.state.update_if(|state| {
            if state.is_loading || state.is_loading_more || !state.has_next_page {
                return None;
            }
            Some(HomeState {
                is_loading_more: true,
                error: None,
                ..state.clone()
            })
        });
        if !started {
            debug!("load_more ignored: busy or no further page");
            return;
        }

        let page = self.shared.state.snapshot().current_page + 1;
        let shared = Arc::clone(&self.shared);
        tasks.spawn(async move { shared.load_next_page(page).await });
    }

    /// Reload from page 1
    pub fn retry(&self) {
        self.load_initial();
    }

    fn lock_tasks(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Shared {
    async fn load_first_page(&self) {
        match self.source.fetch_home_sections(1).await {
            Ok(payload) => {
                let response = normalize_home(&payload);
                debug!(
                    sections = response.sections.len(),
                    total_pages = response.pagination.total_pages,
                    "loaded home page 1"
                );
                self.state.update(move |state| HomeState {
                    is_loading: false,
                    error: None,
                    current_page: 1,
                    total_pages: response.pagination.total_pages,
                    next_page: response.pagination.next_page_number(),
                    has_next_page: response.pagination.has_next_page(),
                    sections: response.sections,
                    ..state.clone()
                });
            }
            Err(e) => {
                warn!(error = %e, "failed to load home sections");
                let message = e.message_or(LOAD_FAILED);
                self.state.update(move |state| HomeState {
                    is_loading: false,
                    error: Some(message),
                    ..state.clone()
                });
            }
        }
    }

    async fn load_next_page(&self, page: u32) {
        match self.source.fetch_home_sections(page).await {
            Ok(payload) => {
                let response = normalize_home(&payload);
                debug!(page, sections = response.sections.len(), "loaded home page");
                self.state.update(move |state| HomeState {
                    is_loading_more: false,
                    sections: merge_sections(&state.sections, response.sections),
                    current_page: page,
                    total_pages: response.pagination.total_pages,
                    next_page: response.pagination.next_page_number(),
                    has_next_page: response.pagination.has_next_page(),
                    ..state.clone()
                });
            }
            Err(e) => {
                warn!(page, error = %e, "failed to load more home sections");
                let message = e.message_or(LOAD_MORE_FAILED);
                self.state.update(move |state| HomeState {
                    is_loading_more: false,
                    error: Some(message),
                    ..state.clone()
                });
            }
        }
    }
}

/// Fold a later page into the accumulated sections.
///
/// Sections are matched by name. Matching sections gain only the items whose
/// identity key they did not hold before this merge, after their existing
/// items. The incoming page itself is not deduplicated. Sections with a new
/// name are appended at the end.
pub fn merge_sections(existing: &[Section], incoming: Vec<Section>) -> Vec<Section> {
    let mut merged = existing.to_vec();

    for section in incoming {
        match merged.iter_mut().find(|s| s.name == section.name) {
            Some(target) => {
                let held: HashSet<String> =
                    target.content.iter().map(|item| item.id().to_string()).collect();
                target.content.extend(
                    section
                        .content
                        .into_iter()
                        .filter(|item| !held.contains(item.id())),
                );
            }
            None => merged.push(section),
        }
    }

    merged
}

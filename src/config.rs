// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::time::Duration;

/// Production endpoint serving paginated home sections
pub const DEFAULT_HOME_URL: &str = "https://api-v2-b2sit6oh3a-uc.a.run.app/home_sections";

/// Production endpoint serving search results
pub const DEFAULT_SEARCH_URL: &str = "https://mock.apidog.com/m1/735111-711675-default/search";

/// Endpoint locations and request limits
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Home sections endpoint; `page=N` is appended per request
    pub home_url: String,
    /// Search endpoint; `query=<q>` is appended per request
    pub search_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            home_url: DEFAULT_HOME_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Options for the debounced search pipeline
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Quiet period a query must stay unchanged before it is searched
    pub debounce: Duration,
    /// Minimum number of characters in the trimmed query
    pub min_query_len: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(200),
            min_query_len: 2,
        }
    }
}

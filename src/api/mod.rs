mod fetch;

pub use fetch::{HttpContentSource, endpoint_url, fetch_json};

use async_trait::async_trait;

use crate::error::ApiError;
use crate::payload::{HomeSectionsPayload, SearchPayload};

/// Remote source of home sections and search results
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch one page of home sections (pages start at 1)
    async fn fetch_home_sections(&self, page: u32) -> Result<HomeSectionsPayload, ApiError>;

    /// Run a single-shot, unpaginated search
    async fn fetch_search_results(&self, query: &str) -> Result<SearchPayload, ApiError>;
}

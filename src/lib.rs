pub mod api;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod http;
pub mod model;
pub mod normalize;
pub mod payload;

// Re-export main types for convenience
pub use api::{ContentSource, HttpContentSource};
pub use config::{ApiConfig, SearchOptions};
pub use controller::{HomeFeed, HomeState, Search, SearchState, StateCell};
pub use error::ApiError;
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use model::{
    AudioArticle, AudioBook, ContentItem, ContentKind, Episode, HomeFeedResponse, LayoutType,
    Pagination, Podcast, SearchResponse, Section,
};
pub use normalize::{normalize_content, normalize_home, normalize_search, normalize_section};

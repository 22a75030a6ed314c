mod content;
mod section;

pub use content::{AudioArticle, AudioBook, ContentItem, ContentKind, Episode, Podcast};
pub use section::{
    HomeFeedResponse, LayoutType, Pagination, SearchResponse, Section, page_from_cursor,
};

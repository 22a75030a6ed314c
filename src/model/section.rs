// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use url::Url;

use super::content::ContentItem;

/// How a section asks to be laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutType {
    Square,
    TwoLineGrid,
    BigSquare,
    Queue,
    Unknown,
}

impl LayoutType {
    /// Parse the section `type` field. Unrecognized values map to `Unknown`.
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_lowercase().replace(' ', "_").as_str() {
            "square" => Self::Square,
            "2_lines_grid" | "two_lines_grid" | "two_line_grid" => Self::TwoLineGrid,
            "big_square" => Self::BigSquare,
            "queue" => Self::Queue,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::TwoLineGrid => "2_lines_grid",
            Self::BigSquare => "big_square",
            Self::Queue => "queue",
            Self::Unknown => "unknown",
        }
    }
}

/// A named, ordered group of content sharing a layout and content type
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Merge key across pages
    pub name: String,
    pub layout: LayoutType,
    /// Raw tag that selected the content variant
    pub content_type: String,
    /// Render order, ascending
    pub order: i32,
    pub content: Vec<ContentItem>,
}

/// Pagination metadata of a home feed page
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    /// Opaque cursor, a relative URL such as `/home_sections?page=2`
    pub next_page: Option<String>,
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }

    /// Page number encoded in the cursor, if one can be found
    pub fn next_page_number(&self) -> Option<u32> {
        self.next_page.as_deref().and_then(page_from_cursor)
    }
}

/// Extract the `page` query parameter from a relative or absolute URL
pub fn page_from_cursor(cursor: &str) -> Option<u32> {
    let base = Url::parse("http://localhost/").ok()?;
    let url = base.join(cursor.trim()).ok()?;

    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.trim().parse().ok())
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeFeedResponse {
    pub sections: Vec<Section>,
    pub pagination: Pagination,
}

/// Single-shot search result set
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub sections: Vec<Section>,
}

impl SearchResponse {
    /// Number of content items across all sections
    pub fn total_results(&self) -> usize {
        self.sections.iter().map(|s| s.content.len()).sum()
    }
}

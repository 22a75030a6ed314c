// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde_json::Value;

use crate::model::{HomeFeedResponse, LayoutType, Pagination, SearchResponse, Section};
use crate::payload::{
    HomeSectionsPayload, PaginationPayload, SearchPayload, SectionPayload,
};

use super::content::{content_to_payload, normalize_content};
use super::field::parse_int;

/// Order given to sections whose `order` is missing or not an integer
pub const DEFAULT_SECTION_ORDER: i32 = 1;

/// Map a section payload, normalizing every item with the section's content type.
///
/// Content order is preserved; sorting by `order` is left to the renderer.
pub fn normalize_section(payload: &SectionPayload) -> Section {
    let content_type = payload.content_type.clone().unwrap_or_default();
    let content = payload
        .content
        .iter()
        .map(|item| normalize_content(item, &content_type))
        .collect();

    Section {
        name: payload.name.clone().unwrap_or_default(),
        layout: LayoutType::from_wire(payload.layout.as_deref().unwrap_or_default()),
        order: payload
            .order
            .as_ref()
            .and_then(parse_int)
            .unwrap_or(DEFAULT_SECTION_ORDER),
        content_type,
        content,
    }
}

pub fn normalize_pagination(payload: &PaginationPayload) -> Pagination {
    Pagination {
        next_page: payload
            .next_page
            .clone()
            .filter(|cursor| !cursor.trim().is_empty()),
        total_pages: payload
            .total_pages
            .as_ref()
            .and_then(parse_int)
            .and_then(|pages| u32::try_from(pages).ok())
            .unwrap_or(1),
    }
}

pub fn normalize_home(payload: &HomeSectionsPayload) -> HomeFeedResponse {
    HomeFeedResponse {
        sections: payload.sections.iter().map(normalize_section).collect(),
        pagination: normalize_pagination(&payload.pagination),
    }
}

pub fn normalize_search(payload: &SearchPayload) -> SearchResponse {
    SearchResponse {
        sections: payload.sections.iter().map(normalize_section).collect(),
    }
}

/// Map a normalized section back to its wire shape
pub fn section_to_payload(section: &Section) -> SectionPayload {
    SectionPayload {
        name: Some(section.name.clone()),
        layout: Some(section.layout.as_str().to_string()),
        content_type: Some(section.content_type.clone()),
        order: Some(Value::from(section.order)),
        content: section.content.iter().map(content_to_payload).collect(),
    }
}

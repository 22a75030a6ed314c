pub mod field;

mod content;
mod section;

pub use content::{
    DEFAULT_LANGUAGE, content_to_payload, fallback_id, normalize_content, sanitize_language,
};
pub use section::{
    DEFAULT_SECTION_ORDER, normalize_home, normalize_pagination, normalize_search,
    normalize_section, section_to_payload,
};

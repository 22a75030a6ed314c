// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::Utc;
use rand::Rng;
use serde_json::Value;
use tracing::debug;

use crate::model::{AudioArticle, AudioBook, ContentItem, ContentKind, Episode, Podcast};
use crate::payload::ContentPayload;

use super::field::{parse_double, parse_int, parse_long};

/// Language used when the backend sends nothing usable
pub const DEFAULT_LANGUAGE: &str = "en";

const DEFAULT_EPISODE_TYPE: &str = "full";
const UNKNOWN_AUTHOR: &str = "Unknown Author";
const UNKNOWN_PODCAST: &str = "Unknown Podcast";

/// Longest language value accepted as a code
const MAX_LANGUAGE_LEN: usize = 10;

/// Map a content payload to the variant selected by `content_type`.
///
/// Never fails: malformed fields fall back to per-field defaults and a missing
/// identifier is replaced by [`fallback_id`].
pub fn normalize_content(payload: &ContentPayload, content_type: &str) -> ContentItem {
    let kind = ContentKind::from_tag(content_type);
    let name = text_or_default(&payload.name);
    let description = text_or_default(&payload.description);
    let avatar_url = text_or_default(&payload.avatar_url);
    let score = payload.score.as_ref().and_then(parse_double);

    match kind {
        ContentKind::Podcast => ContentItem::Podcast(Podcast {
            podcast_id: identity(&payload.podcast_id, kind),
            name,
            description,
            avatar_url,
            episode_count: int_field(&payload.episode_count).unwrap_or(0),
            duration: long_field(&payload.duration).unwrap_or(0),
            language: sanitize_language(payload.language.as_deref()),
            priority: int_field(&payload.priority),
            popularity_score: int_field(&payload.popularity_score),
            score,
        }),
        ContentKind::Episode => ContentItem::Episode(Episode {
            episode_id: identity(&payload.episode_id, kind),
            name,
            season_number: int_field(&payload.season_number),
            episode_type: text_or(&payload.episode_type, DEFAULT_EPISODE_TYPE),
            podcast_name: text_or(&payload.podcast_name, UNKNOWN_PODCAST),
            author_name: text_or(&payload.author_name, UNKNOWN_AUTHOR),
            description,
            number: int_field(&payload.number),
            duration: int_field(&payload.duration).unwrap_or(0),
            avatar_url,
            separated_audio_url: payload
                .separated_audio_url
                .clone()
                .filter(|s| !s.trim().is_empty()),
            audio_url: text_or_default(&payload.audio_url),
            release_date: text_or_default(&payload.release_date),
            podcast_id: text_or_default(&payload.podcast_id),
            podcast_popularity_score: int_field(&payload.podcast_popularity_score),
            podcast_priority: int_field(&payload.podcast_priority),
            score,
        }),
        ContentKind::AudioBook => ContentItem::AudioBook(AudioBook {
            audiobook_id: identity(&payload.audiobook_id, kind),
            name,
            author_name: text_or(&payload.author_name, UNKNOWN_AUTHOR),
            description,
            avatar_url,
            duration: long_field(&payload.duration).unwrap_or(0),
            language: sanitize_language(payload.language.as_deref()),
            release_date: text_or_default(&payload.release_date),
            score,
        }),
        ContentKind::AudioArticle => ContentItem::AudioArticle(AudioArticle {
            article_id: identity(&payload.article_id, kind),
            name,
            author_name: text_or(&payload.author_name, UNKNOWN_AUTHOR),
            description,
            avatar_url,
            duration: long_field(&payload.duration).unwrap_or(0),
            release_date: text_or_default(&payload.release_date),
            score,
        }),
    }
}

/// Map a normalized item back to its wire shape
pub fn content_to_payload(item: &ContentItem) -> ContentPayload {
    let common = ContentPayload {
        name: Some(item.name().to_string()),
        description: Some(item.description().to_string()),
        avatar_url: Some(item.avatar_url().to_string()),
        score: item.score().map(Value::from),
        ..Default::default()
    };

    match item {
        ContentItem::Podcast(p) => ContentPayload {
            podcast_id: Some(p.podcast_id.clone()),
            episode_count: Some(Value::from(p.episode_count)),
            duration: Some(Value::from(p.duration)),
            language: Some(p.language.clone()),
            priority: p.priority.map(Value::from),
            popularity_score: p.popularity_score.map(Value::from),
            ..common
        },
        ContentItem::Episode(e) => ContentPayload {
            episode_id: Some(e.episode_id.clone()),
            season_number: e.season_number.map(Value::from),
            episode_type: Some(e.episode_type.clone()),
            podcast_name: Some(e.podcast_name.clone()),
            author_name: Some(e.author_name.clone()),
            number: e.number.map(Value::from),
            duration: Some(Value::from(e.duration)),
            separated_audio_url: e.separated_audio_url.clone(),
            audio_url: Some(e.audio_url.clone()),
            release_date: Some(e.release_date.clone()),
            podcast_id: Some(e.podcast_id.clone()),
            podcast_popularity_score: e.podcast_popularity_score.map(Value::from),
            podcast_priority: e.podcast_priority.map(Value::from),
            ..common
        },
        ContentItem::AudioBook(b) => ContentPayload {
            audiobook_id: Some(b.audiobook_id.clone()),
            author_name: Some(b.author_name.clone()),
            duration: Some(Value::from(b.duration)),
            language: Some(b.language.clone()),
            release_date: Some(b.release_date.clone()),
            ..common
        },
        ContentItem::AudioArticle(a) => ContentPayload {
            article_id: Some(a.article_id.clone()),
            author_name: Some(a.author_name.clone()),
            duration: Some(Value::from(a.duration)),
            release_date: Some(a.release_date.clone()),
            ..common
        },
    }
}

/// Keep a short language code, replacing blanks and placeholder text with `"en"`
pub fn sanitize_language(language: Option<&str>) -> String {
    match language {
        Some(lang) if is_plausible_language(lang) => lang.to_string(),
        _ => DEFAULT_LANGUAGE.to_string(),
    }
}

fn is_plausible_language(lang: &str) -> bool {
    if lang.trim().is_empty() || lang.chars().count() > MAX_LANGUAGE_LEN {
        return false;
    }
    let lower = lang.to_lowercase();
    !lower.contains("lorem") && !lower.contains("ipsum")
}

/// Synthesize `"{kind}_{epoch-millis}_{NNNN}"` for an item without an identifier.
///
/// Not stable across calls: the same logical item gets a new id on every page
/// load, so the home feed merge always treats it as new.
pub fn fallback_id(kind: ContentKind) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u16 = rand::thread_rng().gen_range(1000..=9999);
    let id = format!("{}_{}_{}", kind.as_str(), millis, suffix);
    debug!(kind = kind.as_str(), id = %id, "synthesized fallback content id");
    id
}

fn identity(id: &Option<String>, kind: ContentKind) -> String {
    match id {
        Some(id) if !id.trim().is_empty() => id.clone(),
        _ => fallback_id(kind),
    }
}

fn int_field(value: &Option<Value>) -> Option<i32> {
    value.as_ref().and_then(parse_int)
}

fn long_field(value: &Option<Value>) -> Option<i64> {
    value.as_ref().and_then(parse_long)
}

fn text_or_default(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn text_or(value: &Option<String>, fallback: &str) -> String {
    value
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(fallback)
        .to_string()
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// A show with a catalogue of episodes
#[derive(Debug, Clone, PartialEq)]
pub struct Podcast {
    pub podcast_id: String,
    pub name: String,
    pub description: String,
    pub avatar_url: String,
    pub episode_count: i32,
    /// Total duration in seconds
    pub duration: i64,
    pub language: String,
    pub priority: Option<i32>,
    pub popularity_score: Option<i32>,
    pub score: Option<f64>,
}

/// A single playable episode of a podcast
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    pub episode_id: String,
    pub name: String,
    pub season_number: Option<i32>,
    /// "full", "trailer", ...
    pub episode_type: String,
    pub podcast_name: String,
    pub author_name: String,
    pub description: String,
    pub number: Option<i32>,
    /// Duration in seconds
    pub duration: i32,
    pub avatar_url: String,
    pub separated_audio_url: Option<String>,
    pub audio_url: String,
    /// ISO-8601 timestamp as sent by the backend
    pub release_date: String,
    pub podcast_id: String,
    pub podcast_popularity_score: Option<i32>,
    pub podcast_priority: Option<i32>,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudioBook {
    pub audiobook_id: String,
    pub name: String,
    pub author_name: String,
    pub description: String,
    pub avatar_url: String,
    pub duration: i64,
    pub language: String,
    pub release_date: String,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudioArticle {
    pub article_id: String,
    pub name: String,
    pub author_name: String,
    pub description: String,
    pub avatar_url: String,
    pub duration: i64,
    pub release_date: String,
    pub score: Option<f64>,
}

/// One playable or readable unit inside a section
#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    Podcast(Podcast),
    Episode(Episode),
    AudioBook(AudioBook),
    AudioArticle(AudioArticle),
}

/// Discriminant of [`ContentItem`], as named on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Podcast,
    Episode,
    AudioBook,
    AudioArticle,
}

impl ContentKind {
    /// Resolve a section's `content_type` tag.
    ///
    /// Matching is case-insensitive. Unknown tags resolve to `Podcast`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "podcast" => Self::Podcast,
            "episode" => Self::Episode,
            "audio_book" | "audiobook" => Self::AudioBook,
            "audio_article" | "audioarticle" | "article" => Self::AudioArticle,
            _ => Self::Podcast,
        }
    }

    /// Canonical wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Podcast => "podcast",
            Self::Episode => "episode",
            Self::AudioBook => "audio_book",
            Self::AudioArticle => "audio_article",
        }
    }
}

impl ContentItem {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Podcast(_) => ContentKind::Podcast,
            Self::Episode(_) => ContentKind::Episode,
            Self::AudioBook(_) => ContentKind::AudioBook,
            Self::AudioArticle(_) => ContentKind::AudioArticle,
        }
    }

    /// Identity key used to deduplicate items across pages
    pub fn id(&self) -> &str {
        match self {
            Self::Podcast(p) => &p.podcast_id,
            Self::Episode(e) => &e.episode_id,
            Self::AudioBook(b) => &b.audiobook_id,
            Self::AudioArticle(a) => &a.article_id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Podcast(p) => &p.name,
            Self::Episode(e) => &e.name,
            Self::AudioBook(b) => &b.name,
            Self::AudioArticle(a) => &a.name,
        }
    }

    /// Raw description; may contain markup
    pub fn description(&self) -> &str {
        match self {
            Self::Podcast(p) => &p.description,
            Self::Episode(e) => &e.description,
            Self::AudioBook(b) => &b.description,
            Self::AudioArticle(a) => &a.description,
        }
    }

    pub fn avatar_url(&self) -> &str {
        match self {
            Self::Podcast(p) => &p.avatar_url,
            Self::Episode(e) => &e.avatar_url,
            Self::AudioBook(b) => &b.avatar_url,
            Self::AudioArticle(a) => &a.avatar_url,
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Podcast(p) => p.score,
            Self::Episode(e) => e.score,
            Self::AudioBook(b) => b.score,
            Self::AudioArticle(a) => a.score,
        }
    }

    /// Duration in seconds, widened to a common type
    pub fn duration_seconds(&self) -> i64 {
        match self {
            Self::Podcast(p) => p.duration,
            Self::Episode(e) => i64::from(e.duration),
            Self::AudioBook(b) => b.duration,
            Self::AudioArticle(a) => a.duration,
        }
    }

    /// Author or owning show, whichever the variant carries
    pub fn byline(&self) -> Option<&str> {
        let byline = match self {
            Self::Podcast(_) => return None,
            Self::Episode(e) => &e.podcast_name,
            Self::AudioBook(b) => &b.author_name,
            Self::AudioArticle(a) => &a.author_name,
        };
        Some(byline.as_str()).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str) -> ContentItem {
        ContentItem::AudioArticle(AudioArticle {
            article_id: id.to_string(),
            name: "Article".to_string(),
            author_name: "Writer".to_string(),
            description: String::new(),
            avatar_url: String::new(),
            duration: 90,
            release_date: String::new(),
            score: Some(1.5),
        })
    }

    #[test]
    fn from_tag_accepts_aliases_in_any_case() {
        assert_eq!(ContentKind::from_tag("Podcast"), ContentKind::Podcast);
        assert_eq!(ContentKind::from_tag("EPISODE"), ContentKind::Episode);
        assert_eq!(ContentKind::from_tag("audio_book"), ContentKind::AudioBook);
        assert_eq!(ContentKind::from_tag("AudioBook"), ContentKind::AudioBook);
        assert_eq!(ContentKind::from_tag("audio_article"), ContentKind::AudioArticle);
        assert_eq!(ContentKind::from_tag("audioarticle"), ContentKind::AudioArticle);
        assert_eq!(ContentKind::from_tag("article"), ContentKind::AudioArticle);
    }

    #[test]
    fn from_tag_falls_back_to_podcast() {
        assert_eq!(ContentKind::from_tag("video"), ContentKind::Podcast);
        assert_eq!(ContentKind::from_tag(""), ContentKind::Podcast);
    }

    #[test]
    fn accessors_dispatch_on_variant() {
        let item = article("a-1");

        assert_eq!(item.kind(), ContentKind::AudioArticle);
        assert_eq!(item.id(), "a-1");
        assert_eq!(item.name(), "Article");
        assert_eq!(item.score(), Some(1.5));
        assert_eq!(item.duration_seconds(), 90);
        assert_eq!(item.byline(), Some("Writer"));
    }
}

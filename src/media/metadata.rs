// Shelf Core - Audiobook and Podcast Media Model
// Copyright (C) 2025 Shelf Core contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Descriptive metadata for books and podcasts
//!
//! [`MediaTypeMetadata`] is a closed sum type. Deserialization inspects the
//! payload's keys first (see [`super::shape`]) and then maps it into the
//! matching variant; serialization writes the variant's fields untagged, so a
//! payload round-trips without gaining a discriminator.

use super::shape::{self, MediaKind};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Shown when a book or podcast has no author information
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Keys only podcast metadata carries
const PODCAST_METADATA_KEYS: &[&str] = &["author", "feedUrl"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cover_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookMetadata {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub authors: Option<Vec<Author>>,
    #[serde(default)]
    pub narrators: Option<Vec<String>>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub published_year: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub asin: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub explicit: bool,

    // Only present in the server's expanded item payload
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default, rename = "authorNameLF")]
    pub author_name_lf: Option<String>,
    #[serde(default)]
    pub narrator_name: Option<String>,
    #[serde(default)]
    pub series_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastMetadata {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub feed_url: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Book or podcast metadata, deduced from payload shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MediaTypeMetadata {
    Book(BookMetadata),
    Podcast(PodcastMetadata),
}

impl<'de> Deserialize<'de> for MediaTypeMetadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = shape::deduce("metadata", &value, PODCAST_METADATA_KEYS)
            .map_err(D::Error::custom)?;

        match kind {
            MediaKind::Podcast => serde_json::from_value(value)
                .map(MediaTypeMetadata::Podcast)
                .map_err(D::Error::custom),
            MediaKind::Book => serde_json::from_value(value)
                .map(MediaTypeMetadata::Book)
                .map_err(D::Error::custom),
        }
    }
}

impl MediaTypeMetadata {
    pub fn title(&self) -> &str {
        match self {
            MediaTypeMetadata::Book(book) => &book.title,
            MediaTypeMetadata::Podcast(podcast) => &podcast.title,
        }
    }

    /// Author line for display, [`UNKNOWN_AUTHOR`] when absent
    pub fn author_display_name(&self) -> &str {
        let author = match self {
            MediaTypeMetadata::Book(book) => book.author_name.as_deref(),
            MediaTypeMetadata::Podcast(podcast) => podcast.author.as_deref(),
        };
        author.unwrap_or(UNKNOWN_AUTHOR)
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            MediaTypeMetadata::Book(_) => MediaKind::Book,
            MediaTypeMetadata::Podcast(_) => MediaKind::Podcast,
        }
    }

    pub fn genres(&self) -> &[String] {
        match self {
            MediaTypeMetadata::Book(book) => &book.genres,
            MediaTypeMetadata::Podcast(podcast) => &podcast.genres,
        }
    }
}

impl BookMetadata {
    /// Minimal metadata with only a title
    pub fn titled<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            authors: None,
            narrators: None,
            genres: Vec::new(),
            published_year: None,
            published_date: None,
            publisher: None,
            description: None,
            isbn: None,
            asin: None,
            language: None,
            explicit: false,
            author_name: None,
            author_name_lf: None,
            narrator_name: None,
            series_name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_metadata_shape() {
        let json = r#"{
            "title": "The Hobbit",
            "authors": [{"id": "au1", "name": "J.R.R. Tolkien"}],
            "genres": ["Fantasy"],
            "explicit": false,
            "authorName": "J.R.R. Tolkien",
            "authorNameLF": "Tolkien, J.R.R.",
            "titleIgnorePrefix": "Hobbit, The"
        }"#;
        let meta: MediaTypeMetadata = serde_json::from_str(json).unwrap();

        let MediaTypeMetadata::Book(book) = &meta else {
            panic!("expected book metadata");
        };
        assert_eq!(book.author_name_lf.as_deref(), Some("Tolkien, J.R.R."));
        assert_eq!(meta.kind(), MediaKind::Book);
        assert_eq!(meta.title(), "The Hobbit");
        assert_eq!(meta.author_display_name(), "J.R.R. Tolkien");
        assert_eq!(meta.genres(), ["Fantasy".to_string()]);
    }

    #[test]
    fn test_podcast_metadata_shape() {
        let json = r#"{"title": "Daily News", "author": "Newsroom", "feedUrl": null, "genres": []}"#;
        let meta: MediaTypeMetadata = serde_json::from_str(json).unwrap();

        assert_eq!(meta.kind(), MediaKind::Podcast);
        assert_eq!(meta.author_display_name(), "Newsroom");
    }

    #[test]
    fn test_feed_url_alone_selects_podcast() {
        let json = r#"{"title": "Daily News", "feedUrl": "https://example.com/feed.xml"}"#;
        let meta: MediaTypeMetadata = serde_json::from_str(json).unwrap();

        assert_eq!(meta.kind(), MediaKind::Podcast);
        assert_eq!(meta.author_display_name(), UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_missing_author_name_falls_back() {
        let meta = MediaTypeMetadata::Book(BookMetadata::titled("Untitled"));
        assert_eq!(meta.author_display_name(), "Unknown");
    }

    #[test]
    fn test_missing_title_is_a_mapping_failure() {
        let result: Result<MediaTypeMetadata, _> = serde_json::from_str(r#"{"author": "x"}"#);
        assert!(result.is_err());

        let result: Result<MediaTypeMetadata, _> = serde_json::from_str(r#""just a string""#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Unrecognised metadata payload"));
    }

    #[test]
    fn test_serializes_untagged() {
        let meta = MediaTypeMetadata::Book(BookMetadata::titled("Dune"));
        let value = serde_json::to_value(&meta).unwrap();

        assert_eq!(value["title"], "Dune");
        assert!(value.get("Book").is_none());
        assert!(value.get("authorNameLF").is_some());
    }
}

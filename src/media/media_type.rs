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


//! Book or podcast media and the reconciliation contract
//!
//! Both variants own an ordered collection of playable audio (book tracks,
//! podcast episodes) and keep its position-dependent fields consistent through
//! the operations of [`TrackCollection`]. Nothing else writes `index`,
//! `start_offset` or aggregate `duration`.
//!
//! # Reconciliation
//! - `set_audio_tracks` - full resync against the current set of files
//! - `add_audio_track` - a download or scan produced one more file
//! - `remove_audio_track` - a local file is gone (keyed by local file id)
//! - `local_copy` - empty local counterpart of a remote item
//!
//! Every operation leaves indices dense from 1 (and for books, offsets as the
//! running sum of durations) before it returns.

use super::book::Book;
use super::metadata::MediaTypeMetadata;
use super::podcast::Podcast;
use super::shape::{self, MediaKind};
use super::track::AudioTrack;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Keys only podcast media carries
const PODCAST_MEDIA_KEYS: &[&str] = &["episodes", "autoDownloadEpisodes", "numEpisodes"];

/// Operations that keep a track/episode collection consistent
pub trait TrackCollection {
    /// Playable tracks in collection order
    fn audio_tracks(&self) -> Vec<&AudioTrack>;

    /// Resynchronize against the full set of tracks now available
    fn set_audio_tracks(&mut self, tracks: Vec<AudioTrack>);

    fn add_audio_track(&mut self, track: AudioTrack);

    /// Remove everything backed by `local_file_id`
    fn remove_audio_track(&mut self, local_file_id: &str);

    /// Same descriptive data with empty collections and zero counts
    fn local_copy(&self) -> Self
    where
        Self: Sized;
}

/// Book or podcast media, deduced from payload shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MediaType {
    Book(Book),
    Podcast(Podcast),
}

impl<'de> Deserialize<'de> for MediaType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = shape::deduce("media", &value, PODCAST_MEDIA_KEYS).map_err(D::Error::custom)?;

        match kind {
            MediaKind::Podcast => serde_json::from_value(value)
                .map(MediaType::Podcast)
                .map_err(D::Error::custom),
            MediaKind::Book => serde_json::from_value(value)
                .map(MediaType::Book)
                .map_err(D::Error::custom),
        }
    }
}

impl MediaType {
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaType::Book(_) => MediaKind::Book,
            MediaType::Podcast(_) => MediaKind::Podcast,
        }
    }

    pub fn metadata(&self) -> &MediaTypeMetadata {
        match self {
            MediaType::Book(book) => &book.metadata,
            MediaType::Podcast(podcast) => &podcast.metadata,
        }
    }

    pub fn cover_path(&self) -> Option<&str> {
        match self {
            MediaType::Book(book) => book.cover_path.as_deref(),
            MediaType::Podcast(podcast) => podcast.cover_path.as_deref(),
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            MediaType::Book(book) => &book.tags,
            MediaType::Podcast(podcast) => &podcast.tags,
        }
    }

    /// Whether the server reports any tracks (books) or episodes (podcasts).
    /// An absent count is treated as zero.
    pub fn has_tracks(&self) -> bool {
        match self {
            MediaType::Book(book) => book.num_tracks().unwrap_or(0) > 0,
            MediaType::Podcast(podcast) => podcast.num_episodes().unwrap_or(0) > 0,
        }
    }

    pub fn as_book(&self) -> Option<&Book> {
        match self {
            MediaType::Book(book) => Some(book),
            MediaType::Podcast(_) => None,
        }
    }

    pub fn as_podcast(&self) -> Option<&Podcast> {
        match self {
            MediaType::Podcast(podcast) => Some(podcast),
            MediaType::Book(_) => None,
        }
    }

    pub fn as_podcast_mut(&mut self) -> Option<&mut Podcast> {
        match self {
            MediaType::Podcast(podcast) => Some(podcast),
            MediaType::Book(_) => None,
        }
    }
}

impl TrackCollection for MediaType {
    fn audio_tracks(&self) -> Vec<&AudioTrack> {
        match self {
            MediaType::Book(book) => book.audio_tracks(),
            MediaType::Podcast(podcast) => podcast.audio_tracks(),
        }
    }

    fn set_audio_tracks(&mut self, tracks: Vec<AudioTrack>) {
        match self {
            MediaType::Book(book) => book.set_audio_tracks(tracks),
            MediaType::Podcast(podcast) => podcast.set_audio_tracks(tracks),
        }
    }

    fn add_audio_track(&mut self, track: AudioTrack) {
        match self {
            MediaType::Book(book) => book.add_audio_track(track),
            MediaType::Podcast(podcast) => podcast.add_audio_track(track),
        }
    }

    fn remove_audio_track(&mut self, local_file_id: &str) {
        match self {
            MediaType::Book(book) => book.remove_audio_track(local_file_id),
            MediaType::Podcast(podcast) => podcast.remove_audio_track(local_file_id),
        }
    }

    fn local_copy(&self) -> Self {
        match self {
            MediaType::Book(book) => MediaType::Book(book.local_copy()),
            MediaType::Podcast(podcast) => MediaType::Podcast(podcast.local_copy()),
        }
    }
}

impl From<Book> for MediaType {
    fn from(book: Book) -> Self {
        MediaType::Book(book)
    }
}

impl From<Podcast> for MediaType {
    fn from(podcast: Podcast) -> Self {
        MediaType::Podcast(podcast)
    }
}

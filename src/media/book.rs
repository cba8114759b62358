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


//! Books: an ordered, concatenated list of audio tracks

use super::file::AudioFile;
use super::media_type::TrackCollection;
use super::metadata::MediaTypeMetadata;
use super::track::{AudioTrack, BookChapter};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Book media
///
/// `tracks`, `duration` and `num_tracks` are derived from the track list and
/// only change through [`TrackCollection`] operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub metadata: MediaTypeMetadata,
    #[serde(default)]
    pub cover_path: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub audio_files: Option<Vec<AudioFile>>,
    #[serde(default)]
    pub chapters: Option<Vec<BookChapter>>,
    #[serde(default)]
    tracks: Option<Vec<AudioTrack>>,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    num_tracks: Option<i32>,
}

impl Book {
    /// A book with no tracks yet
    pub fn new(metadata: MediaTypeMetadata) -> Self {
        Self {
            metadata,
            cover_path: None,
            tags: Vec::new(),
            audio_files: Some(Vec::new()),
            chapters: None,
            tracks: Some(Vec::new()),
            size: None,
            duration: None,
            num_tracks: Some(0),
        }
    }

    /// Track list as received; `None` when the payload omitted it
    pub fn tracks(&self) -> Option<&[AudioTrack]> {
        self.tracks.as_deref()
    }

    /// Total duration in seconds
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn num_tracks(&self) -> Option<i32> {
        self.num_tracks
    }

    /// Stored chapters, or one chapter per track when the book has none
    pub fn chapter_list(&self) -> Vec<BookChapter> {
        match &self.chapters {
            Some(chapters) if !chapters.is_empty() => chapters.clone(),
            _ => self
                .tracks
                .iter()
                .flatten()
                .map(AudioTrack::book_chapter)
                .collect(),
        }
    }

    /// Re-derive index, start offset, total duration and track count from
    /// the current track order
    fn rederive_positions(&mut self) {
        let Some(tracks) = self.tracks.as_mut() else {
            return;
        };

        let mut start_offset = 0.0;
        for (position, track) in tracks.iter_mut().enumerate() {
            track.index = position as i32 + 1;
            track.start_offset = start_offset;
            start_offset += track.duration;
        }

        self.duration = Some(start_offset);
        self.num_tracks = Some(tracks.len() as i32);
    }
}

impl TrackCollection for Book {
    fn audio_tracks(&self) -> Vec<&AudioTrack> {
        self.tracks.iter().flatten().collect()
    }

    fn set_audio_tracks(&mut self, mut tracks: Vec<AudioTrack>) {
        // Stable: tracks sharing an index keep their input order
        tracks.sort_by_key(|t| t.index);
        self.tracks = Some(tracks);
        self.rederive_positions();

        debug!(
            tracks = self.num_tracks.unwrap_or(0),
            duration = self.duration.unwrap_or(0.0),
            "book tracks resynced"
        );
    }

    fn add_audio_track(&mut self, track: AudioTrack) {
        self.tracks.get_or_insert_with(Vec::new).push(track);
        self.rederive_positions();
    }

    fn remove_audio_track(&mut self, local_file_id: &str) {
        let Some(tracks) = self.tracks.as_mut() else {
            return;
        };

        let before = tracks.len();
        tracks.retain(|t| !t.has_local_file_id(local_file_id));
        let removed = before - tracks.len();
        if removed == 0 {
            return;
        }

        tracks.sort_by_key(|t| t.index);
        self.rederive_positions();

        debug!(
            local_file_id,
            removed,
            remaining = self.num_tracks.unwrap_or(0),
            "removed book track"
        );
    }

    fn local_copy(&self) -> Self {
        Self {
            metadata: self.metadata.clone(),
            cover_path: self.cover_path.clone(),
            tags: self.tags.clone(),
            audio_files: Some(Vec::new()),
            chapters: self.chapters.clone(),
            tracks: Some(Vec::new()),
            size: None,
            duration: None,
            num_tracks: Some(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::metadata::BookMetadata;

    fn track(index: i32, id: &str, duration: f64) -> AudioTrack {
        AudioTrack::new_local(index, id, id, "/local/track.mp3", "audio/mpeg", duration)
    }

    fn book_with(tracks: Vec<AudioTrack>) -> Book {
        let mut book = Book::new(MediaTypeMetadata::Book(BookMetadata::titled("Test Book")));
        book.set_audio_tracks(tracks);
        book
    }

    fn indices(book: &Book) -> Vec<i32> {
        book.audio_tracks().iter().map(|t| t.index).collect()
    }

    fn offsets(book: &Book) -> Vec<f64> {
        book.audio_tracks().iter().map(|t| t.start_offset).collect()
    }

    #[test]
    fn test_remove_middle_track() {
        let mut book = book_with(vec![
            track(1, "a", 10.0),
            track(2, "b", 20.0),
            track(3, "c", 5.0),
        ]);

        book.remove_audio_track("b");

        assert_eq!(indices(&book), vec![1, 2]);
        assert_eq!(offsets(&book), vec![0.0, 10.0]);
        let durations: Vec<f64> = book.audio_tracks().iter().map(|t| t.duration).collect();
        assert_eq!(durations, vec![10.0, 5.0]);
        assert_eq!(book.duration(), Some(15.0));
        assert_eq!(book.num_tracks(), Some(2));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut once = book_with(vec![track(1, "a", 3.0), track(2, "b", 4.0)]);
        once.remove_audio_track("a");
        let mut twice = once.clone();
        twice.remove_audio_track("a");

        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let json = r#"{
            "metadata": {"title": "Remote"},
            "tracks": [
                {"index": 2, "startOffset": 0.0, "duration": 1.0, "title": "b", "contentUrl": "/b", "mimeType": "audio/mpeg"},
                {"index": 1, "startOffset": 7.0, "duration": 1.0, "title": "a", "contentUrl": "/a", "mimeType": "audio/mpeg"}
            ],
            "duration": 99.0
        }"#;
        let mut book: Book = serde_json::from_str(json).unwrap();
        let before = book.clone();

        book.remove_audio_track("missing");

        assert_eq!(book, before);
    }

    #[test]
    fn test_remove_all_duplicates() {
        let mut book = book_with(vec![
            track(1, "dup", 1.0),
            track(2, "keep", 2.0),
            track(3, "dup", 3.0),
        ]);

        book.remove_audio_track("dup");

        assert_eq!(book.audio_tracks().len(), 1);
        assert_eq!(book.audio_tracks()[0].local_file_id.as_deref(), Some("keep"));
        assert_eq!(book.duration(), Some(2.0));
    }

    #[test]
    fn test_remove_on_absent_tracks_is_noop() {
        let mut book: Book =
            serde_json::from_str(r#"{"metadata": {"title": "Minified"}, "numTracks": 4}"#).unwrap();

        book.remove_audio_track("a");

        assert!(book.tracks().is_none());
        assert_eq!(book.duration(), None);
        assert_eq!(book.num_tracks(), Some(4));
    }

    #[test]
    fn test_set_sorts_by_index() {
        let book = book_with(vec![
            track(3, "c", 5.0),
            track(1, "a", 10.0),
            track(2, "b", 20.0),
        ]);

        let ids: Vec<&str> = book
            .audio_tracks()
            .iter()
            .filter_map(|t| t.local_file_id.as_deref())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(book.duration(), Some(35.0));
    }

    // set and add re-derive offsets as well as duration, so offsets never go
    // stale between a resync and the next removal
    #[test]
    fn test_set_rederives_offsets_and_dense_indices() {
        let book = book_with(vec![track(5, "x", 2.0), track(9, "y", 3.0), track(9, "z", 4.0)]);

        assert_eq!(indices(&book), vec![1, 2, 3]);
        assert_eq!(offsets(&book), vec![0.0, 2.0, 5.0]);
        assert_eq!(book.duration(), Some(9.0));
    }

    #[test]
    fn test_add_appends_and_rederives() {
        let mut book = book_with(vec![track(1, "a", 10.0)]);

        book.add_audio_track(track(1, "b", 2.5));

        assert_eq!(indices(&book), vec![1, 2]);
        assert_eq!(offsets(&book), vec![0.0, 10.0]);
        assert_eq!(book.duration(), Some(12.5));
        assert_eq!(book.num_tracks(), Some(2));
    }

    #[test]
    fn test_add_to_absent_tracks_creates_list() {
        let mut book: Book = serde_json::from_str(r#"{"metadata": {"title": "Minified"}}"#).unwrap();

        book.add_audio_track(track(7, "a", 1.0));

        assert_eq!(indices(&book), vec![1]);
        assert_eq!(book.duration(), Some(1.0));
    }

    #[test]
    fn test_set_empty_clears_tracks() {
        let mut book = book_with(vec![track(1, "a", 10.0)]);

        book.set_audio_tracks(Vec::new());

        assert!(book.audio_tracks().is_empty());
        assert_eq!(book.duration(), Some(0.0));
        assert_eq!(book.num_tracks(), Some(0));
    }

    #[test]
    fn test_local_copy_resets_collections() {
        let mut book = book_with(vec![track(1, "a", 10.0)]);
        book.cover_path = Some("/covers/a.jpg".to_string());
        book.tags = vec!["fav".to_string()];
        book.size = Some(1234);

        let copy = book.local_copy();

        assert!(copy.audio_tracks().is_empty());
        assert_eq!(copy.audio_files, Some(Vec::new()));
        assert_eq!(copy.num_tracks(), Some(0));
        assert_eq!(copy.duration(), None);
        assert_eq!(copy.size, None);
        assert_eq!(copy.cover_path, book.cover_path);
        assert_eq!(copy.tags, book.tags);
        assert_eq!(copy.metadata, book.metadata);
        assert_eq!(book.audio_tracks().len(), 1);
    }

    #[test]
    fn test_chapter_list_falls_back_to_tracks() {
        let mut book = book_with(vec![track(1, "a", 10.0), track(2, "b", 5.0)]);

        let chapters = book.chapter_list();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[1].id, 3);
        assert_eq!((chapters[1].start, chapters[1].end), (10.0, 15.0));

        book.chapters = Some(vec![BookChapter {
            id: 0,
            start: 0.0,
            end: 15.0,
            title: Some("Whole book".to_string()),
        }]);
        assert_eq!(book.chapter_list().len(), 1);
    }
}

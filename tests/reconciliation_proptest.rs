//! Property-based tests for track reconciliation.
//! Durations are multiples of 0.25 s so running sums are exact in f64.

use proptest::prelude::*;
use shelf_core::media::{
    AudioTrack, Book, BookMetadata, MediaTypeMetadata, Podcast, PodcastEpisode, PodcastMetadata,
    TrackCollection,
};

fn tracks_from(layout: &[(i32, u8, u32)]) -> Vec<AudioTrack> {
    layout
        .iter()
        .map(|&(index, file, quarters)| {
            let id = format!("f{}", file);
            AudioTrack::new_local(
                index,
                id.as_str(),
                id.as_str(),
                "/local/f.mp3",
                "audio/mpeg",
                quarters as f64 / 4.0,
            )
        })
        .collect()
}

fn empty_book() -> Book {
    Book::new(MediaTypeMetadata::Book(BookMetadata::titled("Prop")))
}

fn empty_podcast() -> Podcast {
    Podcast::new(MediaTypeMetadata::Podcast(PodcastMetadata {
        title: "Prop".to_string(),
        author: None,
        feed_url: None,
        genres: Vec::new(),
    }))
}

fn remote_episode(id: &str) -> PodcastEpisode {
    serde_json::from_value(serde_json::json!({ "id": id, "index": 1, "title": "Remote" })).unwrap()
}

/// Indices are 1..n, offsets are running sums, duration is the total
fn assert_book_consistent(book: &Book) {
    let tracks = book.audio_tracks();
    let mut expected_offset = 0.0;
    for (position, track) in tracks.iter().enumerate() {
        assert_eq!(track.index, position as i32 + 1);
        assert_eq!(track.start_offset, expected_offset);
        expected_offset += track.duration;
    }
    assert_eq!(book.duration(), Some(expected_offset));
    assert_eq!(book.num_tracks(), Some(tracks.len() as i32));
}

fn track_layout() -> impl Strategy<Value = Vec<(i32, u8, u32)>> {
    prop::collection::vec((0i32..20, 0u8..8, 0u32..40_000), 0..12)
}

proptest! {
    /// set_audio_tracks always leaves dense indices and running offsets.
    #[test]
    fn book_set_is_consistent(layout in track_layout()) {
        let mut book = empty_book();
        book.set_audio_tracks(tracks_from(&layout));

        assert_book_consistent(&book);
        prop_assert_eq!(book.audio_tracks().len(), layout.len());
    }

    /// Removing any key keeps the book consistent, drops every match and is idempotent.
    #[test]
    fn book_remove_is_consistent_and_idempotent(layout in track_layout(), file in 0u8..8) {
        let mut book = empty_book();
        book.set_audio_tracks(tracks_from(&layout));
        let key = format!("f{}", file);

        book.remove_audio_track(&key);
        assert_book_consistent(&book);
        prop_assert!(book.audio_tracks().iter().all(|t| !t.has_local_file_id(&key)));

        let once = book.clone();
        book.remove_audio_track(&key);
        prop_assert_eq!(book, once);
    }

    /// add_audio_track appends at the end with the previous total as offset.
    #[test]
    fn book_add_appends(layout in track_layout(), quarters in 0u32..40_000) {
        let mut book = empty_book();
        book.set_audio_tracks(tracks_from(&layout));
        let before = book.duration().unwrap_or(0.0);

        book.add_audio_track(tracks_from(&[(0, 9, quarters)]).remove(0));

        assert_book_consistent(&book);
        let last = *book.audio_tracks().last().unwrap();
        prop_assert_eq!(last.start_offset, before);
        prop_assert!(last.has_local_file_id("f9"));
    }

    /// Podcast episode indices are dense after any sequence of operations.
    #[test]
    fn podcast_indices_dense(first in track_layout(), second in track_layout(), file in 0u8..8) {
        let mut podcast = empty_podcast();

        podcast.set_audio_tracks(tracks_from(&first));
        podcast.add_audio_track(tracks_from(&[(0, 9, 4)]).remove(0));
        podcast.set_audio_tracks(tracks_from(&second));
        podcast.remove_audio_track(&format!("f{}", file));

        let episodes = podcast.episodes().unwrap();
        for (position, episode) in episodes.iter().enumerate() {
            prop_assert_eq!(episode.index, position as i32 + 1);
        }
        prop_assert_eq!(podcast.num_episodes(), Some(episodes.len() as i32));
    }

    /// After a resync every episode is backed by one of the new tracks,
    /// and every keyed track has exactly one episode.
    #[test]
    fn podcast_set_keeps_only_new_keys(first in track_layout(), second in track_layout()) {
        let mut podcast = empty_podcast();
        podcast.set_audio_tracks(tracks_from(&first));
        podcast.add_episode(
            tracks_from(&[(0, 9, 4)]).remove(0),
            &remote_episode("srv"),
        );

        let tracks = tracks_from(&second);
        podcast.set_audio_tracks(tracks.clone());

        let episodes = podcast.episodes().unwrap();
        for episode in episodes {
            let key = episode.local_file_id();
            prop_assert!(key.is_some_and(|id| tracks.iter().any(|t| t.has_local_file_id(id))));
        }
        for track in &tracks {
            let key = track.local_file_id.as_deref();
            prop_assert_eq!(episodes.iter().filter(|ep| ep.local_file_id() == key).count(), 1);
        }
    }

    /// A local copy starts empty and is independent of the original.
    #[test]
    fn local_copy_is_empty_and_independent(layout in track_layout()) {
        let mut book = empty_book();
        book.set_audio_tracks(tracks_from(&layout));

        let mut copy = book.local_copy();
        prop_assert!(copy.audio_tracks().is_empty());
        prop_assert_eq!(copy.num_tracks(), Some(0));

        copy.add_audio_track(tracks_from(&[(1, 9, 4)]).remove(0));
        prop_assert_eq!(book.audio_tracks().len(), layout.len());
    }
}

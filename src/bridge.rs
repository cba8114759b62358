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


//! JSON operations exposed to the mobile hosts
//!
//! Every operation takes JSON strings and returns a JSON envelope string, so
//! the same functions back the uniffi export, the Android JNI bridge and the
//! iOS C bridge.
//!
//! # Response Format
//! ```json
//! { "success": true, "data": { ... } }
//! ```
//! Or on error:
//! ```json
//! { "success": false, "error": "Error message" }
//! ```
//!
//! Media operations return the updated media object as `data`; the host
//! stores it back on its library item.

use crate::config::environment::{self, RuntimeEnvironment};
use crate::error::Result;
use crate::json;
use crate::media::{AudioTrack, BookChapter, LibraryItem, MediaType, TrackCollection};
use serde::Serialize;
use std::panic::{self, AssertUnwindSafe};
use tracing::error;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Convert Rust result to JSON response string
pub(crate) fn result_to_json<T: Serialize>(result: Result<T>) -> String {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_response(&e.to_string()),
    }
}

/// Create success response JSON
fn success_response<T: Serialize>(data: T) -> String {
    serde_json::json!({
        "success": true,
        "data": data
    })
    .to_string()
}

/// Create error response JSON
pub(crate) fn error_response(error: &str) -> String {
    serde_json::json!({
        "success": false,
        "error": error
    })
    .to_string()
}

/// Wrap a function call with panic catching
pub(crate) fn catch_panic<F>(f: F) -> String
where
    F: FnOnce() -> String,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(panic_err) => {
            let panic_msg = if let Some(s) = panic_err.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = panic_err.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "Unknown panic occurred".to_string()
            };
            error!(panic = %panic_msg, "panic caught at bridge boundary");
            error_response(&format!("Rust panic: {}", panic_msg))
        }
    }
}

/// Decode media, apply `f`, and return the updated media
fn update_media<F>(media_json: &str, f: F) -> Result<MediaType>
where
    F: FnOnce(&mut MediaType) -> Result<()>,
{
    let mut media: MediaType = json::decode("media", media_json)?;
    f(&mut media)?;
    Ok(media)
}

/// Presentation view of a library item
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LibraryItemSummary {
    id: String,
    media_type: String,
    title: String,
    author: String,
    cover_uri: String,
    has_tracks: bool,
    duration: Option<f64>,
    chapters: Vec<BookChapter>,
    tracks: Vec<AudioTrack>,
}

impl LibraryItemSummary {
    fn new(item: &LibraryItem, env: &RuntimeEnvironment) -> Result<Self> {
        let book = item.media.as_book();
        Ok(Self {
            id: item.id.clone(),
            media_type: item.media.kind().as_str().to_string(),
            title: item.title().to_string(),
            author: item.author_name().to_string(),
            cover_uri: item.cover_uri(env)?.to_string(),
            has_tracks: item.check_has_tracks(),
            duration: book.and_then(|b| b.duration()),
            chapters: book.map(|b| b.chapter_list()).unwrap_or_default(),
            tracks: item.media.audio_tracks().into_iter().cloned().collect(),
        })
    }
}

// ============================================================================
// EXPORTED OPERATIONS
// ============================================================================

/// Title, author, cover reference, chapters and tracks of a library item
///
/// # Arguments
/// - `item_json`: library item payload as received from the server
#[uniffi::export]
pub fn describe_library_item(item_json: String) -> String {
    catch_panic(move || {
        result_to_json((|| -> Result<LibraryItemSummary> {
            let item = LibraryItem::from_json(&item_json)?;
            LibraryItemSummary::new(&item, &environment::current())
        })())
    })
}

/// Resynchronize media against the full list of tracks now available
///
/// # Arguments
/// - `media_json`: book or podcast media object
/// - `tracks_json`: JSON array of audio tracks
#[uniffi::export]
pub fn set_audio_tracks(media_json: String, tracks_json: String) -> String {
    catch_panic(move || {
        result_to_json(update_media(&media_json, |media| {
            let tracks: Vec<AudioTrack> = json::decode("audio tracks", &tracks_json)?;
            media.set_audio_tracks(tracks);
            Ok(())
        }))
    })
}

#[uniffi::export]
pub fn add_audio_track(media_json: String, track_json: String) -> String {
    catch_panic(move || {
        result_to_json(update_media(&media_json, |media| {
            let track: AudioTrack = json::decode("audio track", &track_json)?;
            media.add_audio_track(track);
            Ok(())
        }))
    })
}

/// Remove every track (or episode) backed by `local_file_id`
#[uniffi::export]
pub fn remove_audio_track(media_json: String, local_file_id: String) -> String {
    catch_panic(move || {
        result_to_json(update_media(&media_json, |media| {
            media.remove_audio_track(&local_file_id);
            Ok(())
        }))
    })
}

/// Empty local counterpart of the given media
#[uniffi::export]
pub fn media_local_copy(media_json: String) -> String {
    catch_panic(move || {
        result_to_json((|| -> Result<MediaType> {
            let media: MediaType = json::decode("media", &media_json)?;
            Ok(media.local_copy())
        })())
    })
}

/// Install the server address and token used for cover references
///
/// # Arguments
/// ```json
/// { "serverAddress": "https://abs.example.com", "token": "..." }
/// ```
#[uniffi::export]
pub fn configure_environment(environment_json: String) -> String {
    catch_panic(move || {
        result_to_json((|| -> Result<serde_json::Value> {
            let env: RuntimeEnvironment = json::decode("runtime environment", &environment_json)?;
            environment::install(env);
            Ok(serde_json::json!({ "configured": true }))
        })())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn parse(response: &str) -> Value {
        serde_json::from_str(response).unwrap()
    }

    fn book_media() -> Value {
        json!({
            "metadata": {"title": "Dune", "authorName": "Frank Herbert"},
            "tracks": [
                {"index": 1, "startOffset": 0.0, "duration": 10.0, "title": "a", "contentUrl": "/a", "mimeType": "audio/mpeg", "isLocal": true, "localFileId": "a"},
                {"index": 2, "startOffset": 10.0, "duration": 20.0, "title": "b", "contentUrl": "/b", "mimeType": "audio/mpeg", "isLocal": true, "localFileId": "b"},
                {"index": 3, "startOffset": 30.0, "duration": 5.0, "title": "c", "contentUrl": "/c", "mimeType": "audio/mpeg", "isLocal": true, "localFileId": "c"}
            ],
            "duration": 35.0,
            "numTracks": 3
        })
    }

    #[test]
    fn test_remove_audio_track_envelope() {
        let response = parse(&remove_audio_track(book_media().to_string(), "b".to_string()));

        assert_eq!(response["success"], true);
        let tracks = response["data"]["tracks"].as_array().unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[1]["index"], 2);
        assert_eq!(tracks[1]["startOffset"], 10.0);
        assert_eq!(response["data"]["duration"], 15.0);
    }

    #[test]
    fn test_add_audio_track_to_podcast() {
        let media = json!({"metadata": {"title": "Daily", "author": null}, "episodes": []});
        let track = json!({
            "index": 1, "startOffset": 0.0, "duration": 60.0, "title": "Ep",
            "contentUrl": "/ep.mp3", "mimeType": "audio/mpeg", "isLocal": true, "localFileId": "abc"
        });

        let response = parse(&add_audio_track(media.to_string(), track.to_string()));

        assert_eq!(response["success"], true);
        assert_eq!(response["data"]["episodes"][0]["id"], "local_abc");
        assert_eq!(response["data"]["numEpisodes"], 1);
    }

    #[test]
    fn test_set_audio_tracks_rejects_bad_tracks() {
        let response = parse(&set_audio_tracks(book_media().to_string(), "{}".to_string()));

        assert_eq!(response["success"], false);
        assert!(response["error"].as_str().unwrap().contains("JSON"));
    }

    #[test]
    fn test_media_local_copy() {
        let response = parse(&media_local_copy(book_media().to_string()));

        assert_eq!(response["success"], true);
        assert_eq!(response["data"]["tracks"], json!([]));
        assert_eq!(response["data"]["numTracks"], 0);
        assert_eq!(response["data"]["metadata"]["title"], "Dune");
    }

    #[test]
    fn test_non_object_media_is_error() {
        let response = parse(&media_local_copy("[1, 2]".to_string()));

        assert_eq!(response["success"], false);
        assert!(response["error"].as_str().unwrap().contains("Unrecognised media payload"));
    }

    #[test]
    fn test_describe_library_item() {
        let item = json!({
            "id": "li_1", "ino": "1", "libraryId": "lib_1", "folderId": "fol_1",
            "path": "/books/Dune", "relPath": "Dune",
            "mtimeMs": 0, "ctimeMs": 0, "birthtimeMs": 0, "addedAt": 0, "updatedAt": 0,
            "mediaType": "book",
            "media": book_media()
        });

        let response = parse(&describe_library_item(item.to_string()));

        assert_eq!(response["success"], true);
        let data = &response["data"];
        assert_eq!(data["title"], "Dune");
        assert_eq!(data["author"], "Frank Herbert");
        assert_eq!(data["hasTracks"], true);
        assert_eq!(data["coverUri"], crate::config::DEFAULT_PLACEHOLDER_COVER);
        assert_eq!(data["chapters"].as_array().unwrap().len(), 3);
        assert_eq!(data["chapters"][1]["end"], 30.0);
    }

    #[test]
    fn test_catch_panic() {
        let response = parse(&catch_panic(|| panic!("boom")));

        assert_eq!(response["success"], false);
        assert_eq!(response["error"], "Rust panic: boom");
    }

    #[test]
    fn test_configure_environment_rejects_garbage() {
        let response = parse(&configure_environment("not json".to_string()));
        assert_eq!(response["success"], false);
    }
}

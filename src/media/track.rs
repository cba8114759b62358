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


//! Audio tracks, probe results and chapter projection
//!
//! An [`AudioTrack`] is one playable, time-bounded segment. Books concatenate
//! their tracks (hence `start_offset`), podcast episodes each bind at most one.
//!
//! `index`, `start_offset` and the owning book's `duration` are cached on the
//! records for consumers that read them directly; only the reconciliation
//! operations on [`crate::media::MediaType`] write them.

use super::file::FileMetadata;
use serde::{Deserialize, Serialize};

/// A single playable audio segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrack {
    /// 1-based position within the owning collection
    pub index: i32,
    /// Seconds from the start of the book
    pub start_offset: f64,
    /// Seconds
    pub duration: f64,
    pub title: String,
    pub content_url: String,
    pub mime_type: String,
    #[serde(default)]
    pub metadata: Option<FileMetadata>,
    #[serde(default)]
    pub is_local: bool,
    /// Reconciliation key for tracks backed by a device-local file
    #[serde(default)]
    pub local_file_id: Option<String>,
    #[serde(default)]
    pub audio_probe_result: Option<AudioProbeResult>,
    /// Track index on the server when it differs from the local ordering
    #[serde(default)]
    pub server_index: Option<i32>,
}

impl AudioTrack {
    /// Create a track backed by a device-local file
    pub fn new_local<S: Into<String>>(
        index: i32,
        local_file_id: S,
        title: S,
        content_url: S,
        mime_type: S,
        duration: f64,
    ) -> Self {
        Self {
            index,
            start_offset: 0.0,
            duration,
            title: title.into(),
            content_url: content_url.into(),
            mime_type: mime_type.into(),
            metadata: None,
            is_local: true,
            local_file_id: Some(local_file_id.into()),
            audio_probe_result: None,
            server_index: None,
        }
    }

    /// Attach file metadata
    pub fn with_metadata(mut self, metadata: FileMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Attach a probe result; a positive probed duration replaces the current one
    pub fn with_probe(mut self, probe: AudioProbeResult) -> Self {
        if let Some(duration) = probe.duration().filter(|d| *d > 0.0) {
            self.duration = duration;
        }
        self.audio_probe_result = Some(probe);
        self
    }

    /// Whether this track is backed by the given local file
    pub fn has_local_file_id(&self, local_file_id: &str) -> bool {
        self.local_file_id.as_deref() == Some(local_file_id)
    }

    pub fn start_offset_ms(&self) -> i64 {
        (self.start_offset * 1000.0) as i64
    }

    pub fn duration_ms(&self) -> i64 {
        (self.duration * 1000.0) as i64
    }

    /// Sum of the already truncated start and duration
    pub fn end_offset_ms(&self) -> i64 {
        self.start_offset_ms() + self.duration_ms()
    }

    /// Path relative to the library folder, empty when unknown
    pub fn rel_path(&self) -> &str {
        self.metadata
            .as_ref()
            .map(|m| m.rel_path.as_str())
            .unwrap_or("")
    }

    /// Project this track's time span as a chapter
    pub fn book_chapter(&self) -> BookChapter {
        BookChapter {
            id: self.index + 1,
            start: self.start_offset,
            end: self.start_offset + self.duration,
            title: Some(self.title.clone()),
        }
    }
}

/// Chapter marker; for local books a read-only view of a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookChapter {
    pub id: i32,
    /// Seconds
    pub start: f64,
    /// Seconds
    pub end: f64,
    #[serde(default)]
    pub title: Option<String>,
}

impl BookChapter {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// ffprobe output captured when a local file was scanned
///
/// Field names follow ffprobe's JSON (`-print_format json -show_format -show_streams`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioProbeResult {
    #[serde(default)]
    pub streams: Vec<AudioProbeStream>,
    #[serde(default)]
    pub format: Option<AudioProbeFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioProbeStream {
    #[serde(default)]
    pub index: i32,
    #[serde(default)]
    pub codec_name: Option<String>,
    #[serde(default)]
    pub codec_long_name: Option<String>,
    #[serde(default)]
    pub channels: Option<i32>,
    #[serde(default)]
    pub channel_layout: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub bit_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioProbeFormat {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub format_name: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub bit_rate: Option<f64>,
    #[serde(default)]
    pub tags: Option<AudioProbeTags>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioProbeTags {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

impl AudioProbeResult {
    fn audio_stream(&self) -> Option<&AudioProbeStream> {
        self.streams.iter().find(|s| s.codec_name.is_some())
    }

    /// Container duration, falling back to the first audio stream's
    pub fn duration(&self) -> Option<f64> {
        self.format
            .as_ref()
            .and_then(|f| f.duration)
            .or_else(|| self.audio_stream().and_then(|s| s.duration))
    }

    pub fn size(&self) -> Option<i64> {
        self.format.as_ref().and_then(|f| f.size)
    }

    pub fn bit_rate(&self) -> Option<f64> {
        self.format
            .as_ref()
            .and_then(|f| f.bit_rate)
            .or_else(|| self.audio_stream().and_then(|s| s.bit_rate))
    }

    pub fn codec(&self) -> Option<&str> {
        self.audio_stream().and_then(|s| s.codec_name.as_deref())
    }

    /// Title tag embedded in the file
    pub fn tagged_title(&self) -> Option<&str> {
        self.format
            .as_ref()
            .and_then(|f| f.tags.as_ref())
            .and_then(|t| t.title.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(index: i32, start_offset: f64, duration: f64) -> AudioTrack {
        AudioTrack {
            start_offset,
            ..AudioTrack::new_local(index, "f1", "Intro", "/local/f1.mp3", "audio/mpeg", duration)
        }
    }

    #[test]
    fn test_millisecond_accessors() {
        let t = track(0, 1.5, 2.0);
        assert_eq!(t.start_offset_ms(), 1500);
        assert_eq!(t.duration_ms(), 2000);
        assert_eq!(t.end_offset_ms(), 3500);
    }

    #[test]
    fn test_end_offset_sums_truncated_values() {
        // 0.0007s and 0.0007s each truncate to 0ms; the untruncated end would be 1ms
        let t = track(0, 0.0007, 0.0007);
        assert_eq!(t.start_offset_ms(), 0);
        assert_eq!(t.duration_ms(), 0);
        assert_eq!(t.end_offset_ms(), 0);
    }

    #[test]
    fn test_book_chapter_projection() {
        let chapter = track(0, 1.5, 2.0).book_chapter();
        assert_eq!(
            chapter,
            BookChapter {
                id: 1,
                start: 1.5,
                end: 3.5,
                title: Some("Intro".to_string()),
            }
        );
        assert_eq!(chapter.duration(), 2.0);
    }

    #[test]
    fn test_rel_path_defaults_to_empty() {
        let t = track(1, 0.0, 1.0);
        assert_eq!(t.rel_path(), "");

        let t = t.with_metadata(FileMetadata {
            filename: "f1.mp3".to_string(),
            ext: ".mp3".to_string(),
            path: "/books/b/f1.mp3".to_string(),
            rel_path: "b/f1.mp3".to_string(),
            size: Some(1024),
        });
        assert_eq!(t.rel_path(), "b/f1.mp3");
    }

    #[test]
    fn test_probe_result_from_ffprobe_json() {
        let json = r#"{
            "streams": [
                {"index": 0, "codec_name": "mp3", "channels": 2, "bit_rate": 64000}
            ],
            "format": {
                "filename": "/books/b/f1.mp3",
                "format_name": "mp3",
                "duration": 125.5,
                "size": 2048,
                "bit_rate": 128000.0,
                "tags": {"title": "Chapter One"}
            }
        }"#;
        let probe: AudioProbeResult = serde_json::from_str(json).unwrap();
        assert_eq!(probe.duration(), Some(125.5));
        assert_eq!(probe.size(), Some(2048));
        assert_eq!(probe.bit_rate(), Some(128000.0));
        assert_eq!(probe.codec(), Some("mp3"));
        assert_eq!(probe.tagged_title(), Some("Chapter One"));
    }

    #[test]
    fn test_with_probe_takes_probed_duration() {
        let probe = AudioProbeResult {
            streams: vec![AudioProbeStream {
                codec_name: Some("aac".to_string()),
                duration: Some(42.0),
                ..Default::default()
            }],
            format: None,
        };
        let t = track(1, 0.0, 0.0).with_probe(probe);
        assert_eq!(t.duration, 42.0);

        let t = track(1, 0.0, 7.0).with_probe(AudioProbeResult::default());
        assert_eq!(t.duration, 7.0);
    }
}

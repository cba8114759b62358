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


//! Playback progress for a library item or episode

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Playback position state as tracked by the server
///
/// Timestamps are milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaProgress {
    pub id: String,
    pub library_item_id: String,
    #[serde(default)]
    pub episode_id: Option<String>,
    /// Seconds
    pub duration: f64,
    /// Fraction listened, 0 to 1
    pub progress: f64,
    /// Seconds
    pub current_time: f64,
    #[serde(default)]
    pub is_finished: bool,
    pub last_update: i64,
    pub started_at: i64,
    #[serde(default)]
    pub finished_at: Option<i64>,
}

impl MediaProgress {
    /// Seconds left to play, never negative
    pub fn remaining_seconds(&self) -> f64 {
        (self.duration - self.current_time).max(0.0)
    }

    /// `progress` clamped into [0, 1]
    pub fn normalized_progress(&self) -> f64 {
        self.progress.clamp(0.0, 1.0)
    }

    pub fn last_update_time(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.last_update)
    }

    pub fn started_time(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.started_at)
    }

    pub fn finished_time(&self) -> Option<DateTime<Utc>> {
        self.finished_at.and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    /// Whether this progress belongs to the given item (and episode, for podcasts)
    pub fn is_for(&self, library_item_id: &str, episode_id: Option<&str>) -> bool {
        self.library_item_id == library_item_id && self.episode_id.as_deref() == episode_id
    }
}

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


//! Podcast episodes

use super::file::AudioFile;
use super::track::AudioTrack;
use serde::{Deserialize, Serialize};

/// Id prefix for episodes synthesized while resyncing local files
pub const LOCAL_EPISODE_PREFIX: &str = "local_ep_";

/// Id prefix for local counterparts of tracks and server episodes
pub const LOCAL_PREFIX: &str = "local_";

/// One podcast installment, optionally bound to a playable track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastEpisode {
    pub id: String,
    #[serde(default)]
    pub index: i32,
    #[serde(default)]
    pub episode: Option<String>,
    #[serde(default)]
    pub episode_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Server-side file, present on remote episodes
    #[serde(default)]
    pub audio_file: Option<AudioFile>,
    /// Playable track, present once the episode is available locally
    #[serde(default)]
    pub audio_track: Option<AudioTrack>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub size: Option<i64>,
    /// Server episode this local episode was downloaded from
    #[serde(default)]
    pub server_episode_id: Option<String>,
}

impl PodcastEpisode {
    /// Episode for a local file with no known server counterpart.
    ///
    /// `id` is chosen by the caller; index is assigned when the owning
    /// podcast renumbers its episodes.
    pub(crate) fn for_local_track(id: String, track: AudioTrack) -> Self {
        Self {
            id,
            index: 0,
            episode: None,
            episode_type: None,
            title: Some(track.title.clone()),
            subtitle: None,
            description: None,
            audio_file: None,
            duration: Some(track.duration),
            audio_track: Some(track),
            size: Some(0),
            server_episode_id: None,
        }
    }

    /// Local counterpart of a server episode whose audio has been downloaded
    pub(crate) fn for_downloaded_track(track: AudioTrack, server_episode: &PodcastEpisode) -> Self {
        Self {
            id: format!("{}{}", LOCAL_PREFIX, server_episode.id),
            index: 0,
            episode: server_episode.episode.clone(),
            episode_type: server_episode.episode_type.clone(),
            title: server_episode.title.clone(),
            subtitle: server_episode.subtitle.clone(),
            description: server_episode.description.clone(),
            audio_file: None,
            duration: Some(track.duration),
            audio_track: Some(track),
            size: Some(0),
            server_episode_id: Some(server_episode.id.clone()),
        }
    }

    /// Local file id of the bound track, if any
    pub fn local_file_id(&self) -> Option<&str> {
        self.audio_track
            .as_ref()
            .and_then(|t| t.local_file_id.as_deref())
    }

    /// Whether the episode can be played (has a bound track)
    pub fn is_playable(&self) -> bool {
        self.audio_track.is_some()
    }

    pub fn is_local(&self) -> bool {
        self.id.starts_with(LOCAL_PREFIX)
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

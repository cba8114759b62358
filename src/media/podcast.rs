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


//! Podcasts: independently playable episodes
//!
//! Episodes are matched to local files through their bound track's local file
//! id. Unlike books there is no running offset; only the episode index is
//! re-derived, in list order.

use super::episode::{PodcastEpisode, LOCAL_EPISODE_PREFIX, LOCAL_PREFIX};
use super::media_type::TrackCollection;
use super::metadata::MediaTypeMetadata;
use super::track::AudioTrack;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Podcast media
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Podcast {
    pub metadata: MediaTypeMetadata,
    #[serde(default)]
    pub cover_path: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    episodes: Option<Vec<PodcastEpisode>>,
    #[serde(default)]
    pub auto_download_episodes: bool,
    #[serde(default)]
    num_episodes: Option<i32>,
}

impl Podcast {
    /// A podcast with no episodes yet
    pub fn new(metadata: MediaTypeMetadata) -> Self {
        Self {
            metadata,
            cover_path: None,
            tags: Vec::new(),
            episodes: Some(Vec::new()),
            auto_download_episodes: false,
            num_episodes: Some(0),
        }
    }

    /// Episodes as received; `None` when the payload omitted them
    pub fn episodes(&self) -> Option<&[PodcastEpisode]> {
        self.episodes.as_deref()
    }

    pub fn num_episodes(&self) -> Option<i32> {
        self.num_episodes
    }

    pub fn episode(&self, episode_id: &str) -> Option<&PodcastEpisode> {
        self.episodes.iter().flatten().find(|ep| ep.id == episode_id)
    }

    /// Local episode downloaded from the given server episode
    pub fn episode_for_server_episode(&self, server_episode_id: &str) -> Option<&PodcastEpisode> {
        self.episodes
            .iter()
            .flatten()
            .find(|ep| ep.server_episode_id.as_deref() == Some(server_episode_id))
    }

    /// Bind a downloaded track to the server episode it came from.
    ///
    /// The new episode keeps the server episode's descriptive fields and is
    /// appended after the existing episodes.
    pub fn add_episode(&mut self, track: AudioTrack, server_episode: &PodcastEpisode) -> PodcastEpisode {
        let mut episode = PodcastEpisode::for_downloaded_track(track, server_episode);

        let episodes = self.episodes.get_or_insert_with(Vec::new);
        episode.index = episodes.len() as i32 + 1;
        episodes.push(episode.clone());
        self.renumber();

        debug!(
            episode_id = %episode.id,
            server_episode_id = %server_episode.id,
            "added downloaded episode"
        );
        episode
    }

    fn renumber(&mut self) {
        let Some(episodes) = self.episodes.as_mut() else {
            return;
        };

        for (position, episode) in episodes.iter_mut().enumerate() {
            episode.index = position as i32 + 1;
        }
        self.num_episodes = Some(episodes.len() as i32);
    }
}

impl TrackCollection for Podcast {
    fn audio_tracks(&self) -> Vec<&AudioTrack> {
        self.episodes
            .iter()
            .flatten()
            .filter_map(|ep| ep.audio_track.as_ref())
            .collect()
    }

    fn set_audio_tracks(&mut self, tracks: Vec<AudioTrack>) {
        let episodes = self.episodes.get_or_insert_with(Vec::new);

        // Only episodes backed by one of the new files survive
        let before = episodes.len();
        episodes.retain(|ep| {
            ep.local_file_id()
                .is_some_and(|id| tracks.iter().any(|t| t.has_local_file_id(id)))
        });
        let dropped = before - episodes.len();

        let mut created = 0;
        for track in tracks {
            let Some(local_file_id) = track.local_file_id.clone() else {
                warn!(title = %track.title, "skipping podcast track without local file id");
                continue;
            };
            if episodes.iter().any(|ep| ep.local_file_id() == Some(local_file_id.as_str())) {
                continue;
            }

            let id = format!("{}{}", LOCAL_EPISODE_PREFIX, local_file_id);
            episodes.push(PodcastEpisode::for_local_track(id, track));
            created += 1;
        }

        self.renumber();

        debug!(
            dropped,
            created,
            episodes = self.num_episodes.unwrap_or(0),
            "podcast episodes resynced"
        );
    }

    fn add_audio_track(&mut self, track: AudioTrack) {
        let Some(local_file_id) = track.local_file_id.clone() else {
            warn!(title = %track.title, "skipping podcast track without local file id");
            return;
        };

        let id = format!("{}{}", LOCAL_PREFIX, local_file_id);
        self.episodes
            .get_or_insert_with(Vec::new)
            .push(PodcastEpisode::for_local_track(id, track));
        self.renumber();
    }

    fn remove_audio_track(&mut self, local_file_id: &str) {
        let Some(episodes) = self.episodes.as_mut() else {
            return;
        };

        let before = episodes.len();
        episodes.retain(|ep| ep.local_file_id() != Some(local_file_id));
        let removed = before - episodes.len();
        if removed == 0 {
            return;
        }

        self.renumber();

        debug!(
            local_file_id,
            removed,
            remaining = self.num_episodes.unwrap_or(0),
            "removed podcast episode"
        );
    }

    fn local_copy(&self) -> Self {
        Self {
            metadata: self.metadata.clone(),
            cover_path: self.cover_path.clone(),
            tags: self.tags.clone(),
            episodes: Some(Vec::new()),
            auto_download_episodes: self.auto_download_episodes,
            num_episodes: Some(0),
        }
    }
}

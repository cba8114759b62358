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


//! Library items
//!
//! A [`LibraryItem`] is one book or podcast on disk: identity and scan
//! bookkeeping, its file inventory, the resolved media and (optionally) the
//! user's progress. Presentation values are computed on each call.

use super::file::{Folder, LibraryFile};
use super::media_type::{MediaType, TrackCollection};
use super::progress::MediaProgress;
use crate::config::environment::{self, RuntimeEnvironment};
use crate::error::Result;
use crate::json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

/// Library id given to items synthesized from local files
pub const LOCAL_LIBRARY_ID: &str = "local";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItem {
    pub id: String,
    pub ino: String,
    pub library_id: String,
    pub folder_id: String,
    pub path: String,
    pub rel_path: String,
    pub mtime_ms: i64,
    pub ctime_ms: i64,
    pub birthtime_ms: i64,
    pub added_at: i64,
    pub updated_at: i64,
    #[serde(default)]
    pub last_scan: Option<i64>,
    #[serde(default)]
    pub scan_version: Option<String>,
    #[serde(default)]
    pub is_missing: bool,
    #[serde(default)]
    pub is_invalid: bool,
    /// "book" or "podcast"; mirrors the variant of `media`
    pub media_type: String,
    pub media: MediaType,
    #[serde(default)]
    pub library_files: Option<Vec<LibraryFile>>,
    /// Only present when the item was requested with progress
    #[serde(default)]
    pub user_media_progress: Option<MediaProgress>,
}

impl LibraryItem {
    /// Decode an item payload.
    ///
    /// A `mediaType` string that disagrees with the deduced media is logged
    /// and left as received; the media variant is authoritative.
    pub fn from_json(payload: &str) -> Result<Self> {
        let item: LibraryItem = json::decode("library item", payload)?;
        if !item.media_type_consistent() {
            warn!(
                item_id = %item.id,
                media_type = %item.media_type,
                deduced = item.media.kind().as_str(),
                "library item mediaType disagrees with its media"
            );
        }
        Ok(item)
    }

    pub fn to_json(&self) -> Result<String> {
        json::encode("library item", self)
    }

    /// A new item for media found in a local folder
    pub fn new_local(
        folder: &Folder,
        rel_path: &str,
        media: MediaType,
        library_files: Vec<LibraryFile>,
    ) -> Self {
        let id = format!("local_{}", Uuid::new_v4());
        let now = Utc::now().timestamp_millis();
        let rel_path = rel_path.trim_start_matches('/');
        let path = format!("{}/{}", folder.full_path.trim_end_matches('/'), rel_path);

        debug!(item_id = %id, path = %path, kind = media.kind().as_str(), "created local library item");

        Self {
            ino: id.clone(),
            id,
            library_id: LOCAL_LIBRARY_ID.to_string(),
            folder_id: folder.id.clone(),
            path,
            rel_path: rel_path.to_string(),
            mtime_ms: now,
            ctime_ms: now,
            birthtime_ms: now,
            added_at: now,
            updated_at: now,
            last_scan: Some(now),
            scan_version: None,
            is_missing: false,
            is_invalid: false,
            media_type: media.kind().as_str().to_string(),
            media,
            library_files: Some(library_files),
            user_media_progress: None,
        }
    }

    /// Local counterpart of this item, with the same descriptive media and
    /// nothing downloaded yet
    pub fn local_copy(&self, folder: &Folder, rel_path: &str) -> Self {
        Self::new_local(folder, rel_path, self.media.local_copy(), Vec::new())
    }

    pub fn title(&self) -> &str {
        self.media.metadata().title()
    }

    pub fn author_name(&self) -> &str {
        self.media.metadata().author_display_name()
    }

    /// Cover reference resolved against `env`
    pub fn cover_uri(&self, env: &RuntimeEnvironment) -> Result<Url> {
        env.cover_uri(&self.id, self.media.cover_path())
    }

    /// Cover reference resolved against the installed runtime environment
    pub fn current_cover_uri(&self) -> Result<Url> {
        self.cover_uri(&environment::current())
    }

    /// Whether the server reports any tracks or episodes for this item
    pub fn check_has_tracks(&self) -> bool {
        self.media.has_tracks()
    }

    pub fn is_local(&self) -> bool {
        self.id.starts_with("local_")
    }

    fn media_type_consistent(&self) -> bool {
        self.media_type == self.media.kind().as_str()
    }
}

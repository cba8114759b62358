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


//! File and container descriptors
//!
//! Leaf records describing where audio lives: on-disk file metadata, the
//! library folders a scan walks, and the library itself. None of these carry
//! derived state.

use serde::{Deserialize, Serialize};

/// Media type string used by the server for podcast libraries and items
pub const MEDIA_TYPE_PODCAST: &str = "podcast";

/// Media type string used by the server for book libraries and items
pub const MEDIA_TYPE_BOOK: &str = "book";

/// Filesystem metadata for a single file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub filename: String,
    /// Extension including the leading dot (e.g. ".mp3")
    pub ext: String,
    pub path: String,
    pub rel_path: String,
    pub size: Option<i64>,
}

/// Any file belonging to a library item, audio or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryFile {
    pub ino: String,
    pub metadata: FileMetadata,
}

/// Server-side audio file record of a book or episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFile {
    pub index: i32,
    pub ino: String,
    pub metadata: FileMetadata,
}

/// A folder a library is scanned from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub full_path: String,
}

/// A library on the server (collection of folders of one media type)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub folders: Vec<Folder>,
    pub icon: String,
    pub media_type: String,
}

impl Library {
    pub fn is_podcast_library(&self) -> bool {
        self.media_type == MEDIA_TYPE_PODCAST
    }

    /// Find the folder with the given id
    pub fn folder(&self, folder_id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == folder_id)
    }
}

impl FileMetadata {
    /// Lowercased extension without the leading dot
    pub fn extension(&self) -> String {
        self.ext.trim_start_matches('.').to_lowercase()
    }
}

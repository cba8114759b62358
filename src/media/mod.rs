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


//! Media model
//!
//! Library items and the book/podcast media they own. The reconciliation
//! operations live on [`TrackCollection`]; everything else here is plain data
//! with derived views.
//!
//! # Example
//!
//! ```rust,no_run
//! use shelf_core::media::{LibraryItem, TrackCollection};
//!
//! # fn example(payload: &str) -> shelf_core::Result<()> {
//! let mut item = LibraryItem::from_json(payload)?;
//! item.media.remove_audio_track("local_file_1");
//! for chapter in item.media.as_book().map(|b| b.chapter_list()).unwrap_or_default() {
//!     println!("{} {:.1}-{:.1}", chapter.id, chapter.start, chapter.end);
//! }
//! # Ok(())
//! # }
//! ```

pub mod book;
pub mod episode;
pub mod file;
pub mod library_item;
pub mod media_type;
pub mod metadata;
pub mod podcast;
pub mod progress;
mod shape;
pub mod track;

pub use book::Book;
pub use episode::PodcastEpisode;
pub use file::{AudioFile, FileMetadata, Folder, Library, LibraryFile, MEDIA_TYPE_BOOK, MEDIA_TYPE_PODCAST};
pub use library_item::LibraryItem;
pub use media_type::{MediaType, TrackCollection};
pub use metadata::{Author, BookMetadata, MediaTypeMetadata, PodcastMetadata, UNKNOWN_AUTHOR};
pub use podcast::Podcast;
pub use progress::MediaProgress;
pub use shape::MediaKind;
pub use track::{AudioProbeFormat, AudioProbeResult, AudioProbeStream, AudioProbeTags, AudioTrack, BookChapter};

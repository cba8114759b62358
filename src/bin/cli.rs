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


use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shelf_core::media::{Folder, LibraryItem, TrackCollection};
use shelf_core::{json, ClientSettings};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shelf-cli")]
#[command(about = "Shelf CLI - inspect and reconcile library item payloads", long_about = None)]
struct Cli {
    /// Settings file (defaults to SHELF_CONFIG_PATH or ~/.config/shelf/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print title, author, cover and track summary of an item
    Show {
        /// Library item JSON file
        item: PathBuf,
    },
    /// List the chapters of a book item
    Chapters {
        item: PathBuf,
    },
    /// Remove a local file's track and print the reconciled item
    RemoveTrack {
        item: PathBuf,
        /// Local file id of the track to remove
        local_file_id: String,
    },
    /// Print an empty local copy of an item
    LocalCopy {
        item: PathBuf,
        /// Folder the local copy lives in
        #[arg(long, default_value = "/local")]
        folder: String,
        /// Path of the item below the folder
        #[arg(long)]
        rel_path: Option<String>,
    },
}

fn read_item(path: &Path) -> Result<LibraryItem> {
    let payload = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    LibraryItem::from_json(&payload)
        .with_context(|| format!("{} is not a library item", path.display()))
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => ClientSettings::load_from(Some(path.as_path())),
        None => ClientSettings::load(),
    }
    .context("failed to load settings")?;
    let env = settings.runtime_environment();

    match cli.command {
        Commands::Show { item } => {
            let item = read_item(&item)?;
            println!("{} ({})", item.title(), item.media.kind().as_str());
            println!("  Author: {}", item.author_name());
            match item.cover_uri(&env) {
                Ok(uri) => println!("  Cover:  {}", uri),
                Err(e) => println!("  Cover:  unavailable ({})", e.user_message()),
            }
            println!("  Has tracks: {}", item.check_has_tracks());
            for track in item.media.audio_tracks() {
                println!(
                    "  [{:>3}] {:>10} ms  {:>10} ms  {}",
                    track.index,
                    track.start_offset_ms(),
                    track.duration_ms(),
                    track.title
                );
            }
        }
        Commands::Chapters { item } => {
            let item = read_item(&item)?;
            let book = item
                .media
                .as_book()
                .with_context(|| format!("'{}' is a podcast; podcasts have no chapters", item.title()))?;
            for chapter in book.chapter_list() {
                println!(
                    "{:>3}  {:>9.1}  {:>9.1}  {}",
                    chapter.id,
                    chapter.start,
                    chapter.end,
                    chapter.title.as_deref().unwrap_or("")
                );
            }
        }
        Commands::RemoveTrack { item, local_file_id } => {
            let mut item = read_item(&item)?;
            let before = item.media.audio_tracks().len();
            item.media.remove_audio_track(&local_file_id);
            info!(
                local_file_id = %local_file_id,
                removed = before - item.media.audio_tracks().len(),
                "reconciled item"
            );
            println!("{}", json::encode_pretty(&item)?);
        }
        Commands::LocalCopy { item, folder, rel_path } => {
            let item = read_item(&item)?;
            let folder = Folder {
                id: "local".to_string(),
                full_path: folder,
            };
            let rel_path = rel_path.unwrap_or_else(|| item.rel_path.clone());
            let copy = item.local_copy(&folder, &rel_path);
            println!("{}", json::encode_pretty(&copy)?);
        }
    }

    Ok(())
}

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


//! Configuration and runtime environment
//!
//! - `settings` - file/environment-variable settings loaded with the `config` crate
//! - `environment` - process-wide server address and token used by derived views

pub mod environment;
pub mod settings;

// Re-export commonly used types
pub use environment::{RuntimeEnvironment, DEFAULT_PLACEHOLDER_COVER};
pub use settings::ClientSettings;

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


//! JSON decode/encode helpers
//!
//! All payload mapping goes through here so failures are logged once, with
//! the entity name, before being returned as [`ShelfError`].

use crate::error::{Result, ShelfError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Decode `json` into `T`, logging the failure against `entity`
pub fn decode<T: DeserializeOwned>(entity: &str, json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| {
        warn!(entity, error = %e, "failed to decode payload");
        ShelfError::from(e)
    })
}

pub fn encode<T: Serialize>(entity: &str, value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    debug!(entity, bytes = json.len(), "encoded payload");
    Ok(json)
}

pub fn encode_pretty<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

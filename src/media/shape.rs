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


//! Shape-based variant deduction
//!
//! Server payloads carry no type tag for book vs podcast media (or their
//! metadata). The variant is deduced from which variant-specific keys are
//! present on the JSON object: podcast if any podcast key is present,
//! otherwise book. Anything that is not a JSON object matches neither.

use crate::error::{Result, ShelfError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which of the two media shapes a payload has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Book,
    Podcast,
}

impl MediaKind {
    /// The server's `mediaType` string for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Book => super::file::MEDIA_TYPE_BOOK,
            MediaKind::Podcast => super::file::MEDIA_TYPE_PODCAST,
        }
    }
}

/// Deduce the kind of `value` from the presence of `podcast_keys`
pub(crate) fn deduce(entity: &str, value: &Value, podcast_keys: &[&str]) -> Result<MediaKind> {
    let object = value.as_object().ok_or_else(|| {
        ShelfError::unrecognised_shape(
            entity,
            format!("expected a JSON object, found {}", value_kind(value)),
        )
    })?;

    if podcast_keys.iter().any(|key| object.contains_key(*key)) {
        Ok(MediaKind::Podcast)
    } else {
        Ok(MediaKind::Book)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

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


//! Process-wide runtime environment
//!
//! The host app installs the connected server's address and the user's auth
//! token once it has them; derived views (cover references) read a snapshot.
//! This layer never writes it on its own.

use crate::error::{Result, ShelfError};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tracing::debug;
use url::Url;

/// Cover reference used when an item has no cover of its own
pub const DEFAULT_PLACEHOLDER_COVER: &str = "resource://shelf/drawable/icon";

lazy_static::lazy_static! {
    static ref RUNTIME_ENVIRONMENT: RwLock<RuntimeEnvironment> =
        RwLock::new(RuntimeEnvironment::default());
}

/// Server connection values supplied by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeEnvironment {
    /// Base address of the server, e.g. `https://abs.example.com`
    pub server_address: Option<String>,
    pub token: Option<String>,
    pub placeholder_cover: String,
}

impl Default for RuntimeEnvironment {
    fn default() -> Self {
        Self {
            server_address: None,
            token: None,
            placeholder_cover: DEFAULT_PLACEHOLDER_COVER.to_string(),
        }
    }
}

impl RuntimeEnvironment {
    pub fn new<S: Into<String>>(server_address: S, token: S) -> Self {
        Self {
            server_address: Some(server_address.into()),
            token: Some(token.into()),
            ..Default::default()
        }
    }

    /// Cover reference for a library item.
    ///
    /// Items without a cover path get the placeholder; otherwise the server's
    /// cover endpoint for the item, authenticated with the token.
    pub fn cover_uri(&self, item_id: &str, cover_path: Option<&str>) -> Result<Url> {
        if cover_path.is_none() {
            return Ok(Url::parse(&self.placeholder_cover)?);
        }

        let server_address = self
            .server_address
            .as_deref()
            .ok_or_else(|| ShelfError::EnvironmentNotConfigured("server address".to_string()))?;
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ShelfError::EnvironmentNotConfigured("auth token".to_string()))?;

        let uri = format!(
            "{}/api/items/{}/cover?token={}",
            server_address.trim_end_matches('/'),
            urlencoding::encode(item_id),
            urlencoding::encode(token)
        );
        Ok(Url::parse(&uri)?)
    }
}

/// Replace the process-wide environment
pub fn install(environment: RuntimeEnvironment) {
    debug!(
        server_address = environment.server_address.as_deref().unwrap_or(""),
        has_token = environment.token.is_some(),
        "installing runtime environment"
    );
    let mut guard = RUNTIME_ENVIRONMENT
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = environment;
}

/// Snapshot of the process-wide environment
pub fn current() -> RuntimeEnvironment {
    RUNTIME_ENVIRONMENT
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

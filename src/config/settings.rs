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


//! Settings loading
//!
//! `ClientSettings::load` reads an optional TOML file (from `SHELF_CONFIG_PATH`
//! or the XDG config dir), then environment variables with the `SHELF` prefix
//! (`SHELF__SERVER_ADDRESS`, `SHELF__TOKEN`, ...), over struct defaults.

use super::environment::{RuntimeEnvironment, DEFAULT_PLACEHOLDER_COVER};
use crate::error::{Result, ShelfError};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use url::Url;

/// Settings for connecting the model to a server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub server_address: Option<String>,
    pub token: Option<String>,
    pub placeholder_cover: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_address: None,
            token: None,
            placeholder_cover: DEFAULT_PLACEHOLDER_COVER.to_string(),
        }
    }
}

impl ClientSettings {
    /// Load settings from the resolved config file and environment
    pub fn load() -> Result<Self> {
        Self::load_from(resolve_config_path().as_deref())
    }

    /// Load settings from `path` (if it exists) and environment
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        builder = builder.add_source(::config::Environment::with_prefix("SHELF").separator("__"));

        let settings: ClientSettings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the server address (if any) is an http(s) URL
    pub fn validate(&self) -> Result<()> {
        if let Some(address) = &self.server_address {
            let url = Url::parse(address).map_err(|e| {
                ShelfError::InvalidConfiguration(format!("server_address '{}': {}", address, e))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ShelfError::InvalidConfiguration(format!(
                    "server_address must be http or https, got '{}'",
                    url.scheme()
                )));
            }
        }
        Url::parse(&self.placeholder_cover).map_err(|e| {
            ShelfError::InvalidConfiguration(format!(
                "placeholder_cover '{}': {}",
                self.placeholder_cover, e
            ))
        })?;
        Ok(())
    }

    pub fn runtime_environment(&self) -> RuntimeEnvironment {
        RuntimeEnvironment {
            server_address: self.server_address.clone(),
            token: self.token.clone(),
            placeholder_cover: self.placeholder_cover.clone(),
        }
    }
}

/// Resolve the config path from `SHELF_CONFIG_PATH` or XDG defaults
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SHELF_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// `$XDG_CONFIG_HOME/shelf/config.toml`, or `~/.config/shelf/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("shelf").join("config.toml"))
}

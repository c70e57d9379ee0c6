// Copyright (C) 2026  Clipdeck Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! This module manages the application configuration file.

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "clipdeck";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub version: u32,
    /// Directory scanned for MP4 clips at startup.
    pub media_dir: String,
    /// Baseline playback volume, `0` to `100`.
    pub volume: u32,
    /// Length of the fade to black, in seconds.
    pub fade_seconds: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            media_dir: ".".to_string(),
            volume: 100,
            fade_seconds: 2.0,
        }
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

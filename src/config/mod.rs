// Copyright (C) 2026  Caprica Software Limited
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
//! This module manages the application configuration file. Nothing about
//! playback is ever written back to it.

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "onetrack";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    /// The audio file to play when none is given on the command line.
    pub(crate) track: Option<String>,
    pub(crate) report_interval_ms: u64,
    pub(crate) fine_seek_ms: i64,
    pub(crate) seek_ms: i64,
    pub(crate) log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            track: None,
            report_interval_ms: 1000,
            fine_seek_ms: 5_000,
            seek_ms: 20_000,
            log_file: None,
        }
    }
}

/// Loads the configuration file, creating it with defaults if it does not
/// exist yet.
pub(crate) fn load_config() -> Result<AppConfig, confy::ConfyError> {
    confy::load(CONFIG_NAME, None)
}

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

//! Track metadata.
//!
//! Tags and the audio properties are read with `Lofty` when the player is
//! created, so the duration is known before the backend has loaded the file.

use std::path::Path;

use anyhow::{Context, Result};
use lofty::prelude::*;
use lofty::probe::Probe;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TrackInfo {
    pub(crate) title: String,
    pub(crate) artist: Option<String>,
    pub(crate) duration_ms: u64,
    pub(crate) filename: String,
}

impl TrackInfo {
    /// Reads the tags and properties of an audio file.
    ///
    /// A file without tags is still playable, the title then falls back to
    /// the file name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not a recognised
    /// audio format.
    pub(crate) fn probe(path: &Path) -> Result<Self> {
        let filename = path
            .to_str()
            .context("Path contains invalid UTF-8")?
            .to_string();

        let tagged_file = Probe::open(path)
            .and_then(|p| p.read())
            .with_context(|| format!("Failed to read audio file: {}", path.display()))?;

        let duration_ms =
            u64::try_from(tagged_file.properties().duration().as_millis()).unwrap_or(u64::MAX);

        let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());
        if tag.is_none() {
            warn!(file = %path.display(), "No tags found");
        }

        let title = tag
            .and_then(|t| t.title().map(|s| s.to_string()))
            .unwrap_or_else(|| Self::fallback_title(path));
        let artist = tag.and_then(|t| t.artist().map(|s| s.to_string()));

        Ok(Self {
            title,
            artist,
            duration_ms,
            filename,
        })
    }

    fn fallback_title(path: &Path) -> String {
        path.file_stem()
            .or_else(|| path.file_name())
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown Track".to_string())
    }
}

// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use crate::notes::NoteError;

/// Typed error for config load/parse failures so callers can distinguish
/// e.g. file-not-found from invalid sampler settings without string matching.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config load/parse error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("time fraction must be positive and finite, got {0}")]
    InvalidTimeFraction(f64),

    #[error("{field} {value} in {file} is not a valid MIDI number (0-127)")]
    OutOfRange {
        file: String,
        field: &'static str,
        value: u8,
    },

    #[error("invalid notes in {file}: {source}")]
    Notes {
        file: String,
        #[source]
        source: NoteError,
    },
}

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
use std::path::Path;

use config::{Config, File};
use serde::Deserialize;

use super::error::ConfigError;
use super::sampler::SamplerConfig;

/// A file representation of a corpus: sampler settings plus the note tables to draw from.
#[derive(Deserialize)]
pub(super) struct Corpus {
    /// The number of items in a batch.
    batch_size: Option<usize>,
    /// The number of steps in one bar.
    seq_len: Option<usize>,
    /// The duration of one step.
    time_fraction: Option<f64>,
    /// Paths to the note table files, relative to the corpus file.
    #[serde(default)]
    tables: Vec<String>,
}

impl Corpus {
    /// Parses a corpus from a file. The format is chosen by the file extension.
    pub(super) fn deserialize(path: &Path) -> Result<Corpus, ConfigError> {
        Ok(Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize::<Corpus>()?)
    }

    /// Builds the sampler configuration, falling back to defaults for anything unset.
    pub(super) fn sampler_config(&self) -> Result<SamplerConfig, ConfigError> {
        let defaults = SamplerConfig::default();
        SamplerConfig::new(
            self.batch_size.unwrap_or(defaults.batch_size()),
            self.seq_len.unwrap_or(defaults.seq_len()),
            self.time_fraction.unwrap_or(defaults.time_fraction()),
        )
    }

    /// Gets the note table paths.
    pub(super) fn tables(&self) -> &[String] {
        &self.tables
    }
}

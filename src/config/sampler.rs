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
use super::error::ConfigError;

/// Default number of items in a batch.
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Default number of steps in one bar.
pub const DEFAULT_SEQ_LEN: usize = 10;

/// Default duration of one step.
pub const DEFAULT_TIME_FRACTION: f64 = 0.1;

/// Settings that shape the tensors drawn by a sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerConfig {
    /// The number of items in a batch.
    batch_size: usize,
    /// The number of steps in one bar. A draw holds two bars.
    seq_len: usize,
    /// The duration of one step, in the time units of the note tables.
    time_fraction: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig {
            batch_size: DEFAULT_BATCH_SIZE,
            seq_len: DEFAULT_SEQ_LEN,
            time_fraction: DEFAULT_TIME_FRACTION,
        }
    }
}

impl SamplerConfig {
    /// Creates a new sampler configuration.
    pub fn new(
        batch_size: usize,
        seq_len: usize,
        time_fraction: f64,
    ) -> Result<SamplerConfig, ConfigError> {
        let config = SamplerConfig {
            batch_size,
            seq_len,
            time_fraction,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the settings can be sampled with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.time_fraction.is_finite() || self.time_fraction <= 0.0 {
            return Err(ConfigError::InvalidTimeFraction(self.time_fraction));
        }
        Ok(())
    }

    /// Gets the batch size.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Gets the number of steps in one bar.
    pub fn seq_len(&self) -> usize {
        self.seq_len
    }

    /// Gets the duration of one step.
    pub fn time_fraction(&self) -> f64 {
        self.time_fraction
    }

    /// The duration covered by one bar.
    pub fn bar_duration(&self) -> f64 {
        self.seq_len as f64 * self.time_fraction
    }
}

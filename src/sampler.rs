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
use std::sync::Arc;

use midly::num::u7;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, span, trace, Level, Span};

use crate::config::SamplerConfig;
use crate::feature::{pitch_class_indicator, PITCH_CLASSES};
use crate::notes::{corpus_programs, NoteTable};
use crate::tensor::Tensor;

/// The number of bars in a single draw.
pub const BARS_PER_DRAW: usize = 2;

/// Implementers draw batches from the "true" distribution that a generative model is trained
/// to imitate.
pub trait TrueSampler {
    /// Draws a batch of samples.
    fn draw(&mut self) -> Tensor;
}

/// Draws two-bar pitch class windows from a corpus of note tables.
///
/// Each draw has the shape [batch, channel, 2 * seq_len, 12], with one channel per distinct
/// program in the corpus. For every batch item and channel, a source table is chosen at random
/// and a random window of that program's notes is quantized into seq_len steps.
pub struct BarTrueSampler<R = StdRng> {
    /// The note tables to draw from.
    tables: Arc<[NoteTable]>,
    /// The programs in the corpus. Index is channel.
    programs: Vec<u7>,
    /// The sampler settings.
    config: SamplerConfig,
    /// The random source for table and window selection.
    rng: R,
    /// The logging span.
    span: Span,
}

impl BarTrueSampler<StdRng> {
    /// Creates a sampler with a seeded random source. Samplers created with the same seed over
    /// the same corpus produce the same draws.
    pub fn from_seed(
        tables: impl Into<Arc<[NoteTable]>>,
        config: SamplerConfig,
        seed: u64,
    ) -> BarTrueSampler<StdRng> {
        BarTrueSampler::new(tables, config, StdRng::seed_from_u64(seed))
    }

    /// Creates a sampler with a random source seeded from the operating system.
    pub fn from_entropy(
        tables: impl Into<Arc<[NoteTable]>>,
        config: SamplerConfig,
    ) -> BarTrueSampler<StdRng> {
        BarTrueSampler::new(tables, config, StdRng::from_entropy())
    }
}

impl<R: Rng> BarTrueSampler<R> {
    /// Creates a new sampler over the given tables.
    pub fn new(
        tables: impl Into<Arc<[NoteTable]>>,
        config: SamplerConfig,
        rng: R,
    ) -> BarTrueSampler<R> {
        let tables = tables.into();
        let programs = corpus_programs(&tables);
        let span = span!(Level::DEBUG, "bar sampler");

        {
            let _enter = span.enter();
            debug!(
                tables = tables.len(),
                channels = programs.len(),
                batch_size = config.batch_size(),
                seq_len = config.seq_len(),
                time_fraction = config.time_fraction(),
                "Created sampler"
            );
        }

        BarTrueSampler {
            tables,
            programs,
            config,
            rng,
            span,
        }
    }

    /// Gets the programs in channel order.
    pub fn programs(&self) -> &[u7] {
        &self.programs
    }

    /// The number of channels in each draw.
    pub fn channels(&self) -> usize {
        self.programs.len()
    }

    /// Gets the sampler settings.
    pub fn config(&self) -> SamplerConfig {
        self.config
    }

    /// Gets the note tables being drawn from.
    pub fn tables(&self) -> &[NoteTable] {
        &self.tables
    }

    /// The shape of every tensor returned by draw.
    pub fn draw_shape(&self) -> [usize; 4] {
        [
            self.config.batch_size(),
            self.programs.len(),
            BARS_PER_DRAW * self.config.seq_len(),
            PITCH_CLASSES,
        ]
    }

    /// Samples one bar for every batch item and channel into the tensor, starting at the
    /// given step. Returns the number of channels that were filled.
    fn fill_bar(&mut self, tensor: &mut Tensor, step_offset: usize) -> usize {
        let seq_len = self.config.seq_len();
        let time_fraction = self.config.time_fraction();
        let bar_duration = self.config.bar_duration();
        let tables = &self.tables;
        let rng = &mut self.rng;

        let mut filled = 0;
        for batch in 0..self.config.batch_size() {
            for (channel, program) in self.programs.iter().enumerate() {
                let Some(table) = tables.choose(rng) else {
                    continue;
                };

                let notes = table.for_program(*program);
                if notes.len() < seq_len {
                    trace!(
                        batch,
                        channel,
                        notes = notes.len(),
                        "Too few notes for program, skipping"
                    );
                    continue;
                }

                let (Some(low), Some(end)) = (notes.min_start(), notes.max_end()) else {
                    continue;
                };
                let high = end - bar_duration;
                if !low.is_finite() || !high.is_finite() || high < low {
                    trace!(batch, channel, low, high, "Window does not fit, skipping");
                    continue;
                }
                // Interpolate rather than use high - low, which can overflow for finite bounds.
                let t: f64 = rng.gen();
                let anchor = low * (1.0 - t) + high * t;

                for step in 0..seq_len {
                    let window_start = anchor + step as f64 * time_fraction;
                    let window_end = anchor + (step + 1) as f64 * time_fraction;
                    let indicator =
                        pitch_class_indicator(notes.overlapping(window_start, window_end));
                    tensor
                        .row_mut(batch, channel, step_offset + step)
                        .copy_from_slice(&indicator);
                }
                filled += 1;
            }
        }

        filled
    }
}

impl<R: Rng> TrueSampler for BarTrueSampler<R> {
    fn draw(&mut self) -> Tensor {
        let span = self.span.clone();
        let _enter = span.enter();

        let mut tensor = Tensor::zeros(self.draw_shape());
        let seq_len = self.config.seq_len();
        let filled = (0..BARS_PER_DRAW)
            .map(|bar| self.fill_bar(&mut tensor, bar * seq_len))
            .sum::<usize>();

        debug!(
            filled,
            skipped = BARS_PER_DRAW * self.config.batch_size() * self.programs.len() - filled,
            "Drew batch"
        );
        tensor
    }
}

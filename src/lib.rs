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
//! Draws pitch class training batches from MIDI note tables.
//!
//! A corpus of [NoteTable]s, one per MIDI file, is sampled by a [BarTrueSampler]. Every draw is
//! a [Tensor] of shape [batch, channel, 2 * seq_len, 12] where each channel is one instrument
//! program and each step holds the pitch classes sounding in that slice of time.
pub mod config;
pub mod feature;
pub mod notes;
pub mod sampler;
pub mod tensor;
pub mod verify;

mod util;

pub use config::{ConfigError, SamplerConfig};
pub use notes::{Note, NoteError, NoteTable};
pub use sampler::{BarTrueSampler, TrueSampler};
pub use tensor::{Tensor, TensorError};

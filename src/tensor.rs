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
use std::fmt;

/// The number of dimensions of a sample tensor.
pub const RANK: usize = 4;

/// Errors raised by tensor operations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TensorError {
    #[error("axis {0} is out of range for a rank 4 tensor")]
    InvalidAxis(usize),

    #[error("cannot concatenate shapes {left:?} and {right:?} along axis {axis}")]
    ShapeMismatch {
        left: [usize; RANK],
        right: [usize; RANK],
        axis: usize,
    },
}

/// A dense, row major tensor of rank 4, laid out as [batch, channel, step, pitch class].
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: [usize; RANK],
    data: Vec<f32>,
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [batch, channel, steps, classes] = self.shape;
        write!(
            f,
            "Tensor ({} x {} x {} x {}, {} active)",
            batch,
            channel,
            steps,
            classes,
            self.count_nonzero()
        )
    }
}

impl Tensor {
    /// Creates a tensor of the given shape filled with zeros.
    pub fn zeros(shape: [usize; RANK]) -> Tensor {
        Tensor {
            shape,
            data: vec![0.0; shape.iter().product()],
        }
    }

    /// Gets the shape of the tensor.
    pub fn shape(&self) -> [usize; RANK] {
        self.shape
    }

    /// The total number of elements in the tensor.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if any dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gets the value at the given index, or None if the index is out of range.
    pub fn get(&self, index: [usize; RANK]) -> Option<f32> {
        self.offset(index).map(|offset| self.data[offset])
    }

    /// Sets the value at the given index.
    ///
    /// Panics if the index is out of range.
    pub fn set(&mut self, index: [usize; RANK], value: f32) {
        match self.offset(index) {
            Some(offset) => self.data[offset] = value,
            None => panic!("index {:?} out of range for shape {:?}", index, self.shape),
        }
    }

    /// Gets the innermost row at [batch, channel, step].
    ///
    /// Panics if the index is out of range.
    pub fn row(&self, batch: usize, channel: usize, step: usize) -> &[f32] {
        let start = self.row_offset(batch, channel, step);
        &self.data[start..start + self.shape[3]]
    }

    /// Gets the innermost row at [batch, channel, step] mutably.
    ///
    /// Panics if the index is out of range.
    pub fn row_mut(&mut self, batch: usize, channel: usize, step: usize) -> &mut [f32] {
        let start = self.row_offset(batch, channel, step);
        let width = self.shape[3];
        &mut self.data[start..start + width]
    }

    /// Concatenates two tensors along the given axis. All other axes must match.
    pub fn concat(&self, other: &Tensor, axis: usize) -> Result<Tensor, TensorError> {
        if axis >= RANK {
            return Err(TensorError::InvalidAxis(axis));
        }
        let mismatched = (0..RANK).any(|dim| dim != axis && self.shape[dim] != other.shape[dim]);
        if mismatched {
            return Err(TensorError::ShapeMismatch {
                left: self.shape,
                right: other.shape,
                axis,
            });
        }

        let mut shape = self.shape;
        shape[axis] += other.shape[axis];

        // Every outer index owns one contiguous block in each input.
        let outer: usize = self.shape[..axis].iter().product();
        let left_block: usize = self.shape[axis..].iter().product();
        let right_block: usize = other.shape[axis..].iter().product();

        let mut data = Vec::with_capacity(self.data.len() + other.data.len());
        for i in 0..outer {
            data.extend_from_slice(&self.data[i * left_block..(i + 1) * left_block]);
            data.extend_from_slice(&other.data[i * right_block..(i + 1) * right_block]);
        }

        Ok(Tensor { shape, data })
    }

    /// Counts the elements that are not zero.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|value| **value != 0.0).count()
    }

    /// Gets the underlying row major storage.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Consumes the tensor and returns its row major storage.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    fn offset(&self, index: [usize; RANK]) -> Option<usize> {
        if index.iter().zip(self.shape.iter()).any(|(i, dim)| i >= dim) {
            return None;
        }
        Some(
            index
                .iter()
                .zip(self.shape.iter())
                .fold(0, |offset, (i, dim)| offset * dim + i),
        )
    }

    fn row_offset(&self, batch: usize, channel: usize, step: usize) -> usize {
        match self.offset([batch, channel, step, 0]) {
            Some(offset) => offset,
            None => panic!(
                "row [{}, {}, {}] out of range for shape {:?}",
                batch, channel, step, self.shape
            ),
        }
    }
}

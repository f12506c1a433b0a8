//! Module implementing the dense spike matrix consumed by the raster plot.
//!
//! Rows are neurons, columns are the individual time steps. A spike is any
//! non-zero entry, although 1s and 0s are expected.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::error::RasterError;

/// A dense `(num_neurons, num_steps)` matrix stored row by row.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct SpikeMatrix {
    num_neurons: usize,
    num_steps: usize,
    data: Vec<f64>,
}

impl SpikeMatrix {
    /// Create a spike matrix from a flat row-major buffer.
    /// Returns an error if the buffer length does not match the shape.
    pub fn build(num_neurons: usize, num_steps: usize, data: Vec<f64>) -> Result<Self, RasterError> {
        let len = checked_len(num_neurons, num_steps)?;
        if data.len() != len {
            return Err(RasterError::InvalidShape(format!(
                "expected {} x {} = {} values, got {}",
                num_neurons,
                num_steps,
                len,
                data.len()
            )));
        }

        Ok(SpikeMatrix {
            num_neurons,
            num_steps,
            data,
        })
    }

    /// Create an all-zero spike matrix, i.e., without any spike.
    /// Returns an error if the shape does not fit in memory.
    pub fn zeros(num_neurons: usize, num_steps: usize) -> Result<Self, RasterError> {
        let len = checked_len(num_neurons, num_steps)?;
        Ok(SpikeMatrix {
            num_neurons,
            num_steps,
            data: vec![0.0; len],
        })
    }

    /// Create a spike matrix from its rows, one per neuron.
    /// Returns an error if the rows do not all have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, RasterError> {
        let rows: Vec<&[f64]> = rows.iter().map(|row| row.as_ref()).collect_vec();
        let num_steps = rows.first().map_or(0, |row| row.len());

        if let Some((n, row)) = rows.iter().find_position(|row| row.len() != num_steps) {
            return Err(RasterError::InvalidShape(format!(
                "row {} has {} columns, expected {}",
                n,
                row.len(),
                num_steps
            )));
        }

        let data = rows.iter().flat_map(|row| row.iter().copied()).collect_vec();

        SpikeMatrix::build(rows.len(), num_steps, data)
    }

    /// Returns the number of neurons, i.e., the number of rows.
    pub fn num_neurons(&self) -> usize {
        self.num_neurons
    }

    /// Returns the number of time steps, i.e., the number of columns.
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Returns the shape `(num_neurons, num_steps)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.num_neurons, self.num_steps)
    }

    /// Returns the row of the given neuron, or `None` if out of bounds.
    pub fn row(&self, neuron: usize) -> Option<&[f64]> {
        if neuron >= self.num_neurons {
            return None;
        }
        let start = neuron * self.num_steps;
        Some(&self.data[start..start + self.num_steps])
    }

    /// Returns the value at the given neuron and time step, or `None` if out of bounds.
    pub fn get(&self, neuron: usize, step: usize) -> Option<f64> {
        if step >= self.num_steps {
            return None;
        }
        self.row(neuron).map(|row| row[step])
    }

    /// Set the value at the given neuron and time step.
    pub fn set(&mut self, neuron: usize, step: usize, value: f64) -> Result<(), RasterError> {
        if neuron >= self.num_neurons || step >= self.num_steps {
            return Err(RasterError::InvalidShape(format!(
                "index ({}, {}) out of bounds for shape ({}, {})",
                neuron, step, self.num_neurons, self.num_steps
            )));
        }
        self.data[neuron * self.num_steps + step] = value;
        Ok(())
    }

    /// An iterator over the rows of the matrix, one per neuron.
    /// An empty-column matrix still yields one (empty) row per neuron.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.num_neurons).map(move |n| &self.data[n * self.num_steps..(n + 1) * self.num_steps])
    }

    /// Returns the total number of non-zero entries.
    pub fn num_spikes(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0.0).count()
    }

    /// Swap neurons and time steps.
    /// Useful for data recorded one time step at a time, i.e., one row per step.
    pub fn transpose(&self) -> Self {
        let data = (0..self.num_steps)
            .flat_map(|t| (0..self.num_neurons).map(move |n| self.data[n * self.num_steps + t]))
            .collect_vec();

        SpikeMatrix {
            num_neurons: self.num_steps,
            num_steps: self.num_neurons,
            data,
        }
    }
}

fn checked_len(num_neurons: usize, num_steps: usize) -> Result<usize, RasterError> {
    num_neurons.checked_mul(num_steps).ok_or_else(|| {
        RasterError::InvalidShape(format!(
            "shape ({}, {}) overflows the number of values",
            num_neurons, num_steps
        ))
    })
}

impl TryFrom<Vec<Vec<f64>>> for SpikeMatrix {
    type Error = RasterError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        SpikeMatrix::from_rows(&rows)
    }
}

impl From<SpikeMatrix> for Vec<Vec<f64>> {
    fn from(matrix: SpikeMatrix) -> Self {
        matrix.rows().map(|row| row.to_vec()).collect()
    }
}

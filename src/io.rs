//! Reading spike matrices from, and writing figures to, JSON files.
//!
//! A spike matrix is stored as an array of arrays of numbers, e.g., `[[0, 1, 0], [1, 0, 0]]`.
//! Recordings are often written one time step at a time; use [`Layout::TimeMajor`] to load them.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::canvas::Figure;
use super::error::RasterError;
use super::spike_matrix::SpikeMatrix;

/// How the rows of a stored matrix are to be interpreted.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Layout {
    /// One row per neuron, one column per time step.
    #[default]
    NeuronMajor,
    /// One row per time step, one column per neuron.
    TimeMajor,
}

fn arrange(matrix: SpikeMatrix, layout: Layout) -> SpikeMatrix {
    match layout {
        Layout::NeuronMajor => matrix,
        Layout::TimeMajor => matrix.transpose(),
    }
}

/// Parse a spike matrix from a JSON string.
pub fn spike_matrix_from_json(json: &str, layout: Layout) -> Result<SpikeMatrix, RasterError> {
    let matrix: SpikeMatrix = serde_json::from_str(json)?;
    Ok(arrange(matrix, layout))
}

/// Read a spike matrix from a JSON file.
pub fn read_spike_matrix<P: AsRef<Path>>(path: P, layout: Layout) -> Result<SpikeMatrix, RasterError> {
    let file = File::open(path.as_ref())
        .map_err(|e| RasterError::IOError(format!("{}: {}", path.as_ref().display(), e)))?;
    let matrix: SpikeMatrix = serde_json::from_reader(BufReader::new(file))?;
    let matrix = arrange(matrix, layout);

    debug!(
        "Read a {} x {} spike matrix from {}",
        matrix.num_neurons(),
        matrix.num_steps(),
        path.as_ref().display()
    );
    Ok(matrix)
}

/// Write a spike matrix to a JSON file, one row per neuron.
pub fn write_spike_matrix<P: AsRef<Path>>(path: P, matrix: &SpikeMatrix) -> Result<(), RasterError> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer(&mut writer, matrix)?;
    writer.flush()?;
    Ok(())
}

/// Write a figure, i.e., its segments, limits and labels, to a pretty-printed JSON file.
/// JSON has no NaN or infinity, hence figures with non-finite values, e.g., drawn with a non-finite `dt`,
/// are rejected before anything is written.
pub fn write_figure<P: AsRef<Path>>(path: P, figure: &Figure) -> Result<(), RasterError> {
    if !figure.is_finite() {
        return Err(RasterError::SerializationError(
            "figures with non-finite positions or limits cannot be stored as JSON".to_string(),
        ));
    }
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, figure)?;
    writer.flush()?;
    debug!("Saved figure with {} ticks to {}", figure.num_segments(), path.as_ref().display());
    Ok(())
}

/// Read a figure previously saved with [`write_figure`].
pub fn read_figure<P: AsRef<Path>>(path: P) -> Result<Figure, RasterError> {
    let file = File::open(path.as_ref())?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

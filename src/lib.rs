//! This crate provides raster plots of spike trains in Rust.
//!
//! Spike trains are given as a dense matrix, whose rows are neurons and columns are the individual time steps,
//! with 1s at spike times and 0s otherwise.
//!
//! # Plotting onto a Figure
//!
//! ```rust
//! use rusty_raster::canvas::Figure;
//! use rusty_raster::raster::{rasterplot, RasterOptions};
//! use rusty_raster::spike_matrix::SpikeMatrix;
//!
//! let spikes = SpikeMatrix::from_rows(&[[0.0, 1.0, 0.0, 1.0], [0.0, 0.0, 1.0, 0.0]]).unwrap();
//! let mut figure = Figure::new();
//! rasterplot(&spikes, &RasterOptions::default().with_dt(0.5), &mut figure).unwrap();
//!
//! assert_eq!(figure.num_segments(), 3);
//! assert_eq!(figure.xlim(), Some((-0.5, 2.5)));
//! ```
//!
//! # Rendering
//!
//! ```rust
//! use rusty_raster::canvas::Figure;
//! use rusty_raster::raster::{rasterplot, RasterOptions};
//! use rusty_raster::render::{render_svg_string, RenderOptions};
//! use rusty_raster::spike_matrix::SpikeMatrix;
//!
//! let spikes = SpikeMatrix::from_rows(&[[0.0, 1.0, 1.0]]).unwrap();
//! let mut figure = Figure::new();
//! rasterplot(&spikes, &RasterOptions::default(), &mut figure).unwrap();
//!
//! let svg = render_svg_string(&figure, &RenderOptions::default()).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod canvas;
pub mod color;
pub mod error;
pub mod io;
pub mod raster;
pub mod render;
pub mod spike_matrix;

/// The default duration of a time step, i.e., of one column of a spike matrix.
pub const DEFAULT_DT: f64 = 0.001;
/// Minimum number of neurons to consider parallel processing.
pub const MIN_PARALLEL_NEURONS: usize = 100;

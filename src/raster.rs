//! Module implementing the raster plot of a spike matrix.
//!
//! Each neuron (row) gets its own line of ticks: neuron `n` spans `[n + 0.5, n + 1.5]` on the vertical axis,
//! and one vertical tick is drawn at each of its spike times.
//!
//! # Examples
//!
//! ```
//! use rusty_raster::canvas::Figure;
//! use rusty_raster::raster::{rasterplot, RasterOptions};
//! use rusty_raster::spike_matrix::SpikeMatrix;
//!
//! let spikes = SpikeMatrix::from_rows(&[[0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]).unwrap();
//! let mut figure = Figure::new();
//! rasterplot(&spikes, &RasterOptions::default(), &mut figure).unwrap();
//!
//! // The spike of neuron 1 at time 0 is not drawn
//! assert_eq!(figure.num_segments(), 1);
//! assert_eq!(figure.ylim(), Some((0.5, 2.5)));
//! ```

use derivative::Derivative;
use itertools::Itertools;
use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::canvas::{current_figure, lock_figure, Canvas, SharedFigure};
use super::color::Color;
use super::error::RasterError;
use super::spike_matrix::SpikeMatrix;
use super::{DEFAULT_DT, MIN_PARALLEL_NEURONS};

/// The label of the horizontal axis.
pub const TIME_LABEL: &str = "Time [ms]";
/// The label of the vertical axis.
pub const NEURON_LABEL: &str = "Neuron Index";

/// Drawing parameters of a raster plot.
#[derive(Derivative, Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[derivative(Default)]
pub struct RasterOptions {
    /// The duration of one time step, i.e., of one column of the spike matrix.
    #[derivative(Default(value = "DEFAULT_DT"))]
    pub dt: f64,
    /// The color of all ticks.
    pub color: Color,
}

impl RasterOptions {
    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Returns the time of each step, i.e., `[0, dt, 2dt, ..., (num_steps - 1)dt]`.
pub fn time_space(num_steps: usize, dt: f64) -> Vec<f64> {
    (0..num_steps).map(|t| t as f64 * dt).collect()
}

/// Returns the spike times of a single neuron.
///
/// The row is multiplied elementwise by the time space and only the strictly positive products are kept.
/// Two consequences follow:
/// - a spike in the first column is never returned, since its time is 0;
/// - a value other than 1 scales the spike time, e.g., a value of 2 in column `c` yields `2 * c * dt`.
pub fn spike_times(row: &[f64], tspace: &[f64]) -> Vec<f64> {
    row.iter()
        .zip_eq(tspace)
        .map(|(s, t)| s * t)
        .filter(|&t| t > 0.0)
        .collect()
}

/// Draw a raster plot of the spike matrix onto the canvas, and return the canvas.
///
/// Every neuron `n` gets one tick per spike time, spanning `[n + 0.5, n + 1.5]`.
/// The vertical axis is then limited to `[0.5, N + 0.5]`, the horizontal axis to `[-dt, T * dt + dt]`,
/// and both axes are labeled. The step duration is not validated: a non-positive `dt` yields degenerate
/// or inverted limits.
pub fn rasterplot<'a, C: Canvas>(
    spikes: &SpikeMatrix,
    options: &RasterOptions,
    canvas: &'a mut C,
) -> Result<&'a mut C, RasterError> {
    let (num_neurons, num_steps) = spikes.shape();
    let dt = options.dt;

    if !(dt > 0.0 && dt.is_finite()) {
        warn!("Raster plot with a non-positive or non-finite time step dt={}", dt);
    }

    let parallel = num_neurons >= MIN_PARALLEL_NEURONS;
    debug!(
        "Raster plot of {} neurons over {} steps (dt={}, color={}, parallel={})",
        num_neurons, num_steps, dt, options.color, parallel
    );

    let tspace = time_space(num_steps, dt);
    let all_spike_times: Vec<Vec<f64>> = if parallel {
        spikes
            .rows()
            .collect_vec()
            .into_par_iter()
            .map(|row| spike_times(row, &tspace))
            .collect()
    } else {
        spikes.rows().map(|row| spike_times(row, &tspace)).collect()
    };

    for (n, times) in all_spike_times.iter().enumerate() {
        canvas.vlines(times, n as f64 + 0.5, n as f64 + 1.5, options.color)?;
    }
    debug!(
        "Drew {} ticks",
        all_spike_times.iter().map(|times| times.len()).sum::<usize>()
    );

    canvas.set_ylim(0.5, num_neurons as f64 + 0.5)?;
    canvas.set_xlim(-dt, num_steps as f64 * dt + dt)?;
    canvas.set_xlabel(TIME_LABEL)?;
    canvas.set_ylabel(NEURON_LABEL)?;

    Ok(canvas)
}

/// Draw a raster plot of the spike matrix onto the current figure, and return the current figure.
/// The figure stays locked for the whole drawing, so concurrent calls do not interleave.
pub fn rasterplot_current(
    spikes: &SpikeMatrix,
    options: &RasterOptions,
) -> Result<SharedFigure, RasterError> {
    let figure = current_figure();
    {
        let mut guard = lock_figure(&figure);
        rasterplot(spikes, options, &mut *guard)?;
    }
    Ok(figure)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::canvas::{Figure, Segment};

    const SEED: u64 = 42;
    const TOL: f64 = 1e-12;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < TOL
    }

    #[test]
    fn test_raster_options_default() {
        let options = RasterOptions::default();
        assert_eq!(options.dt, 0.001);
        assert_eq!(options.color, Color::GRAY);

        let options = options.with_dt(0.5).with_color(Color::BLACK);
        assert_eq!(options, RasterOptions { dt: 0.5, color: Color::BLACK });
    }

    #[test]
    fn test_time_space() {
        assert_eq!(time_space(0, 0.1), Vec::<f64>::new());
        assert_eq!(time_space(4, 0.5), vec![0.0, 0.5, 1.0, 1.5]);
        // exactly num_steps values, whatever the rounding of dt
        assert_eq!(time_space(1000, 0.001).len(), 1000);
    }

    #[test]
    fn test_spike_times() {
        let tspace = time_space(5, 1.0);
        assert_eq!(spike_times(&[0.0, 1.0, 0.0, 1.0, 1.0], &tspace), vec![1.0, 3.0, 4.0]);
        // Test first column is dropped
        assert_eq!(spike_times(&[1.0, 0.0, 0.0, 0.0, 0.0], &tspace), Vec::<f64>::new());
        assert_eq!(spike_times(&[7.0, 0.0, 0.0, 0.0, 0.0], &tspace), Vec::<f64>::new());
        // Test values are used as multipliers
        assert_eq!(spike_times(&[0.0, 0.0, 2.0, 0.0, 0.5], &tspace), vec![4.0, 2.0]);
        // Test negative values are dropped
        assert_eq!(spike_times(&[0.0, -1.0, 0.0, 0.0, 0.0], &tspace), Vec::<f64>::new());
    }

    #[test]
    fn test_rasterplot_example() {
        let spikes = SpikeMatrix::from_rows(&[[0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]).unwrap();
        let mut figure = Figure::new();
        rasterplot(&spikes, &RasterOptions::default(), &mut figure).unwrap();

        // the spike of neuron 0 is in column 1, hence at 1 * dt
        assert_eq!(figure.num_segments(), 1);
        let segment = figure.segments()[0];
        assert!(close(segment.x, 0.001));
        assert_eq!((segment.ymin, segment.ymax), (0.5, 1.5));
        assert_eq!(segment.color, Color::GRAY);

        assert_eq!(figure.ylim(), Some((0.5, 2.5)));
        let (left, right) = figure.xlim().unwrap();
        assert!(close(left, -0.001));
        assert!(close(right, 0.004));
        assert_eq!(figure.xlabel(), Some(TIME_LABEL));
        assert_eq!(figure.ylabel(), Some(NEURON_LABEL));
    }

    #[test]
    fn test_rasterplot_no_spikes() {
        for (num_neurons, num_steps) in [(1, 1), (3, 10), (20, 7)] {
            let spikes = SpikeMatrix::zeros(num_neurons, num_steps).unwrap();
            let options = RasterOptions::default().with_dt(0.25);
            let mut figure = Figure::new();
            rasterplot(&spikes, &options, &mut figure).unwrap();

            assert_eq!(figure.num_segments(), 0);
            assert_eq!(figure.ylim(), Some((0.5, num_neurons as f64 + 0.5)));
            assert_eq!(figure.xlim(), Some((-0.25, num_steps as f64 * 0.25 + 0.25)));
        }
    }

    #[test]
    fn test_rasterplot_single_spike() {
        let options = RasterOptions::default().with_dt(0.1).with_color(Color::BLACK);
        for (r, c) in [(0, 1), (2, 5), (4, 9)] {
            let mut spikes = SpikeMatrix::zeros(5, 10).unwrap();
            spikes.set(r, c, 1.0).unwrap();

            let mut figure = Figure::new();
            rasterplot(&spikes, &options, &mut figure).unwrap();

            assert_eq!(figure.num_segments(), 1);
            let segment = figure.segments()[0];
            assert!(close(segment.x, c as f64 * 0.1));
            assert_eq!(segment.ymin, r as f64 + 0.5);
            assert_eq!(segment.ymax, r as f64 + 1.5);
            assert_eq!(segment.color, Color::BLACK);
        }
    }

    #[test]
    fn test_rasterplot_first_column_never_drawn() {
        for dt in [0.001, 0.5, 3.0] {
            for value in [1.0, 2.0, 100.0] {
                let spikes = SpikeMatrix::from_rows(&[[value, 0.0], [value, 0.0], [value, 0.0]]).unwrap();
                let mut figure = Figure::new();
                rasterplot(&spikes, &RasterOptions::default().with_dt(dt), &mut figure).unwrap();
                assert_eq!(figure.num_segments(), 0);
            }
        }
    }

    #[test]
    fn test_rasterplot_non_binary_values() {
        let spikes = SpikeMatrix::from_rows(&[[0.0, 0.0, 0.0, 2.0]]).unwrap();
        let mut figure = Figure::new();
        rasterplot(&spikes, &RasterOptions::default().with_dt(0.01), &mut figure).unwrap();

        assert_eq!(figure.num_segments(), 1);
        assert!(close(figure.segments()[0].x, 2.0 * 3.0 * 0.01));
    }

    #[test]
    fn test_rasterplot_dt_rescaling() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let rows: Vec<Vec<f64>> = (0..8)
            .map(|_| (0..50).map(|_| if rng.gen_bool(0.2) { 1.0 } else { 0.0 }).collect())
            .collect();
        let spikes = SpikeMatrix::from_rows(&rows).unwrap();

        let mut figure_1 = Figure::new();
        rasterplot(&spikes, &RasterOptions::default().with_dt(0.001), &mut figure_1).unwrap();
        let mut figure_2 = Figure::new();
        rasterplot(&spikes, &RasterOptions::default().with_dt(0.004), &mut figure_2).unwrap();

        assert!(figure_1.num_segments() > 0);
        assert_eq!(figure_1.num_segments(), figure_2.num_segments());
        assert!(figure_1
            .segments()
            .iter()
            .zip(figure_2.segments())
            .all(|(s1, s2)| close(4.0 * s1.x, s2.x) && s1.ymin == s2.ymin));

        let (left_1, right_1) = figure_1.xlim().unwrap();
        let (left_2, right_2) = figure_2.xlim().unwrap();
        assert!(close(4.0 * left_1, left_2));
        assert!(close(4.0 * right_1, right_2));
        assert_eq!(figure_1.ylim(), figure_2.ylim());

        // Test the ticks of each neuron keep their order
        for figure in [&figure_1, &figure_2] {
            assert!(figure
                .segments()
                .windows(2)
                .filter(|w| w[0].ymin == w[1].ymin)
                .all(|w| w[0].x < w[1].x));
        }
    }

    #[test]
    fn test_rasterplot_parallel_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let num_neurons = 2 * MIN_PARALLEL_NEURONS;
        let rows: Vec<Vec<f64>> = (0..num_neurons)
            .map(|_| (0..30).map(|_| if rng.gen_bool(0.1) { 1.0 } else { 0.0 }).collect())
            .collect();
        let spikes = SpikeMatrix::from_rows(&rows).unwrap();
        let options = RasterOptions::default();

        let mut figure = Figure::new();
        rasterplot(&spikes, &options, &mut figure).unwrap();

        let tspace = time_space(30, options.dt);
        let expected: Vec<Segment> = rows
            .iter()
            .enumerate()
            .flat_map(|(n, row)| {
                spike_times(row, &tspace).into_iter().map(move |x| Segment {
                    x,
                    ymin: n as f64 + 0.5,
                    ymax: n as f64 + 1.5,
                    color: Color::GRAY,
                })
            })
            .collect();

        assert_eq!(figure.segments(), &expected[..]);
    }

    #[test]
    fn test_rasterplot_returns_given_canvas() {
        let spikes = SpikeMatrix::from_rows(&[[0.0, 1.0]]).unwrap();
        let mut figure = Figure::new();
        let returned = rasterplot(&spikes, &RasterOptions::default(), &mut figure).unwrap();
        returned.set_xlabel("Time [s]").unwrap();
        assert_eq!(figure.xlabel(), Some("Time [s]"));
        assert_eq!(figure.num_segments(), 1);
    }

    #[test]
    fn test_rasterplot_degenerate_dt() {
        let spikes = SpikeMatrix::from_rows(&[[0.0, 1.0, 1.0]]).unwrap();

        let mut figure = Figure::new();
        rasterplot(&spikes, &RasterOptions::default().with_dt(0.0), &mut figure).unwrap();
        assert_eq!(figure.num_segments(), 0);
        assert_eq!(figure.xlim(), Some((-0.0, 0.0)));

        let mut figure = Figure::new();
        rasterplot(&spikes, &RasterOptions::default().with_dt(-1.0), &mut figure).unwrap();
        assert_eq!(figure.num_segments(), 0);
        assert_eq!(figure.xlim(), Some((1.0, -4.0)));
    }

    #[test]
    fn test_rasterplot_empty_matrix() {
        let spikes = SpikeMatrix::zeros(0, 0).unwrap();
        let mut figure = Figure::new();
        rasterplot(&spikes, &RasterOptions::default().with_dt(1.0), &mut figure).unwrap();
        assert_eq!(figure.num_segments(), 0);
        assert_eq!(figure.ylim(), Some((0.5, 0.5)));
        assert_eq!(figure.xlim(), Some((-1.0, 1.0)));
    }
}

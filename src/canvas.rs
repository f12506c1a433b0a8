//! This module provides the `Canvas` trait, i.e., the drawing capability consumed by the raster plot,
//! together with `Figure`, an in-memory canvas recording everything drawn onto it.
//!
//! A process-wide *current figure* is available for callers who do not want to manage a canvas themselves.
//!
//! # Examples
//!
//! ```
//! use rusty_raster::canvas::{Canvas, Figure};
//! use rusty_raster::color::Color;
//!
//! let mut figure = Figure::new();
//! figure.vlines(&[0.5, 1.5], 0.5, 1.5, Color::GRAY).unwrap();
//! figure.set_xlim(0.0, 2.0).unwrap();
//!
//! assert_eq!(figure.num_segments(), 2);
//! assert_eq!(figure.xlim(), Some((0.0, 2.0)));
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::error::RasterError;

/// A 2D drawing surface supporting vertical line segments, axis limits and axis labels.
pub trait Canvas {
    /// Draw one vertical segment from `ymin` to `ymax` at each of the x-positions.
    fn vlines(&mut self, xs: &[f64], ymin: f64, ymax: f64, color: Color) -> Result<(), RasterError>;

    /// Set the limits of the horizontal axis.
    fn set_xlim(&mut self, left: f64, right: f64) -> Result<(), RasterError>;

    /// Set the limits of the vertical axis.
    fn set_ylim(&mut self, bottom: f64, top: f64) -> Result<(), RasterError>;

    /// Set the label of the horizontal axis.
    fn set_xlabel(&mut self, label: &str) -> Result<(), RasterError>;

    /// Set the label of the vertical axis.
    fn set_ylabel(&mut self, label: &str) -> Result<(), RasterError>;
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn vlines(&mut self, xs: &[f64], ymin: f64, ymax: f64, color: Color) -> Result<(), RasterError> {
        (**self).vlines(xs, ymin, ymax, color)
    }

    fn set_xlim(&mut self, left: f64, right: f64) -> Result<(), RasterError> {
        (**self).set_xlim(left, right)
    }

    fn set_ylim(&mut self, bottom: f64, top: f64) -> Result<(), RasterError> {
        (**self).set_ylim(bottom, top)
    }

    fn set_xlabel(&mut self, label: &str) -> Result<(), RasterError> {
        (**self).set_xlabel(label)
    }

    fn set_ylabel(&mut self, label: &str) -> Result<(), RasterError> {
        (**self).set_ylabel(label)
    }
}

/// A vertical line segment.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Segment {
    /// The position on the horizontal axis.
    pub x: f64,
    /// The lower end on the vertical axis.
    pub ymin: f64,
    /// The upper end on the vertical axis.
    pub ymax: f64,
    pub color: Color,
}

/// An in-memory canvas.
/// Segments accumulate across calls, limits and labels are overwritten.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct Figure {
    segments: Vec<Segment>,
    xlim: Option<(f64, f64)>,
    ylim: Option<(f64, f64)>,
    xlabel: Option<String>,
    ylabel: Option<String>,
}

impl Figure {
    /// Create an empty figure, without segments, limits or labels.
    pub fn new() -> Self {
        Figure::default()
    }

    /// Returns a slice of all segments drawn so far, in drawing order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments[..]
    }

    /// Returns the number of segments drawn so far.
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Returns the limits of the horizontal axis, if set.
    pub fn xlim(&self) -> Option<(f64, f64)> {
        self.xlim
    }

    /// Returns the limits of the vertical axis, if set.
    pub fn ylim(&self) -> Option<(f64, f64)> {
        self.ylim
    }

    /// Returns the label of the horizontal axis, if set.
    pub fn xlabel(&self) -> Option<&str> {
        self.xlabel.as_deref()
    }

    /// Returns the label of the vertical axis, if set.
    pub fn ylabel(&self) -> Option<&str> {
        self.ylabel.as_deref()
    }

    /// Returns the smallest and largest x-positions of the segments, or `None` if there is none.
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        self.segments.iter().fold(None, |acc, seg| match acc {
            None => Some((seg.x, seg.x)),
            Some((lo, hi)) => Some((lo.min(seg.x), hi.max(seg.x))),
        })
    }

    /// Returns the smallest `ymin` and largest `ymax` of the segments, or `None` if there is none.
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        self.segments.iter().fold(None, |acc, seg| match acc {
            None => Some((seg.ymin, seg.ymax)),
            Some((lo, hi)) => Some((lo.min(seg.ymin), hi.max(seg.ymax))),
        })
    }

    /// Returns true if every segment coordinate and axis limit is finite.
    pub fn is_finite(&self) -> bool {
        let finite = |(a, b): (f64, f64)| a.is_finite() && b.is_finite();
        self.segments
            .iter()
            .all(|seg| seg.x.is_finite() && finite((seg.ymin, seg.ymax)))
            && self.xlim.map_or(true, finite)
            && self.ylim.map_or(true, finite)
    }

    /// Remove everything drawn or configured on the figure.
    pub fn clear(&mut self) {
        *self = Figure::default();
    }
}

impl Canvas for Figure {
    fn vlines(&mut self, xs: &[f64], ymin: f64, ymax: f64, color: Color) -> Result<(), RasterError> {
        self.segments
            .extend(xs.iter().map(|&x| Segment { x, ymin, ymax, color }));
        Ok(())
    }

    fn set_xlim(&mut self, left: f64, right: f64) -> Result<(), RasterError> {
        self.xlim = Some((left, right));
        Ok(())
    }

    fn set_ylim(&mut self, bottom: f64, top: f64) -> Result<(), RasterError> {
        self.ylim = Some((bottom, top));
        Ok(())
    }

    fn set_xlabel(&mut self, label: &str) -> Result<(), RasterError> {
        self.xlabel = Some(label.to_string());
        Ok(())
    }

    fn set_ylabel(&mut self, label: &str) -> Result<(), RasterError> {
        self.ylabel = Some(label.to_string());
        Ok(())
    }
}

/// A figure shared between threads, e.g., the current figure.
pub type SharedFigure = Arc<Mutex<Figure>>;

static CURRENT_FIGURE: Mutex<Option<SharedFigure>> = Mutex::new(None);

fn current_slot() -> MutexGuard<'static, Option<SharedFigure>> {
    // The slot only holds an Arc, a panic elsewhere cannot leave it half-written.
    CURRENT_FIGURE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the current figure, creating an empty one if there is none.
pub fn current_figure() -> SharedFigure {
    current_slot()
        .get_or_insert_with(|| {
            log::debug!("Creating a new current figure");
            Arc::new(Mutex::new(Figure::new()))
        })
        .clone()
}

/// Make the given figure the current one.
pub fn set_current_figure(figure: SharedFigure) {
    *current_slot() = Some(figure);
}

/// Drop the current figure. The next call to [`current_figure`] creates a new one.
pub fn reset_current_figure() {
    *current_slot() = None;
}

/// Lock a shared figure, recovering the data if another thread panicked while holding the lock.
pub fn lock_figure(figure: &SharedFigure) -> MutexGuard<'_, Figure> {
    figure.lock().unwrap_or_else(PoisonError::into_inner)
}

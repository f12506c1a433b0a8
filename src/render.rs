//! Module rendering a `Figure` into an image with the `plotters` crate.
//!
//! Figures are rendered as SVG, either to a file or to an in-memory string.
//! Text is left to the SVG viewer, so no font has to be available when rendering.

use std::path::Path;

use derivative::Derivative;
use log::{info, warn};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::{
    ChartBuilder, DrawingArea, DrawingBackend, IntoDrawingArea, PathElement, RGBColor, SVGBackend, ShapeStyle, BLACK, WHITE,
};
use serde::{Deserialize, Serialize};

use super::canvas::Figure;
use super::error::RasterError;

/// The image formats a figure can be rendered to.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum ImageFormat {
    Svg,
}

impl ImageFormat {
    /// Guess the image format from the extension of a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RasterError> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("svg") => Ok(ImageFormat::Svg),
            _ => Err(RasterError::InvalidParameter(format!(
                "unsupported image format for {}, expected .svg",
                path.as_ref().display()
            ))),
        }
    }
}

/// Image parameters.
#[derive(Derivative, Debug, PartialEq, Clone, Serialize, Deserialize)]
#[derivative(Default)]
pub struct RenderOptions {
    /// The image width, in pixels.
    #[derivative(Default(value = "1024"))]
    pub width: u32,
    /// The image height, in pixels.
    #[derivative(Default(value = "768"))]
    pub height: u32,
    /// The width of every tick, in pixels.
    #[derivative(Default(value = "1"))]
    pub line_width: u32,
    /// An optional title drawn above the plot.
    pub caption: Option<String>,
}

impl RenderOptions {
    fn validate(&self) -> Result<(), RasterError> {
        if self.width == 0 || self.height == 0 {
            return Err(RasterError::InvalidParameter(format!(
                "image size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

fn render_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> RasterError {
    RasterError::RenderError(e.to_string())
}

/// Returns a usable (increasing, non-empty, finite) axis range.
/// Missing limits fall back to the data extent, and then to `[0, 1]`.
fn axis_range(
    name: &str,
    limits: Option<(f64, f64)>,
    extent: Option<(f64, f64)>,
) -> Result<(f64, f64), RasterError> {
    let (lo, hi) = match (limits, extent) {
        (Some(limits), _) => limits,
        (None, Some((lo, hi))) if lo < hi => (lo, hi),
        (None, Some((lo, _))) => (lo - 0.5, lo + 0.5),
        (None, None) => (0.0, 1.0),
    };

    if !lo.is_finite() || !hi.is_finite() || lo == hi {
        return Err(RasterError::InvalidParameter(format!(
            "cannot render degenerate {} limits [{}, {}]",
            name, lo, hi
        )));
    }

    if lo > hi {
        warn!("Inverted {} limits [{}, {}] are rendered in increasing order", name, lo, hi);
        return Ok((hi, lo));
    }

    Ok((lo, hi))
}

fn draw_figure<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    figure: &Figure,
    options: &RenderOptions,
) -> Result<(), RasterError> {
    let (x0, x1) = axis_range("horizontal", figure.xlim(), figure.x_extent())?;
    let (y0, y1) = axis_range("vertical", figure.ylim(), figure.y_extent())?;

    root.fill(&WHITE).map_err(render_error)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(10).x_label_area_size(40).y_label_area_size(50);
    if let Some(caption) = &options.caption {
        builder.caption(caption, ("sans-serif", 20));
    }
    let mut chart = builder
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .axis_style(BLACK)
        .x_desc(figure.xlabel().unwrap_or_default())
        .y_desc(figure.ylabel().unwrap_or_default())
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(figure.segments().iter().map(|segment| {
            PathElement::new(
                vec![(segment.x, segment.ymin), (segment.x, segment.ymax)],
                ShapeStyle::from(RGBColor::from(segment.color)).stroke_width(options.line_width),
            )
        }))
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    Ok(())
}

/// Render the figure into an SVG document.
pub fn render_svg_string(figure: &Figure, options: &RenderOptions) -> Result<String, RasterError> {
    options.validate()?;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
            .into_drawing_area();
        draw_figure(root, figure, options)?;
    }
    Ok(svg)
}

/// Render the figure into an image file, whose format is given by the extension of the path.
pub fn render_to_file<P: AsRef<Path>>(
    figure: &Figure,
    path: P,
    options: &RenderOptions,
) -> Result<(), RasterError> {
    options.validate()?;
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    let size = (options.width, options.height);

    match format {
        ImageFormat::Svg => draw_figure(SVGBackend::new(path, size).into_drawing_area(), figure, options)?,
    }

    info!(
        "Rendered {} ticks to {} ({:?}, {}x{})",
        figure.num_segments(),
        path.display(),
        format,
        options.width,
        options.height
    );
    Ok(())
}

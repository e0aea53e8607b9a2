use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;

use crate::report::ReportError;

const SCREE_SIZE: (u32, u32) = (800, 400);
const SCATTER_SIZE: (u32, u32) = (1000, 800);
const FONT: &str = "sans-serif";

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

fn plot_err<E: std::fmt::Display>(err: E) -> ReportError {
    ReportError::Plot(err.to_string())
}

/// Eigenvalue against component number, line plus markers.
pub fn render_scree(path: &Path, eigenvalues: &[f64]) -> Result<(), ReportError> {
    let points: Vec<(f64, f64)> = eigenvalues
        .iter()
        .enumerate()
        .map(|(idx, v)| ((idx + 1) as f64, *v))
        .collect();
    let x_range = 0.5..(eigenvalues.len() as f64 + 0.5);
    let y_range = padded_range(eigenvalues.iter().copied().chain(std::iter::once(0.0)));

    let root = SVGBackend::new(path, SCREE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Scree plot", (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .x_desc("Component number")
        .y_desc("Eigenvalue")
        .draw()
        .map_err(plot_err)?;
    chart
        .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
        .map_err(plot_err)?;
    chart
        .draw_series(points.iter().map(|&p| Circle::new(p, 4, BLUE.filled())))
        .map_err(plot_err)?;
    root.present().map_err(plot_err)?;
    Ok(())
}

/// Every record at its first two component scores, labeled by student.
pub fn render_scatter(path: &Path, points: &[ScatterPoint]) -> Result<(), ReportError> {
    let x_range = padded_range(points.iter().map(|p| p.x));
    let y_range = padded_range(points.iter().map(|p| p.y));

    let root = SVGBackend::new(path, SCATTER_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("PCA - first two principal components", (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .x_desc("Principal component 1")
        .y_desc("Principal component 2")
        .draw()
        .map_err(plot_err)?;
    chart
        .draw_series(points.iter().enumerate().map(|(idx, p)| {
            EmptyElement::at((p.x, p.y))
                + Circle::new((0, 0), 5, Palette99::pick(idx).filled())
                + Text::new(p.label.clone(), (7, -7), (FONT, 13).into_font())
        }))
        .map_err(plot_err)?;
    root.present().map_err(plot_err)?;
    Ok(())
}

/// Data extent plus a 10% margin; a unit margin when all values coincide.
pub fn padded_range<I>(values: I) -> Range<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.into_iter().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo > hi {
        return -1.0..1.0;
    }
    let span = hi - lo;
    let pad = if span > 0.0 { span * 0.1 } else { 1.0 };
    (lo - pad)..(hi + pad)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/plot.rs"]
mod tests;

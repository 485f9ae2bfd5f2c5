//! plot/surface.rs: draws a [`Figure`] onto any plotters drawing area.
//!
//! Each panel gets a 3D cartesian chart. Plotters treats its second axis as
//! the vertical one, so grid points `(x, y, z)` are drawn at `(x, z, y)`.
//! The surface is emitted as one filled quad per sampled grid cell, coloured
//! by the mean of its corners on the Blues ramp and clamped to the z range.
//! Quads are painted far to near along the camera direction, each quad's edge
//! ring right after its fill, so nearer cells cover farther ones.

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{debug, warn};

use crate::error::PlotResult;
use crate::plot::colormap::blues;
use crate::plot::figure::{Figure, Panel, View};

/// Corners in chart order `(x, z, y)`.
#[derive(Clone, Debug)]
struct Quad {
    pts: Vec<(f64, f64, f64)>,
    color: RGBColor,
}

impl Quad {
    fn ring(&self) -> Vec<(f64, f64, f64)> {
        let mut ring = self.pts.clone();
        ring.extend(self.pts.first().copied());
        ring
    }
}

/// Draw every panel of `figure` side by side. `rotation` is added to each
/// panel's own camera.
pub fn draw_figure<DB: DrawingBackend>(
    figure: &Figure,
    root: &DrawingArea<DB, Shift>,
    rotation: View,
) -> PlotResult<()> {
    root.fill(&WHITE)?;
    let areas = root.split_evenly((1, figure.panels.len().max(1)));
    for (panel, area) in figure.panels.iter().zip(areas.iter()) {
        draw_panel(panel, area, panel.view + rotation)?;
    }
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    panel: &Panel,
    area: &DrawingArea<DB, Shift>,
    view: View,
) -> PlotResult<()> {
    let (x_lo, x_hi) = panel.surface.grid.x_bounds();
    let (y_lo, y_hi) = panel.surface.grid.y_bounds();
    let (z_lo, z_hi) = panel.z_range();

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 22))
        .margin(16)
        .build_cartesian_3d(x_lo..x_hi, z_lo..z_hi, y_lo..y_hi)?;

    chart.with_projection(|mut pb| {
        pb.pitch = view.elevation_deg.to_radians();
        pb.yaw = view.azimuth_deg.to_radians();
        pb.scale = 0.8;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.1))
        .max_light_lines(3)
        .draw()?;

    let (mut quads, skipped) = build_quads(panel, (z_lo, z_hi));
    sort_back_to_front(&mut quads, view, [(x_lo, x_hi), (z_lo, z_hi), (y_lo, y_hi)]);
    debug!(
        panel = %panel.title,
        quads = quads.len(),
        elevation = view.elevation_deg,
        azimuth = view.azimuth_deg,
        "drawing surface"
    );
    if skipped > 0 {
        warn!(panel = %panel.title, skipped, "skipped cells with non-finite corners");
    }

    {
        let area = chart.plotting_area();
        let alpha = panel.fill_alpha;
        for quad in &quads {
            area.draw(&Polygon::new(quad.pts.clone(), quad.color.mix(alpha).filled()))?;
            if let Some(edge) = panel.edge_color {
                area.draw(&PathElement::new(quad.ring(), edge.mix(0.6)))?;
            }
        }
    }

    let in_box = |x: f64, y: f64| x >= x_lo && x <= x_hi && y >= y_lo && y <= y_hi;
    for curve in &panel.curves {
        let points: Vec<(f64, f64, f64)> = curve
            .points
            .iter()
            .filter(|(x, y, z)| x.is_finite() && y.is_finite() && z.is_finite() && in_box(*x, *y))
            .map(|&(x, y, z)| (x, z.clamp(z_lo, z_hi), y))
            .collect();
        let style = curve.color.stroke_width(curve.width);
        let anno = chart.draw_series(LineSeries::new(points, style))?;
        if let Some(label) = &curve.label {
            anno.label(label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }
    }

    let font = ("sans-serif", 18).into_font();
    chart.draw_series([
        Text::new(
            panel.labels.x.clone(),
            (0.5 * (x_lo + x_hi), z_lo, y_lo),
            font.clone(),
        ),
        Text::new(
            panel.labels.y.clone(),
            (x_hi, z_lo, 0.5 * (y_lo + y_hi)),
            font.clone(),
        ),
        Text::new(panel.labels.z.clone(), (x_lo, z_hi, y_hi), font),
    ])?;

    if panel.curves.iter().any(|c| c.label.is_some()) {
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()?;
    }

    Ok(())
}

/// Finite data min/max used to normalise colours. Unlike the z range this
/// ignores explicit limits.
fn colour_range(panel: &Panel) -> (f64, f64) {
    panel.surface.value_bounds().unwrap_or_else(|| panel.z_range())
}

/// One quad per sampled cell; returns the quads and how many cells were
/// dropped for having a non-finite corner.
fn build_quads(panel: &Panel, (z_lo, z_hi): (f64, f64)) -> (Vec<Quad>, usize) {
    let grid = &panel.surface.grid;
    let values = &panel.surface.values;
    let (n_rows, n_cols) = panel.surface.shape();
    let rows = stride_indices(n_rows, panel.mesh_counts.0);
    let cols = stride_indices(n_cols, panel.mesh_counts.1);
    let (c_lo, c_hi) = colour_range(panel);
    let c_span = (c_hi - c_lo).max(1e-12);

    let mut quads = Vec::with_capacity(rows.len() * cols.len());
    let mut skipped = 0usize;
    for rw in rows.windows(2) {
        for cw in cols.windows(2) {
            let corners = [(rw[0], cw[0]), (rw[0], cw[1]), (rw[1], cw[1]), (rw[1], cw[0])];
            if corners.iter().any(|&idx| !values[idx].is_finite()) {
                skipped += 1;
                continue;
            }
            let mean = corners.iter().map(|&idx| values[idx]).sum::<f64>() / 4.0;
            let color = blues((mean - c_lo) / c_span);
            let pts = corners
                .iter()
                .map(|&idx| (grid.xx[idx], values[idx].clamp(z_lo, z_hi), grid.yy[idx]))
                .collect();
            quads.push(Quad { pts, color });
        }
    }
    (quads, skipped)
}

/// Unit vector from the scene towards the camera, in chart axis order
/// `(x, z, y)`, for matplotlib-style elevation/azimuth.
fn eye_direction(view: View) -> [f64; 3] {
    let (elev, azim) = (view.elevation_deg.to_radians(), view.azimuth_deg.to_radians());
    [
        elev.cos() * azim.cos(),
        elev.sin(),
        elev.cos() * azim.sin(),
    ]
}

/// Painter's order: farthest quad first. Depth is the mean of the corners'
/// box-normalised coordinates projected on the eye direction.
fn sort_back_to_front(quads: &mut [Quad], view: View, bounds: [(f64, f64); 3]) {
    let eye = eye_direction(view);
    let depth = |quad: &Quad| {
        let sum: f64 = quad
            .pts
            .iter()
            .map(|&(x, z, y)| {
                [x, z, y]
                    .iter()
                    .zip(bounds.iter())
                    .zip(eye.iter())
                    .map(|((&v, &(lo, hi)), &e)| (v - lo) / (hi - lo).max(1e-12) * e)
                    .sum::<f64>()
            })
            .sum();
        sum / quad.pts.len().max(1) as f64
    };
    quads.sort_by(|a, b| depth(a).total_cmp(&depth(b)));
}

/// Row/column indices sampled so that at most about `count` lines are drawn,
/// always keeping the last index.
pub(crate) fn stride_indices(n: usize, count: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let step = n.div_ceil(count.max(1)).max(1);
    let mut idx: Vec<usize> = (0..n).step_by(step).collect();
    if idx.last() != Some(&(n - 1)) {
        idx.push(n - 1);
    }
    idx
}

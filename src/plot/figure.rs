//! plot/figure.rs: declarative description of a surface figure.
//!
//! A [`Figure`] is plain data: grids, labels, camera and sink. Drawing it is
//! the job of [`crate::plot::surface`].

use std::fmt;
use std::ops::Add;

use ndarray::Array2;
use plotters::style::RGBColor;

use crate::model::grid::MeshGrid;

/// Where a figure goes when no override is given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkKind {
    File,
    Window,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Window => f.write_str("window"),
        }
    }
}

/// Camera angles in degrees, same convention as a matplotlib 3D axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
}

impl View {
    pub const NONE: View = View {
        elevation_deg: 0.0,
        azimuth_deg: 0.0,
    };

    pub fn new(elevation_deg: f64, azimuth_deg: f64) -> Self {
        Self {
            elevation_deg,
            azimuth_deg,
        }
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new(30.0, -60.0)
    }
}

impl Add for View {
    type Output = View;

    /// Elevation saturates at the poles; azimuth wraps freely.
    fn add(self, rhs: View) -> View {
        View {
            elevation_deg: (self.elevation_deg + rhs.elevation_deg).clamp(-90.0, 90.0),
            azimuth_deg: self.azimuth_deg + rhs.azimuth_deg,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl AxisLabels {
    pub fn new(x: &str, y: &str, z: &str) -> Self {
        Self {
            x: x.to_string(),
            y: y.to_string(),
            z: z.to_string(),
        }
    }
}

/// A result grid together with the coordinate grid it was evaluated on.
#[derive(Clone, Debug)]
pub struct Surface {
    pub grid: MeshGrid,
    pub values: Array2<f64>,
}

impl Surface {
    /// Panics if `values` is not shaped like `grid`.
    pub fn new(grid: MeshGrid, values: Array2<f64>) -> Self {
        assert_eq!(
            grid.shape(),
            values.dim(),
            "result grid shape must match coordinate grid"
        );
        Self { grid, values }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }

    pub fn non_finite_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_finite()).count()
    }

    /// Min/max over finite cells, `None` when there are none.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in self.values.iter().filter(|v| v.is_finite()) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if lo <= hi { Some((lo, hi)) } else { None }
    }
}

/// 3D polyline drawn over a surface, points as `(x, y, z)`.
#[derive(Clone, Debug)]
pub struct Curve3 {
    pub points: Vec<(f64, f64, f64)>,
    pub label: Option<String>,
    pub color: RGBColor,
    pub width: u32,
}

#[derive(Clone, Debug)]
pub struct Panel {
    pub title: String,
    pub labels: AxisLabels,
    pub surface: Surface,
    pub curves: Vec<Curve3>,
    pub z_limits: Option<(f64, f64)>,
    pub view: View,
    /// Upper bound on sampled (rows, cols) when drawing quads.
    pub mesh_counts: (usize, usize),
    pub fill_alpha: f64,
    pub edge_color: Option<RGBColor>,
}

impl Panel {
    pub fn new(title: impl Into<String>, labels: AxisLabels, surface: Surface) -> Self {
        Self {
            title: title.into(),
            labels,
            surface,
            curves: Vec::new(),
            z_limits: None,
            view: View::default(),
            mesh_counts: (50, 50),
            fill_alpha: 1.0,
            edge_color: None,
        }
    }

    pub fn with_curve(mut self, curve: Curve3) -> Self {
        self.curves.push(curve);
        self
    }

    pub fn with_z_limits(mut self, lo: f64, hi: f64) -> Self {
        self.z_limits = Some((lo, hi));
        self
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    pub fn with_mesh_counts(mut self, rows: usize, cols: usize) -> Self {
        self.mesh_counts = (rows, cols);
        self
    }

    pub fn with_fill_alpha(mut self, alpha: f64) -> Self {
        self.fill_alpha = alpha;
        self
    }

    pub fn with_edges(mut self, color: RGBColor) -> Self {
        self.edge_color = Some(color);
        self
    }

    /// Explicit limits, else the finite data range, else `[0, 1]`.
    pub fn z_range(&self) -> (f64, f64) {
        if let Some(lims) = self.z_limits {
            return lims;
        }
        match self.surface.value_bounds() {
            Some((lo, hi)) if (hi - lo).abs() > 1e-12 => (lo, hi),
            Some((lo, _)) => (lo - 0.5, lo + 0.5),
            None => (0.0, 1.0),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Figure {
    pub name: String,
    pub file_name: String,
    pub window_title: String,
    pub default_sink: SinkKind,
    pub panels: Vec<Panel>,
}

impl Figure {
    /// Bitmap size when every panel gets `panel_size` pixels, laid out in a row.
    pub fn canvas_size(&self, panel_size: (u32, u32)) -> (u32, u32) {
        let n = self.panels.len().max(1) as u32;
        (panel_size.0 * n, panel_size.1)
    }

    pub fn non_finite_count(&self) -> usize {
        self.panels
            .iter()
            .map(|p| p.surface.non_finite_count())
            .sum()
    }
}

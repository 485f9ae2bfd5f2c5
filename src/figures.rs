//! figures.rs: the three speedup/efficiency figures.
//!
//! All model constants (ranges, sample counts, f, k) are fixed here; only
//! the output side is configurable.

use std::fmt;

use plotters::prelude::{BLUE, RED};
use tracing::info;

use crate::model::grid::{MeshGrid, linspace};
use crate::model::speedup::{
    comm_ratio_speedup_array, optimal_q_array, scaled_efficiency_array, scaled_speedup_array,
};
use crate::plot::figure::{AxisLabels, Curve3, Figure, Panel, SinkKind, Surface, View};

/// Problem-size exponent of the communication-ratio model (n = 2^k).
pub const COMM_RATIO_K: u32 = 10;
pub const COMM_RATIO_Q_RANGE: (f64, f64) = (0.1, 10.0);
pub const COMM_RATIO_GAMMA_RANGE: (f64, f64) = (0.01, 0.35);
pub const COMM_RATIO_SAMPLES: usize = 100;

pub const SCALED_P_RANGE: (f64, f64) = (1.0, 20.0);
pub const SCALED_DELTA_RANGE: (f64, f64) = (0.0, 1.0);
pub const SCALED_SAMPLES: usize = 25;
pub const SPEEDUP_FRACTIONS: [f64; 2] = [0.1, 0.5];
pub const EFFICIENCY_FRACTION: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FigureId {
    CommRatio,
    Speedup,
    Efficiency,
}

impl FigureId {
    pub const ALL: [FigureId; 3] = [Self::CommRatio, Self::Speedup, Self::Efficiency];

    pub fn build(self) -> Figure {
        let figure = match self {
            Self::CommRatio => comm_ratio(),
            Self::Speedup => scaled_speedup(),
            Self::Efficiency => scaled_efficiency(),
        };
        for panel in &figure.panels {
            let (rows, cols) = panel.surface.shape();
            info!(figure = %self, panel = %panel.title, rows, cols, "evaluated grid");
        }
        figure
    }
}

impl fmt::Display for FigureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CommRatio => "comm-ratio",
            Self::Speedup => "speedup",
            Self::Efficiency => "efficiency",
        })
    }
}

fn scaled_grid() -> MeshGrid {
    MeshGrid::new(
        linspace(SCALED_P_RANGE.0, SCALED_P_RANGE.1, SCALED_SAMPLES),
        linspace(SCALED_DELTA_RANGE.0, SCALED_DELTA_RANGE.1, SCALED_SAMPLES),
    )
}

/// F(gamma, q) over (q, gamma) with the optimal-q ridge overlaid.
pub fn comm_ratio() -> Figure {
    let k = COMM_RATIO_K;
    let n = 2f64.powi(k as i32);

    let gamma = linspace(
        COMM_RATIO_GAMMA_RANGE.0,
        COMM_RATIO_GAMMA_RANGE.1,
        COMM_RATIO_SAMPLES,
    );
    let grid = MeshGrid::new(
        linspace(
            COMM_RATIO_Q_RANGE.0,
            COMM_RATIO_Q_RANGE.1,
            COMM_RATIO_SAMPLES,
        ),
        gamma.clone(),
    );
    let speedup = comm_ratio_speedup_array(&grid.yy, &grid.xx, k);

    let q_opt = optimal_q_array(&gamma, n);
    let s_opt = comm_ratio_speedup_array(&gamma, &q_opt, k);
    let ridge = Curve3 {
        points: q_opt
            .iter()
            .zip(gamma.iter())
            .zip(s_opt.iter())
            .map(|((&q, &g), &s)| (q, g, s))
            .collect(),
        label: Some("Optimal Speedup".to_string()),
        color: RED,
        width: 2,
    };

    let panel = Panel::new(
        "The General Case and the Compute-to-Communication Ratio",
        AxisLabels::new("q", "γ", "F(γ, q)"),
        Surface::new(grid, speedup),
    )
    .with_curve(ridge)
    .with_z_limits(0.0, 20.0)
    .with_view(View::new(30.0, 225.0))
    .with_fill_alpha(0.7);

    Figure {
        name: FigureId::CommRatio.to_string(),
        file_name: "comm_ratio_speedup.png".to_string(),
        window_title: "Compute-to-communication ratio".to_string(),
        default_sink: SinkKind::File,
        panels: vec![panel],
    }
}

/// S(p) over (p, delta), one panel per sequential fraction.
pub fn scaled_speedup() -> Figure {
    let panels = SPEEDUP_FRACTIONS
        .iter()
        .map(|&f| {
            let grid = scaled_grid();
            let speedup = scaled_speedup_array(&grid.xx, f, &grid.yy);
            Panel::new(
                format!("Speedup S_{{γ=p^δ}}(p) for f={f}"),
                AxisLabels::new("p", "δ", "S_{γ=p^δ}(p)"),
                Surface::new(grid, speedup),
            )
            .with_mesh_counts(20, 20)
            .with_edges(BLUE)
        })
        .collect();

    Figure {
        name: FigureId::Speedup.to_string(),
        file_name: "scaled_speedup.png".to_string(),
        window_title: "Scaled speedup".to_string(),
        default_sink: SinkKind::Window,
        panels,
    }
}

/// E(p) = S(p) / p over (p, delta) for f = 0.1.
pub fn scaled_efficiency() -> Figure {
    let f = EFFICIENCY_FRACTION;
    let grid = scaled_grid();
    let efficiency = scaled_efficiency_array(&grid.xx, f, &grid.yy);
    let panel = Panel::new(
        format!("Efficiency E_{{γ=p^δ}}(p) for f={f}"),
        AxisLabels::new("p", "δ", "E_{γ=p^δ}(p)"),
        Surface::new(grid, efficiency),
    )
    .with_z_limits(0.0, 1.0)
    .with_mesh_counts(20, 15)
    .with_edges(BLUE);

    Figure {
        name: FigureId::Efficiency.to_string(),
        file_name: "scaled_efficiency.png".to_string(),
        window_title: "Scaled efficiency".to_string(),
        default_sink: SinkKind::Window,
        panels: vec![panel],
    }
}

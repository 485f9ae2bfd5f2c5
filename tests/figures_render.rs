use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, atomic::AtomicBool};

use clap::Parser;
use speedup_surfaces::app;
use speedup_surfaces::cli::Args;
use speedup_surfaces::config::PlotsConfig;
use speedup_surfaces::figures::{FigureId, comm_ratio, scaled_efficiency, scaled_speedup};
use speedup_surfaces::plot::figure::{SinkKind, View};
use speedup_surfaces::plot::{render_rgb, save_png};

fn unique_dir(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "speedup_surfaces_render_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    path
}

#[test]
fn every_figure_has_matching_grid_shapes() {
    for id in FigureId::ALL {
        let figure = id.build();
        assert!(!figure.panels.is_empty(), "{id}");
        for panel in &figure.panels {
            let grid = &panel.surface.grid;
            assert_eq!(grid.xx.dim(), grid.yy.dim(), "{id}");
            assert_eq!(grid.xx.dim(), panel.surface.values.dim(), "{id}");
        }
        assert_eq!(figure.non_finite_count(), 0, "{id} has non-finite cells");
    }
}

#[test]
fn scaled_figures_use_25_by_25_grids() {
    let speedup = scaled_speedup();
    assert_eq!(speedup.panels.len(), 2);
    for panel in speedup.panels.iter().chain(scaled_efficiency().panels.iter()) {
        assert_eq!(panel.surface.shape(), (25, 25));
    }
    assert_eq!(comm_ratio().panels[0].surface.shape(), (100, 100));
}

#[test]
fn comm_ratio_saves_and_scaled_figures_open_windows() {
    assert_eq!(comm_ratio().default_sink, SinkKind::File);
    assert_eq!(scaled_speedup().default_sink, SinkKind::Window);
    assert_eq!(scaled_efficiency().default_sink, SinkKind::Window);
}

#[test]
fn comm_ratio_carries_optimal_curve_and_view() {
    let figure = comm_ratio();
    let panel = &figure.panels[0];
    assert_eq!(panel.z_limits, Some((0.0, 20.0)));
    assert_eq!(panel.view, View::new(30.0, 225.0));
    assert_eq!(panel.curves.len(), 1);
    let curve = &panel.curves[0];
    assert_eq!(curve.label.as_deref(), Some("Optimal Speedup"));
    assert_eq!(curve.points.len(), 100);
    assert!(
        curve
            .points
            .iter()
            .all(|&(q, g, s)| q.is_finite() && g > 0.0 && s.is_finite() && s > 0.0)
    );
}

#[test]
fn save_png_writes_nonempty_file_per_figure() {
    let dir = unique_dir("save");
    for id in FigureId::ALL {
        let figure = id.build();
        let path = save_png(&figure, &dir, (320, 240)).expect("save figure");
        let meta = fs::metadata(&path).expect("file exists");
        assert!(meta.len() > 0, "{} is empty", path.display());
        assert_eq!(path.file_name().unwrap(), figure.file_name.as_str());
    }
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn render_rgb_fills_whole_canvas() {
    let figure = scaled_speedup();
    let size = figure.canvas_size((200, 150));
    assert_eq!(size, (400, 150));
    let rgb = render_rgb(&figure, size, View::new(10.0, 45.0)).expect("render");
    assert_eq!(rgb.len(), 400 * 150 * 3);
    // Background is white; the surface must have painted something else.
    assert!(rgb.iter().any(|&c| c != 255));
}

#[test]
fn run_with_save_writes_all_figures() {
    let dir = unique_dir("run");
    let dir_str = dir.to_string_lossy().to_string();
    let args = Args::try_parse_from([
        "speedup-surfaces",
        "all",
        "--save",
        "--out-dir",
        dir_str.as_str(),
    ])
    .expect("parse args");
    let mut cfg = PlotsConfig::default();
    cfg.output.width = 320;
    cfg.output.height = 240;

    let saved = app::run(&args, &cfg, Arc::new(AtomicBool::new(false))).expect("run");
    assert_eq!(saved.len(), 3);
    for path in &saved {
        assert!(path.starts_with(&dir));
        assert!(fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false));
    }
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn run_default_sinks_only_saves_comm_ratio() {
    // Window-bound figures are skipped once the stop flag is raised.
    let dir = unique_dir("default");
    let dir_str = dir.to_string_lossy().to_string();
    let args = Args::try_parse_from(["speedup-surfaces", "--out-dir", dir_str.as_str()])
        .expect("parse args");
    let mut cfg = PlotsConfig::default();
    cfg.output.width = 320;
    cfg.output.height = 240;

    let saved = app::run(&args, &cfg, Arc::new(AtomicBool::new(true))).expect("run");
    assert_eq!(saved, vec![dir.join("comm_ratio_speedup.png")]);
    let _ = fs::remove_dir_all(&dir);
}

pub mod colormap;
pub mod figure;
pub mod surface;

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use crate::error::PlotResult;
use crate::plot::figure::{Figure, View};
use crate::plot::surface::draw_figure;

/// Render `figure` to `<out_dir>/<figure.file_name>` and return the path.
pub fn save_png(figure: &Figure, out_dir: &Path, panel_size: (u32, u32)) -> PlotResult<PathBuf> {
    create_dir_all(out_dir)?;
    let path = out_dir.join(&figure.file_name);
    let size = figure.canvas_size(panel_size);
    {
        let root = BitMapBackend::new(&path, size).into_drawing_area();
        draw_figure(figure, &root, View::NONE)?;
        root.present()?;
    }
    info!(figure = %figure.name, path = %path.display(), "saved figure");
    Ok(path)
}

/// Rasterise `figure` into a packed RGB8 buffer of `size.0 * size.1 * 3` bytes.
pub fn render_rgb(figure: &Figure, size: (u32, u32), rotation: View) -> PlotResult<Vec<u8>> {
    let mut buf = vec![0u8; size.0 as usize * size.1 as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, size).into_drawing_area();
        draw_figure(figure, &root, rotation)?;
        root.present()?;
    }
    Ok(buf)
}

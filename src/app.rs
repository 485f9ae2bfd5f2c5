use std::path::PathBuf;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tracing::{info, warn};

use crate::cli::Args;
use crate::config::PlotsConfig;
use crate::error::PlotResult;
use crate::plot::figure::SinkKind;
use crate::plot::save_png;
use crate::ui::viewer;

/// Build the selected figures, save the file-bound ones, then open a single
/// window for the rest. Returns the paths written.
pub fn run(args: &Args, cfg: &PlotsConfig, stop: Arc<AtomicBool>) -> PlotResult<Vec<PathBuf>> {
    let out_dir = PathBuf::from(
        args.out_dir
            .clone()
            .unwrap_or_else(|| cfg.output.dir.clone()),
    );
    let sink_override = args.sink_override();

    let mut saved = Vec::new();
    let mut windowed = Vec::new();
    for id in args.figure.figures() {
        let figure = id.build();
        let non_finite = figure.non_finite_count();
        if non_finite > 0 {
            warn!(figure = %id, non_finite, "result grid has non-finite cells");
        }

        let sink = sink_override.unwrap_or(figure.default_sink);
        info!(figure = %id, %sink, "routing figure");
        match sink {
            SinkKind::File => saved.push(save_png(&figure, &out_dir, cfg.output.panel_size())?),
            SinkKind::Window => windowed.push(figure),
        }
    }

    if !windowed.is_empty() && !stop.load(Ordering::SeqCst) {
        viewer::show(windowed, &cfg.output, &cfg.window, stop)?;
    }
    Ok(saved)
}

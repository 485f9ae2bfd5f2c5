// Entry point: renders the selected speedup/efficiency figures.
use std::process;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use clap::Parser;
use tracing::{error, info, warn};

use speedup_surfaces::app;
use speedup_surfaces::cli::Args;
use speedup_surfaces::config::PlotsConfig;

fn main() {
    let args = Args::parse();
    let cfg = PlotsConfig::load_or_default(&args.config);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cfg.logging.level.as_str()),
    )
    .format_timestamp_micros()
    .init();
    info!(config = %args.config, figure = ?args.figure, "starting");

    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_for_ctrlc = stop_flag.clone();
    if let Err(err) = ctrlc::set_handler(move || {
        stop_flag_for_ctrlc.store(true, Ordering::SeqCst);
    }) {
        warn!("failed to install Ctrl-C handler: {err}");
    }

    match app::run(&args, &cfg, stop_flag) {
        Ok(saved) => {
            for path in &saved {
                println!("Saved {}", path.display());
            }
        }
        Err(err) => {
            error!("{err}");
            process::exit(1);
        }
    }
}

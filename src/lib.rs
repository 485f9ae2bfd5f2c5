//! Surface plots of closed-form parallel speedup and efficiency models.
//!
//! `model` holds the formulas and grid construction, `plot` turns grids into
//! plotters figures, `ui` shows them in an eframe window, and `figures`
//! wires the fixed parameter sets together.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod figures;
pub mod model;
pub mod plot;
pub mod ui;

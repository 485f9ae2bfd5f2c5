use clap::{Parser, ValueEnum};

use crate::figures::FigureId;
use crate::plot::figure::SinkKind;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Figure to render
    #[arg(value_enum, default_value_t = FigureArg::All)]
    pub figure: FigureArg,

    /// Save every selected figure as PNG
    #[arg(long, conflicts_with = "show")]
    pub save: bool,

    /// Open every selected figure in a window
    #[arg(long)]
    pub show: bool,

    /// Output directory for saved figures (overrides config)
    #[arg(long)]
    pub out_dir: Option<String>,

    /// Path to config TOML
    #[arg(long, default_value = "plots.toml")]
    pub config: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FigureArg {
    CommRatio,
    Speedup,
    Efficiency,
    All,
}

impl FigureArg {
    pub fn figures(self) -> Vec<FigureId> {
        match self {
            Self::CommRatio => vec![FigureId::CommRatio],
            Self::Speedup => vec![FigureId::Speedup],
            Self::Efficiency => vec![FigureId::Efficiency],
            Self::All => FigureId::ALL.to_vec(),
        }
    }
}

impl Args {
    /// Sink forced by `--save`/`--show`, if any.
    pub fn sink_override(&self) -> Option<SinkKind> {
        if self.save {
            Some(SinkKind::File)
        } else if self.show {
            Some(SinkKind::Window)
        } else {
            None
        }
    }
}

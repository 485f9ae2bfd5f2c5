pub mod grid;
pub mod speedup;

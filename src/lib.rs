//! Commit activity heatmap: a 53-week year grid built from per-day commit
//! counts, with a terminal UI and plain-text/JSON reports.

pub mod cli;
pub mod services;
pub mod tui;
pub mod types;

//! TUI widgets

pub mod heatmap;
pub mod help;
pub mod spinner;
pub mod year_view;

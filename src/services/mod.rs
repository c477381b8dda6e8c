//! Heatmap computation and data-source services

pub mod activity_client;
pub mod calendar;
pub mod config;
pub mod grid;
pub mod intensity;
pub mod navigator;
pub mod plural;
pub mod source;
pub mod stats;
pub mod synthetic;

pub use activity_client::ActivityClient;
pub use calendar::start_date;
pub use config::{Config, Overrides};
pub use grid::{
    build_grid, year_activity, year_grid, year_summary, CellSummary, GridReport, YearSummary,
};
pub use intensity::IntensityBucket;
pub use navigator::{increment, YearBounds, YearNavigator};
pub use plural::{format_count, pluralize};
pub use source::ActivitySource;
pub use stats::YearStats;

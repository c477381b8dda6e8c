//! Type definitions for commitmap

mod activity;
mod error;
mod grid;

pub use activity::*;
pub use error::*;
pub use grid::*;

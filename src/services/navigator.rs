//! Bounded year selection

use serde::Serialize;

use crate::types::{CommitmapError, Result};

/// Move `current` by `delta` when the result stays within `[min, max]`.
/// Out-of-range requests return `current` unchanged.
pub fn increment(current: i32, delta: i32, min: i32, max: i32) -> i32 {
    match current.checked_add(delta) {
        Some(next) if (min..=max).contains(&next) => next,
        _ => current,
    }
}

/// Inclusive range of selectable years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearBounds {
    min: i32,
    max: i32,
}

impl YearBounds {
    pub fn new(min: i32, max: i32) -> Result<Self> {
        if min > max {
            return Err(CommitmapError::Config(format!(
                "year bounds are inverted: min {} > max {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(self) -> i32 {
        self.min
    }

    pub fn max(self) -> i32 {
        self.max
    }

    pub fn contains(self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }

    pub fn clamp(self, year: i32) -> i32 {
        year.clamp(self.min, self.max)
    }
}

/// Selected year plus the bounds it may move within
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearNavigator {
    year: i32,
    bounds: YearBounds,
}

impl YearNavigator {
    /// Start at `initial`, clamped into `bounds`
    pub fn new(initial: i32, bounds: YearBounds) -> Self {
        Self {
            year: bounds.clamp(initial),
            bounds,
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn bounds(self) -> YearBounds {
        self.bounds
    }

    pub fn step(self, delta: i32) -> Self {
        Self {
            year: increment(self.year, delta, self.bounds.min, self.bounds.max),
            ..self
        }
    }

    pub fn next(self) -> Self {
        self.step(1)
    }

    pub fn prev(self) -> Self {
        self.step(-1)
    }

    /// Whether `step(delta)` would move (controls use this to disable themselves)
    pub fn can_step(self, delta: i32) -> bool {
        delta != 0 && self.step(delta).year != self.year
    }
}

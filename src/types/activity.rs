//! Per-day commit activity as delivered by the analytics API

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use super::{CommitmapError, Result};

/// Date key format used by the analytics API
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Sparse mapping from calendar date to commit count.
/// Absent dates count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActivityMap(HashMap<NaiveDate, u32>);

impl ActivityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(HashMap::with_capacity(capacity))
    }

    /// Commit count for a date (0 when absent)
    pub fn get(&self, date: NaiveDate) -> u32 {
        self.0.get(&date).copied().unwrap_or(0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains_key(&date)
    }

    pub fn insert(&mut self, date: NaiveDate, count: u32) {
        self.0.insert(date, count);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u32)> + '_ {
        self.0.iter().map(|(&date, &count)| (date, count))
    }

    /// Validate a wire map (`"yyyy-mm-dd"` -> JSON number).
    ///
    /// Entries with malformed dates, negative, fractional or oversized
    /// counts are dropped and counted in [`Ingested::rejected`].
    pub fn from_wire(raw: HashMap<String, Value>) -> Ingested {
        let mut map = Self::with_capacity(raw.len());
        let mut rejected = 0;

        for (key, value) in raw {
            let Ok(date) = NaiveDate::parse_from_str(&key, DATE_KEY_FORMAT) else {
                tracing::warn!(key = %key, "skipping activity entry with malformed date");
                rejected += 1;
                continue;
            };

            match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
                Some(count) => map.insert(date, count),
                None => {
                    tracing::warn!(%date, value = %value, "skipping activity entry with invalid count");
                    rejected += 1;
                }
            }
        }

        Ingested { map, rejected }
    }

    /// Parse an API response body or a saved activity file.
    /// Accepts both `{"data": {...}}` and a bare date map.
    pub fn from_json_str(content: &str) -> Result<Ingested> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| CommitmapError::Parse(format!("invalid activity json: {}", e)))?;

        let object = match value {
            Value::Object(mut obj) => match obj.remove("data") {
                Some(Value::Object(inner)) => inner,
                Some(_) => {
                    return Err(CommitmapError::Parse(
                        "activity \"data\" field must be an object".into(),
                    ))
                }
                None => obj,
            },
            _ => {
                return Err(CommitmapError::Parse(
                    "activity json must be an object".into(),
                ))
            }
        };

        Ok(Self::from_wire(object.into_iter().collect()))
    }
}

impl FromIterator<(NaiveDate, u32)> for ActivityMap {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Result of validating a wire activity map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ingested {
    pub map: ActivityMap,
    /// Number of entries dropped during validation
    pub rejected: usize,
}

//! Where the heatmap's activity comes from

use std::fs;
use std::path::PathBuf;

use super::activity_client::ActivityClient;
use super::config::Config;
use crate::types::{ActivityMap, Result};

/// Activity data origin, chosen once per load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivitySource {
    /// Fetch from the analytics API for this author email
    Remote { email: String },
    /// Read a saved `{"yyyy-mm-dd": n}` file
    File(PathBuf),
    /// No real data: the grid falls back to generated activity
    Synthetic,
}

impl ActivitySource {
    /// Pick a source: explicit file first, then configured email, else synthetic
    pub fn select(input: Option<PathBuf>, config: &Config) -> Self {
        match (input, &config.email) {
            (Some(path), _) => Self::File(path),
            (None, Some(email)) => Self::Remote {
                email: email.clone(),
            },
            (None, None) => Self::Synthetic,
        }
    }

    /// Human-readable description for status lines
    pub fn describe(&self) -> String {
        match self {
            Self::Remote { email } => format!("API ({})", email),
            Self::File(path) => format!("file {}", path.display()),
            Self::Synthetic => "sample data".to_string(),
        }
    }

    /// Load the supplied activity. `Ok(None)` means no real data was
    /// supplied and the caller should generate a fallback series.
    pub fn load(&self, config: &Config) -> Result<Option<ActivityMap>> {
        match self {
            Self::Remote { email } => {
                let ingested = ActivityClient::new(config)?.fetch(email)?;
                Ok(Some(ingested.map))
            }
            Self::File(path) => {
                let content = fs::read_to_string(path)?;
                let ingested = ActivityMap::from_json_str(&content)?;
                if ingested.rejected > 0 {
                    tracing::warn!(
                        path = %path.display(),
                        rejected = ingested.rejected,
                        "some activity entries were skipped"
                    );
                }
                Ok(Some(ingested.map))
            }
            Self::Synthetic => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::config::{FileConfig, Overrides};
    use crate::types::CommitmapError;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn config_with_email(email: Option<&str>) -> Config {
        let overrides = Overrides {
            email: email.map(str::to_string),
            ..Overrides::default()
        };
        Config::resolve(
            FileConfig::default(),
            overrides,
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_select_priority() {
        let with_email = config_with_email(Some("dev@example.com"));
        let without = config_with_email(None);

        assert_eq!(
            ActivitySource::select(Some(PathBuf::from("a.json")), &with_email),
            ActivitySource::File(PathBuf::from("a.json"))
        );
        assert_eq!(
            ActivitySource::select(None, &with_email),
            ActivitySource::Remote {
                email: "dev@example.com".into()
            }
        );
        assert_eq!(
            ActivitySource::select(None, &without),
            ActivitySource::Synthetic
        );
    }

    #[test]
    fn test_synthetic_supplies_nothing() {
        let config = config_with_email(None);
        assert_eq!(ActivitySource::Synthetic.load(&config).unwrap(), None);
    }

    #[test]
    fn test_file_source_loads_map() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("activity.json");
        fs::write(&path, r#"{"data": {"2025-01-10": 5, "bogus": 1}}"#).unwrap();

        let config = config_with_email(None);
        let map = ActivitySource::File(path).load(&config).unwrap().unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()), 5);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let config = config_with_email(None);
        let result = ActivitySource::File(temp.path().join("missing.json")).load(&config);
        assert!(matches!(result, Err(CommitmapError::Io(_))));
    }

    #[test]
    fn test_describe() {
        assert_eq!(ActivitySource::Synthetic.describe(), "sample data");
        assert_eq!(
            ActivitySource::Remote {
                email: "a@b.c".into()
            }
            .describe(),
            "API (a@b.c)"
        );
    }
}

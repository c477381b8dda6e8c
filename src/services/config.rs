//! Runtime configuration
//!
//! Layers: built-in defaults, then `~/.commitmap/config.json`, then
//! command-line flags / environment (applied by the CLI via [`Overrides`]).

use chrono::{Datelike, NaiveDate};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::navigator::YearBounds;
use crate::types::{CommitmapError, Result};

/// Default analytics API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Year-activity read endpoint, relative to the base URL
pub const DEFAULT_ENDPOINT: &str = "/api/v1/personal/year-activity";

/// HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Earliest selectable year when not configured
pub const DEFAULT_MIN_YEAR: i32 = 2015;

/// On-disk configuration. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub email: Option<String>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub email: Option<String>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub email: Option<String>,
    pub year_bounds: YearBounds,
}

impl Config {
    /// Load from the default config path (missing file means defaults)
    pub fn load(overrides: Overrides, today: NaiveDate) -> Result<Self> {
        let file = match Self::default_path() {
            Ok(path) => FileConfig::load_optional(&path)?,
            Err(e) => {
                tracing::warn!(error = %e, "no config directory, using defaults");
                FileConfig::default()
            }
        };
        Self::resolve(file, overrides, today)
    }

    /// Load from an explicit path (the file must exist)
    pub fn load_from(path: &Path, overrides: Overrides, today: NaiveDate) -> Result<Self> {
        let file = FileConfig::load(path)?;
        Self::resolve(file, overrides, today)
    }

    /// Merge layers. The default upper year bound is `today`'s year.
    pub fn resolve(file: FileConfig, overrides: Overrides, today: NaiveDate) -> Result<Self> {
        let api_url = overrides
            .api_url
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = api_url.trim_end_matches('/').to_string();
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(CommitmapError::Config(format!(
                "api_url must start with http:// or https://, got {:?}",
                api_url
            )));
        }

        let endpoint = file
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = if endpoint.starts_with('/') {
            endpoint
        } else {
            format!("/{}", endpoint)
        };

        let min_year = overrides
            .min_year
            .or(file.min_year)
            .unwrap_or(DEFAULT_MIN_YEAR);
        let max_year = overrides.max_year.or(file.max_year).unwrap_or(today.year());

        Ok(Self {
            api_url,
            endpoint,
            timeout_secs: file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            email: overrides.email.or(file.email).filter(|e| !e.trim().is_empty()),
            year_bounds: YearBounds::new(min_year, max_year)?,
        })
    }

    /// Full URL of the year-activity endpoint (without query)
    pub fn activity_url(&self) -> String {
        format!("{}{}", self.api_url, self.endpoint)
    }

    /// Default config path (~/.commitmap/config.json)
    pub fn default_path() -> Result<PathBuf> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| CommitmapError::Config("Cannot determine home directory".into()))?;
        Ok(base_dirs.home_dir().join(".commitmap").join("config.json"))
    }
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            CommitmapError::Config(format!("invalid config {}: {}", path.display(), e))
        })
    }

    fn load_optional(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(FileConfig::default(), Overrides::default(), today()).unwrap();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.email, None);
        assert_eq!(config.year_bounds.min(), 2015);
        assert_eq!(config.year_bounds.max(), 2026);
        assert_eq!(
            config.activity_url(),
            "http://localhost:8000/api/v1/personal/year-activity"
        );
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"{
                "api_url": "https://analytics.example.com/",
                "endpoint": "activity",
                "timeout_secs": 3,
                "min_year": 2020,
                "max_year": 2030
            }"#,
        );

        let config = Config::load_from(&path, Overrides::default(), today()).unwrap();
        assert_eq!(config.api_url, "https://analytics.example.com");
        assert_eq!(config.endpoint, "/activity");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.year_bounds, YearBounds::new(2020, 2030).unwrap());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = FileConfig {
            api_url: Some("http://file.example".into()),
            email: Some("file@example.com".into()),
            min_year: Some(2018),
            ..FileConfig::default()
        };
        let overrides = Overrides {
            api_url: Some("http://flag.example".into()),
            email: Some("dev@example.com".into()),
            min_year: None,
            max_year: Some(2024),
        };

        let config = Config::resolve(file, overrides, today()).unwrap();
        assert_eq!(config.api_url, "http://flag.example");
        assert_eq!(config.email.as_deref(), Some("dev@example.com"));
        assert_eq!(config.year_bounds, YearBounds::new(2018, 2024).unwrap());
    }

    #[test]
    fn test_blank_email_is_none() {
        let overrides = Overrides {
            email: Some("  ".into()),
            ..Overrides::default()
        };
        let config = Config::resolve(FileConfig::default(), overrides, today()).unwrap();
        assert_eq!(config.email, None);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let overrides = Overrides {
            min_year: Some(2030),
            max_year: Some(2020),
            ..Overrides::default()
        };
        let result = Config::resolve(FileConfig::default(), overrides, today());
        assert!(matches!(result, Err(CommitmapError::Config(_))));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let overrides = Overrides {
            api_url: Some("localhost:8000".into()),
            ..Overrides::default()
        };
        let result = Config::resolve(FileConfig::default(), overrides, today());
        assert!(matches!(result, Err(CommitmapError::Config(_))));
    }

    #[test]
    fn test_corrupted_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "{ not json");
        let result = Config::load_from(&path, Overrides::default(), today());
        assert!(matches!(result, Err(CommitmapError::Config(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.json");
        let result = Config::load_from(&path, Overrides::default(), today());
        assert!(matches!(result, Err(CommitmapError::Io(_))));
    }

    #[test]
    fn test_missing_optional_file_is_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.json");
        assert_eq!(FileConfig::load_optional(&path).unwrap(), FileConfig::default());
    }
}

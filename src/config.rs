use crate::sharder::{GITHUB_MAX_JOBS, LEGACY_MAX_JOBS, MatrixEncoding, MaxJobs, ShardError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name of the GitHub-formatted matrix written next to the harvest output
pub const LATEST_VERSIONS_MATRIX_FILE: &str = "latest_versions.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Failed to parse config file {path}: {message}")]
    ParseFailed { path: String, message: String },
}

/// CI platform whose fan-out quota bounds the matrix size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    #[default]
    Github,
    Legacy,
}

impl Platform {
    pub fn max_jobs(self) -> usize {
        match self {
            Platform::Github => GITHUB_MAX_JOBS,
            Platform::Legacy => LEGACY_MAX_JOBS,
        }
    }
}

/// Knowledge base endpoint and the property ids used to walk it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Endpoint the entity dump was taken from. Only recorded in harvest logs;
    /// entities are read from the dump, never fetched.
    pub api_url: String,
    pub catalog_id: String,
    pub source_property: String,
    pub dataset_property: String,
    pub archives_id_property: String,
    pub download_date_property: String,
    pub url_property: String,
    pub archives_url_prefix: String,
    pub unknown_date: String,
    pub date_format: String,
}

impl CatalogConfig {
    /// The GTFS catalog of the Mobility Database wiki
    pub fn mobility_database() -> Self {
        Self {
            api_url: "http://old.mobilitydatabase.org/w/api.php".to_string(),
            catalog_id: "Q6".to_string(),
            source_property: "P5".to_string(),
            dataset_property: "P15".to_string(),
            archives_id_property: "P33".to_string(),
            download_date_property: "P32".to_string(),
            url_property: "P13".to_string(),
            archives_url_prefix: "https://storage.googleapis.com/storage".to_string(),
            unknown_date: "unknown-date".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::mobility_database()
    }
}

/// Settings shared by every subcommand, optionally loaded from a JSON file.
/// Command-line flags take precedence over file values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Explicit job limit; wins over `platform`
    pub max_jobs: Option<usize>,
    pub platform: Platform,
    pub encoding: MatrixEncoding,
    pub catalog: CatalogConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&contents).map_err(|e| ConfigError::ParseFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolve the job limit: explicit count, then platform, then file values
    pub fn resolve_max_jobs(
        &self,
        max_jobs: Option<usize>,
        platform: Option<Platform>,
    ) -> Result<MaxJobs, ShardError> {
        let limit = match (max_jobs, platform) {
            (Some(jobs), _) => jobs,
            (None, Some(platform)) => platform.max_jobs(),
            (None, None) => self.max_jobs.unwrap_or_else(|| self.platform.max_jobs()),
        };
        MaxJobs::new(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_github_quota() {
        let config = Config::default();
        assert_eq!(config.resolve_max_jobs(None, None).unwrap().get(), 256);
        assert_eq!(config.encoding, MatrixEncoding::Legacy);
        assert_eq!(config.catalog.catalog_id, "Q6");
    }

    #[test]
    fn test_flag_precedence() {
        let config = Config {
            max_jobs: Some(12),
            ..Config::default()
        };
        assert_eq!(config.resolve_max_jobs(None, None).unwrap().get(), 12);
        assert_eq!(
            config
                .resolve_max_jobs(None, Some(Platform::Legacy))
                .unwrap()
                .get(),
            60
        );
        assert_eq!(
            config
                .resolve_max_jobs(Some(5), Some(Platform::Legacy))
                .unwrap()
                .get(),
            5
        );
        assert!(config.resolve_max_jobs(Some(0), None).is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"platform": "legacy", "encoding": "json-array", "catalog": {{"catalog_id": "Q99"}}}}"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.platform, Platform::Legacy);
        assert_eq!(config.encoding, MatrixEncoding::JsonArray);
        assert_eq!(config.catalog.catalog_id, "Q99");
        // Unset catalog fields keep their defaults
        assert_eq!(config.catalog.source_property, "P5");
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = Config::load(file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/harvest-matrix.json"));
        assert!(matches!(result, Err(ConfigError::ReadFailed { .. })));
    }
}

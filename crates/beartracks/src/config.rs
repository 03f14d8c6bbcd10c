/// Application configuration loaded from an optional JSON file
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::Level;

use crate::roster::{RosterPolicy, DEFAULT_FACULTIES};
use crate::store::{StorePaths, COURSES_FILE, ENROLLMENTS_FILE, STUDENTS_FILE};

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Invalid log level '{value}'")]
    InvalidLogLevel { value: String },

    #[error("Invalid listen address '{value}'")]
    InvalidListenAddr { value: String },
}

/// Top-level configuration. Every field has a default, so an empty `{}` file
/// (or no file at all) is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the three record files
    pub data_dir: PathBuf,
    pub courses_file: String,
    pub enrollments_file: String,
    pub students_file: String,
    /// Address the HTTP front end binds to
    pub listen_addr: String,
    /// One of trace, debug, info, warn, error
    pub log_level: String,
    /// Faculties a new student may be admitted to
    pub faculties: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            courses_file: COURSES_FILE.to_string(),
            enrollments_file: ENROLLMENTS_FILE.to_string(),
            students_file: STUDENTS_FILE.to_string(),
            listen_addr: "127.0.0.1:8080".to_string(),
            log_level: "info".to_string(),
            faculties: DEFAULT_FACULTIES.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// Loads the config file at `path`, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Resolved locations of the record files.
    pub fn store_paths(&self) -> StorePaths {
        StorePaths {
            courses: self.data_dir.join(&self.courses_file),
            enrollments: self.data_dir.join(&self.enrollments_file),
            students: self.data_dir.join(&self.students_file),
        }
    }

    pub fn roster_policy(&self) -> RosterPolicy {
        RosterPolicy::new(&self.faculties)
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        Level::from_str(self.log_level.trim()).map_err(|_| ConfigError::InvalidLogLevel {
            value: self.log_level.clone(),
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen_addr
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddr {
                value: self.listen_addr.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config.store_paths(), StorePaths::in_dir(Path::new(".")));
        assert_eq!(config.log_level().unwrap(), Level::INFO);
        assert_eq!(config.listen_addr().unwrap().port(), 8080);
        assert_eq!(config.roster_policy().faculties().len(), 5);
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_json(
            r#"{"data_dir": "/srv/beartracks", "enrollments_file": "enrolled.txt", "faculties": ["law"]}"#,
        )
        .unwrap();
        let paths = config.store_paths();
        assert_eq!(paths.enrollments, PathBuf::from("/srv/beartracks/enrolled.txt"));
        assert_eq!(paths.courses, PathBuf::from("/srv/beartracks/courses.txt"));
        assert_eq!(config.roster_policy().faculties(), &["LAW".to_string()]);
    }

    #[test]
    fn test_bad_values_are_reported() {
        let config = AppConfig::from_json(r#"{"log_level": "loud", "listen_addr": "nowhere"}"#)
            .unwrap();
        assert!(matches!(
            config.log_level(),
            Err(ConfigError::InvalidLogLevel { .. })
        ));
        assert!(matches!(
            config.listen_addr(),
            Err(ConfigError::InvalidListenAddr { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let missing = std::env::temp_dir().join("beartracks-no-such-config.json");
        assert!(matches!(
            AppConfig::load(Some(&missing)),
            Err(ConfigError::Io { .. })
        ));
        assert!(AppConfig::load(None).is_ok());
    }
}

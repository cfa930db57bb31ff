use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::ScaleEntry;
use crate::scale;
use crate::snapshot::{self, SnapshotError};

pub const LOG_ENV: &str = "GRADE_TRACKER_LOG";
pub const DEFAULT_SCALE_ENV: &str = "GRADE_TRACKER_DEFAULT_SCALE";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read default scale {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("default scale {} is not a JSON list of {{grade, threshold}}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Scale(#[from] SnapshotError),
}

/// Process-wide settings taken from the environment (and `.env`).
///
/// Reading the environment never touches the filesystem. The default scale
/// file is only read by commands that grade courses.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_filter: String,
    /// JSON scale applied to courses whose snapshot carries none.
    pub default_scale_path: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(LOG_ENV).ok(),
            std::env::var_os(DEFAULT_SCALE_ENV).map(PathBuf::from),
        )
    }

    pub fn from_values(log_filter: Option<String>, default_scale_path: Option<PathBuf>) -> Self {
        Self {
            log_filter: log_filter
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            default_scale_path: default_scale_path.filter(|p| !p.as_os_str().is_empty()),
        }
    }

    /// The configured scale file, or the built-in scale when none is set.
    pub fn default_scale(&self) -> Result<Vec<ScaleEntry>, ConfigError> {
        match &self.default_scale_path {
            Some(path) => load_scale(path),
            None => Ok(scale::default_scale()),
        }
    }
}

pub fn load_scale(path: &Path) -> Result<Vec<ScaleEntry>, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: Vec<ScaleEntry> =
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    snapshot::validate_scale(&format!("default scale {}", path.display()), &entries)?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_json(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".json").expect("create temp json");
        file.write_all(contents.as_bytes()).expect("write json");
        file.flush().expect("flush json");
        file
    }

    #[test]
    fn defaults_use_builtin_scale() {
        let settings = Settings::from_values(None, None);
        assert_eq!(settings.log_filter, "info");
        assert_eq!(settings.default_scale_path, None);
        assert_eq!(settings.default_scale().expect("builtin"), scale::default_scale());

        let blank = Settings::from_values(Some("  ".to_string()), Some(PathBuf::new()));
        assert_eq!(blank, Settings::from_values(None, None));
    }

    #[test]
    fn missing_scale_file_only_fails_when_scale_is_needed() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let missing = dir.path().join("nonexistent.json");

        let settings = Settings::from_values(Some("debug".to_string()), Some(missing.clone()));
        assert_eq!(settings.log_filter, "debug");
        assert_eq!(settings.default_scale_path.as_deref(), Some(missing.as_path()));

        let err = settings.default_scale().unwrap_err();
        assert!(matches!(err, ConfigError::Read { ref path, .. } if path == &missing));
    }

    #[test]
    fn configured_scale_file_replaces_builtin() {
        let file = temp_json(r#"[{"grade": "Pass", "threshold": 60}, {"grade": "Fail", "threshold": 0}]"#);
        let settings = Settings::from_values(None, Some(file.path().to_path_buf()));
        let entries = settings.default_scale().expect("load configured scale");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].grade, "Fail");
    }

    #[test]
    fn loads_custom_scale_file() {
        let file = temp_json(r#"[{"grade": "Pass", "threshold": 50}, {"grade": "Fail", "threshold": 0}]"#);

        let entries = load_scale(file.path()).expect("load scale");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].grade, "Pass");
        assert_eq!(entries[0].threshold, 50.0);
    }

    #[test]
    fn rejects_invalid_scale_file() {
        let file = temp_json(r#"[{"grade": "A", "threshold": 90}, {"grade": "A", "threshold": 80}]"#);
        let err = load_scale(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Scale(SnapshotError::DuplicateGrade { .. })));

        let file = temp_json("{ not json");
        let err = load_scale(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

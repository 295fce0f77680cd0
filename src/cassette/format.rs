//! Cassette data structures and their YAML persistence.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single recorded call on a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name, e.g. `"http"`.
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Arguments the port was called with. Credentials are never stored.
    pub input: serde_json::Value,
    /// What the port returned, as `{"Ok": ..}` or `{"Err": ..}`.
    pub output: serde_json::Value,
}

/// A named, ordered list of interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit hash at recording time.
    pub commit: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

/// Failure to load or store a cassette file.
#[derive(Debug, Error)]
pub enum CassetteError {
    /// The file could not be read.
    #[error("failed to read cassette {}: {source}", .path.display())]
    Read {
        /// Cassette location.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not a valid cassette.
    #[error("failed to parse cassette {}: {source}", .path.display())]
    Parse {
        /// Cassette location.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
    /// The cassette could not be written.
    #[error("failed to write cassette {}: {source}", .path.display())]
    Write {
        /// Cassette location.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The cassette could not be encoded.
    #[error("failed to encode cassette: {0}")]
    Encode(#[from] serde_yaml::Error),
}

impl Cassette {
    /// Reads a cassette from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CassetteError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| CassetteError::Read { path: path.to_path_buf(), source })?;
        serde_yaml::from_str(&content)
            .map_err(|source| CassetteError::Parse { path: path.to_path_buf(), source })
    }

    /// Writes this cassette as YAML, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), CassetteError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)
            .map_err(|source| CassetteError::Write { path: path.to_path_buf(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn save_then_load_preserves_interactions() {
        let dir = std::env::temp_dir().join("snyk_reach_cassette_format");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pages.cassette.yaml");

        let cassette = Cassette {
            name: "pages".into(),
            recorded_at: Utc::now(),
            commit: "abc123".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "http".into(),
                method: "get_json".into(),
                input: json!({"url": "https://api.snyk.io/rest/orgs?slug=acme"}),
                output: json!({"Ok": {"data": [{"id": "org-9"}]}}),
            }],
        };
        cassette.save(&path).unwrap();

        let loaded = Cassette::load(&path).unwrap();
        assert_eq!(loaded, cassette);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_reports_missing_file() {
        let path = std::env::temp_dir().join("snyk_reach_no_such.cassette.yaml");
        let err = Cassette::load(&path).unwrap_err();
        assert!(matches!(err, CassetteError::Read { .. }));
        assert!(err.to_string().contains("no_such"));
    }

    #[test]
    fn load_reports_malformed_yaml() {
        let dir = std::env::temp_dir().join("snyk_reach_cassette_malformed");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.cassette.yaml");
        std::fs::write(&path, "interactions: [oops").unwrap();

        let err = Cassette::load(&path).unwrap_err();
        assert!(matches!(err, CassetteError::Parse { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }
}

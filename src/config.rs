//! Runtime configuration read from the process environment.
//!
//! Settings are loaded once at startup and injected into the service. A
//! missing API token is deliberately not a load failure: each invocation
//! reports it as a configuration error instead, so the gateway stays up and
//! answers with a 500 rather than refusing to start.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

/// Default REST API base.
pub const DEFAULT_API_URL: &str = "https://api.snyk.io/rest";
/// Default value of the `version` query parameter.
pub const DEFAULT_API_VERSION: &str = "2024-10-15";
/// Default per-fetch timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default issue page size.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A numeric variable did not parse.
    #[error("{var} must be a positive integer, got `{value}`")]
    InvalidNumber {
        /// Variable name.
        var: &'static str,
        /// Rejected value.
        value: String,
    },
    /// The API base is not an absolute http(s) URL.
    #[error("{var} is not a usable http(s) URL: `{value}`")]
    InvalidUrl {
        /// Variable name.
        var: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Service settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Bearer token for the REST API (`SNYK_TOKEN`).
    pub token: Option<String>,
    /// API base URL (`SNYK_API_URL`).
    pub api_url: Url,
    /// API version parameter (`SNYK_API_VERSION`).
    pub api_version: String,
    /// Per-fetch timeout (`SNYK_TIMEOUT_SECS`).
    pub timeout: Duration,
    /// Issue page size (`SNYK_PAGE_LIMIT`).
    pub page_limit: u32,
    /// Optional wall-clock budget for a whole invocation (`SNYK_INVOCATION_BUDGET_SECS`).
    pub invocation_budget: Option<Duration>,
    /// Cassette path to record upstream traffic to (`SNYK_REACH_RECORD`).
    pub record_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            token: None,
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            page_limit: DEFAULT_PAGE_LIMIT,
            invocation_budget: None,
            record_path: None,
        }
    }
}

impl Settings {
    /// Loads settings from `.env` (if present) and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unusable value.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is the normal case in deployment.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let api_url = match get("SNYK_API_URL") {
            Some(value) => parse_base_url("SNYK_API_URL", &value)?,
            None => defaults.api_url,
        };

        Ok(Self {
            token: get("SNYK_TOKEN"),
            api_url,
            api_version: get("SNYK_API_VERSION").unwrap_or(defaults.api_version),
            timeout: get("SNYK_TIMEOUT_SECS")
                .map(|v| parse_positive("SNYK_TIMEOUT_SECS", &v).map(Duration::from_secs))
                .transpose()?
                .unwrap_or(defaults.timeout),
            page_limit: get("SNYK_PAGE_LIMIT")
                .map(|v| {
                    parse_positive("SNYK_PAGE_LIMIT", &v).and_then(|n| {
                        u32::try_from(n).map_err(|_| ConfigError::InvalidNumber {
                            var: "SNYK_PAGE_LIMIT",
                            value: v.clone(),
                        })
                    })
                })
                .transpose()?
                .unwrap_or(defaults.page_limit),
            invocation_budget: get("SNYK_INVOCATION_BUDGET_SECS")
                .map(|v| parse_positive("SNYK_INVOCATION_BUDGET_SECS", &v).map(Duration::from_secs))
                .transpose()?,
            record_path: get("SNYK_REACH_RECORD").map(PathBuf::from),
        })
    }
}

fn parse_positive(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber { var, value: value.to_string() }),
    }
}

fn parse_base_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidUrl { var, value: value.to_string() };
    let url = Url::parse(value.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid());
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = from_pairs(&[]).unwrap();
        assert!(settings.token.is_none());
        assert_eq!(settings.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(settings.api_version, DEFAULT_API_VERSION);
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.page_limit, 100);
        assert!(settings.invocation_budget.is_none());
        assert!(settings.record_path.is_none());
    }

    #[test]
    fn reads_every_variable() {
        let settings = from_pairs(&[
            ("SNYK_TOKEN", "tok"),
            ("SNYK_API_URL", "http://localhost:9000/rest"),
            ("SNYK_API_VERSION", "2024-01-04"),
            ("SNYK_TIMEOUT_SECS", "3"),
            ("SNYK_PAGE_LIMIT", "25"),
            ("SNYK_INVOCATION_BUDGET_SECS", "30"),
            ("SNYK_REACH_RECORD", "/tmp/run.cassette.yaml"),
        ])
        .unwrap();
        assert_eq!(settings.token.as_deref(), Some("tok"));
        assert_eq!(settings.api_url.as_str(), "http://localhost:9000/rest");
        assert_eq!(settings.api_version, "2024-01-04");
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.page_limit, 25);
        assert_eq!(settings.invocation_budget, Some(Duration::from_secs(30)));
        assert_eq!(settings.record_path, Some(PathBuf::from("/tmp/run.cassette.yaml")));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let settings = from_pairs(&[("SNYK_TOKEN", "  ")]).unwrap();
        assert!(settings.token.is_none());
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = from_pairs(&[("SNYK_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber { var: "SNYK_TIMEOUT_SECS", value: "soon".into() }
        );
        assert!(from_pairs(&[("SNYK_PAGE_LIMIT", "0")]).is_err());
        assert!(from_pairs(&[("SNYK_PAGE_LIMIT", "99999999999")]).is_err());
    }

    #[test]
    fn rejects_non_http_base() {
        assert!(from_pairs(&[("SNYK_API_URL", "ftp://example.com")]).is_err());
        assert!(from_pairs(&[("SNYK_API_URL", "not a url")]).is_err());
    }
}

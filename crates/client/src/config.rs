use std::path::PathBuf;
use std::time::Duration;

use placement_core::registration::DEFAULT_EMAIL_DOMAIN;

/// Client configuration loaded from environment variables.
///
/// Every field has a default suitable for a local backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash (default:
    /// `http://localhost:8080/api`).
    pub api_url: String,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JSON file backing the session (default: `.placement-session.json`).
    pub session_file: PathBuf,
    /// Domain registration e-mails must belong to (default: `gct.ac.in`).
    pub email_domain: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api".into(),
            request_timeout_secs: 30,
            session_file: PathBuf::from(".placement-session.json"),
            email_domain: DEFAULT_EMAIL_DOMAIN.into(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                          | Default                      |
    /// |----------------------------------|------------------------------|
    /// | `PLACEMENT_API_URL`              | `http://localhost:8080/api`  |
    /// | `PLACEMENT_REQUEST_TIMEOUT_SECS` | `30`                         |
    /// | `PLACEMENT_SESSION_FILE`         | `.placement-session.json`    |
    /// | `PLACEMENT_EMAIL_DOMAIN`         | `gct.ac.in`                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = match var("PLACEMENT_API_URL") {
            Some(url) => normalize_api_url(&url)?,
            None => defaults.api_url,
        };

        let request_timeout_secs = match var("PLACEMENT_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    var: "PLACEMENT_REQUEST_TIMEOUT_SECS",
                    expected: "positive number of seconds",
                    value: raw,
                })?,
            None => defaults.request_timeout_secs,
        };

        let session_file = var("PLACEMENT_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.session_file);

        let email_domain = var("PLACEMENT_EMAIL_DOMAIN")
            .map(|d| d.trim().trim_start_matches('@').to_ascii_lowercase())
            .unwrap_or(defaults.email_domain);

        Ok(Self {
            api_url,
            request_timeout_secs,
            session_file,
            email_domain,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let url = raw.trim().trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.to_string())
    } else {
        Err(ConfigError::Invalid {
            var: "PLACEMENT_API_URL",
            expected: "http(s) URL",
            value: raw.to_string(),
        })
    }
}

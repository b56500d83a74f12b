//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use tourney_transport::DEFAULT_CREDENTIAL_KEY;

/// The API the client talks to when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Environment variable overriding [`ClientConfig::base_url`].
pub const ENV_API_URL: &str = "TOURNEY_API_URL";
/// Environment variable overriding [`ClientConfig::data_dir`].
pub const ENV_DATA_DIR: &str = "TOURNEY_DATA_DIR";
/// Environment variable setting [`ClientConfig::request_timeout`], in
/// whole seconds.
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "TOURNEY_REQUEST_TIMEOUT_SECS";

/// Errors raised while assembling a [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("base URL must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),
}

/// Where the API lives and where the token is kept.
///
/// Build one with the consuming setters:
///
/// ```rust
/// use std::time::Duration;
/// use tourney::ClientConfig;
///
/// let config = ClientConfig::default()
///     .base_url("https://cups.example.com/api/v1")
///     .request_timeout(Duration::from_secs(10));
/// assert_eq!(config.credential_key, "token");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root including the version segment.
    pub base_url: String,
    /// Directory holding the persisted token.
    pub data_dir: PathBuf,
    /// File name of the persisted token inside `data_dir`.
    pub credential_key: String,
    /// Per-request timeout. `None` lets a request wait indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: default_data_dir(),
            credential_key: DEFAULT_CREDENTIAL_KEY.to_string(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn credential_key(mut self, key: impl Into<String>) -> Self {
        self.credential_key = key.into();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Defaults overlaid with `TOURNEY_API_URL`, `TOURNEY_DATA_DIR` and
    /// `TOURNEY_REQUEST_TIMEOUT_SECS` where set.
    ///
    /// # Errors
    /// [`ConfigError`] if a variable is set to something unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through
    /// `lookup` instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                name: ENV_REQUEST_TIMEOUT_SECS,
                value: raw.clone(),
                reason: format!("{e}"),
            })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks values a client can't work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.credential_key.trim().is_empty() || self.credential_key.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                name: "credential_key",
                value: self.credential_key.clone(),
                reason: "must be a plain file name".into(),
            });
        }
        Ok(())
    }
}

/// The platform data directory (e.g. `~/.local/share/tourney` on Linux),
/// or `./.tourney` when the platform has none.
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "tourney")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".tourney"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api/v1");
        assert_eq!(config.credential_key, "token");
        assert_eq!(config.request_timeout, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::default()
            .base_url("https://cups.test/api/v1")
            .data_dir("/tmp/cups")
            .credential_key("session")
            .request_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "https://cups.test/api/v1");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/cups"));
        assert_eq!(config.credential_key, "session");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_from_lookup_empty_is_default() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_from_lookup_overlays_values() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, " https://cups.test/api/v1 "),
            (ENV_DATA_DIR, "/var/lib/tourney"),
            (ENV_REQUEST_TIMEOUT_SECS, "30"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://cups.test/api/v1");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/tourney"));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_from_lookup_bad_timeout_is_error() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_REQUEST_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { name: ENV_REQUEST_TIMEOUT_SECS, .. }
        ));
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let config = ClientConfig::default().base_url("localhost:8000");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_validate_rejects_path_in_key() {
        let config = ClientConfig::default().credential_key("../token");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { name: "credential_key", .. })
        ));
    }
}

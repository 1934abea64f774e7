//! Client configuration

use std::path::PathBuf;

use shared::DEFAULT_SERVICE_PORT;

/// Default location of the persisted remote settings
pub const DEFAULT_SETTINGS_PATH: &str = "./multiremote/settings.json";

/// Client configuration for connecting to the Zone/Scene Service
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | MULTIREMOTE_URL | http://localhost:5000 | Service base URL |
/// | MULTIREMOTE_HOST | - | Host only, expanded to `http://<host>:5000` |
/// | MULTIREMOTE_TIMEOUT | 30 | Request timeout (seconds) |
/// | MULTIREMOTE_SETTINGS | ./multiremote/settings.json | Remote settings file |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Where the remote name, id and home zone are persisted
    pub settings_path: PathBuf,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            settings_path: PathBuf::from(DEFAULT_SETTINGS_PATH),
        }
    }

    /// Configuration for a service running on `host` at the standard port
    pub fn for_host(host: &str) -> Self {
        Self::new(format!("http://{}:{}", host, DEFAULT_SERVICE_PORT))
    }

    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults. `MULTIREMOTE_URL` wins over
    /// `MULTIREMOTE_HOST`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = match (lookup("MULTIREMOTE_URL"), lookup("MULTIREMOTE_HOST")) {
            (Some(url), _) => Self::new(url),
            (None, Some(host)) => Self::for_host(&host),
            (None, None) => Self::default(),
        };

        if let Some(timeout) = lookup("MULTIREMOTE_TIMEOUT").and_then(|t| t.parse().ok()) {
            config.timeout = timeout;
        }
        if let Some(path) = lookup("MULTIREMOTE_SETTINGS") {
            config.settings_path = PathBuf::from(path);
        }
        config
    }

    /// Point at another service URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the settings file location
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = path.into();
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self)
    }

    /// Settings storage at the configured location
    pub fn settings_storage(&self) -> crate::SettingsStorage {
        crate::SettingsStorage::new(&self.settings_path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_host("localhost")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_host_uses_service_port() {
        let config = ClientConfig::for_host("10.0.3.1");
        assert_eq!(config.base_url, "http://10.0.3.1:5000");
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_builder_setters() {
        let config = ClientConfig::default()
            .with_timeout(5)
            .with_settings_path("/tmp/remote.json");
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout, 5);
        assert_eq!(config.settings_path, PathBuf::from("/tmp/remote.json"));
    }

    #[test]
    fn test_env_lookup() {
        let env = |vars: &'static [(&'static str, &'static str)]| {
            move |key: &str| {
                vars.iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, v)| v.to_string())
            }
        };

        let config = ClientConfig::from_lookup(env(&[
            ("MULTIREMOTE_HOST", "hub"),
            ("MULTIREMOTE_TIMEOUT", "7"),
            ("MULTIREMOTE_SETTINGS", "/etc/remote.json"),
        ]));
        assert_eq!(config.base_url, "http://hub:5000");
        assert_eq!(config.timeout, 7);
        assert_eq!(config.settings_path, PathBuf::from("/etc/remote.json"));

        let config = ClientConfig::from_lookup(env(&[
            ("MULTIREMOTE_URL", "https://remote.example:8443"),
            ("MULTIREMOTE_HOST", "hub"),
            ("MULTIREMOTE_TIMEOUT", "soon"),
        ]));
        assert_eq!(config.base_url, "https://remote.example:8443");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.settings_path, PathBuf::from(DEFAULT_SETTINGS_PATH));
    }
}

//! Client configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default backend address of the desktop shell
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:1420";

/// Client configuration for talking to the inventory backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://127.0.0.1:1420")
    pub base_url: String,

    /// Path prefix every route is mounted under
    pub api_prefix: String,

    /// Directory holding the cookie and preference files
    pub data_dir: PathBuf,

    /// Request timeout. `None` keeps requests unbounded, which is what the
    /// local backend expects.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_prefix: "/api".to_string(),
            data_dir: PathBuf::from("./dados"),
            timeout: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// - `ESTOQUE_API_URL`: backend base URL
    /// - `ESTOQUE_DATA_DIR`: directory for the local stores
    pub fn from_env() -> Self {
        let base_url = std::env::var("ESTOQUE_API_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                tracing::debug!("ESTOQUE_API_URL not set, using {DEFAULT_BASE_URL}");
                DEFAULT_BASE_URL.to_string()
            });

        let mut config = Self::new(base_url);
        if let Some(dir) = std::env::var_os("ESTOQUE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    /// Set the route prefix
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Set the data directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// File backing the cookie store (device identity)
    pub fn cookie_path(&self) -> PathBuf {
        self.data_dir.join("cookies.json")
    }

    /// File backing the durable preference store (theme)
    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir.join("preferences.json")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_prefix, "/api");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("http://localhost:9000")
            .with_data_dir("/tmp/estoque")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.cookie_path(), PathBuf::from("/tmp/estoque/cookies.json"));
        assert_eq!(
            config.preferences_path(),
            PathBuf::from("/tmp/estoque/preferences.json")
        );
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }
}

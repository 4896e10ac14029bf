//! Configuration file loading with environment variable overrides.

use std::path::Path;

use serde::Deserialize;

/// Default engine endpoint when none is configured.
const DEFAULT_ENGINE_URL: &str = "http://127.0.0.1:2233";

/// Bridge configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemeConfig {
    /// Base URL of the meme engine's web API.
    #[serde(default = "default_engine_url")]
    pub engine_url: String,

    /// Verify engine resources before loading the template catalog.
    /// When `false`, the catalog is loaded directly without pre-validation.
    #[serde(default = "default_check_resources")]
    pub check_resources: bool,

    /// Timeout for engine HTTP requests, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_engine_url() -> String {
    DEFAULT_ENGINE_URL.to_string()
}

fn default_check_resources() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for MemeConfig {
    fn default() -> Self {
        Self {
            engine_url: default_engine_url(),
            check_resources: default_check_resources(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl MemeConfig {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the engine base URL, preferring the `MEME_ENGINE_URL` environment
    /// variable over the configured value.
    #[must_use]
    pub fn engine_url(&self) -> String {
        std::env::var("MEME_ENGINE_URL").ok().unwrap_or_else(|| self.engine_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = MemeConfig::default();
        assert_eq!(config.engine_url, "http://127.0.0.1:2233");
        assert!(config.check_resources);
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = MemeConfig::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert!(config.check_resources);
    }

    #[test]
    fn load_valid_toml() {
        let dir = std::env::temp_dir().join("memebridge_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r#"
engine_url = "http://10.0.0.5:4000"
check_resources = false
request_timeout_secs = 15
"#,
        )
        .unwrap();

        let config = MemeConfig::load(&path).unwrap();
        assert_eq!(config.engine_url, "http://10.0.0.5:4000");
        assert!(!config.check_resources);
        assert_eq!(config.request_timeout_secs, 15);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_partial_toml_fills_defaults() {
        let dir = std::env::temp_dir().join("memebridge_config_partial_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "check_resources = false\n").unwrap();

        let config = MemeConfig::load(&path).unwrap();
        assert!(!config.check_resources);
        assert_eq!(config.engine_url, "http://127.0.0.1:2233");
        assert_eq!(config.request_timeout_secs, 60);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_invalid_toml() {
        let dir = std::env::temp_dir().join("memebridge_config_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(MemeConfig::load(&path).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn engine_url_without_env_returns_configured() {
        let config =
            MemeConfig { engine_url: "http://engine.local:2233".into(), ..MemeConfig::default() };

        std::env::remove_var("MEME_ENGINE_URL");
        assert_eq!(config.engine_url(), "http://engine.local:2233");
    }
}

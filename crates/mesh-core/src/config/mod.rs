//! Configuration management for mesh-launch

mod launch;

pub use launch::{DefaultsConfig, LaunchConfig, RemoteConfig, ToolConfig};

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Get the default configuration directory
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mesh-launch")
}

/// Get the default configuration file path
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

/// Load configuration from a file
pub fn load_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("Failed to read config: {}", e)))?;

    let config: T = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        let result: Result<LaunchConfig, _> = load_config(&path);
        assert!(matches!(result, Err(ConfigError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_load_invalid_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[remote\nhost_width = ").unwrap();
        let result: Result<LaunchConfig, _> = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_partial_config_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[remote]
user = "root"

[tools]
driver_module = "ath5k"

[defaults]
oml_server = "tcp:oml.example.org:3003"
"#,
        )
        .unwrap();

        let config: LaunchConfig = load_config(&path).unwrap();
        assert_eq!(config.remote.user.as_deref(), Some("root"));
        assert_eq!(config.remote.host_prefix, "node");
        assert_eq!(config.remote.host_width, 3);
        assert_eq!(config.tools.driver_module, "ath5k");
        assert_eq!(config.tools.router, "click");
        assert_eq!(config.defaults.ethernet, "eth0");
        assert_eq!(
            config.defaults.oml_server.as_deref(),
            Some("tcp:oml.example.org:3003")
        );
    }
}

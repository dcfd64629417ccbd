//! Configuration management.
//!
//! Supports configuration from:
//! - TOML config files
//! - Environment variables
//! - CLI arguments (for the `inspector` binary)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{InspectorError, Result};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Gateway admin API connection
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Output preferences
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| InspectorError::Config(format!("Failed to read config file: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| InspectorError::Config(format!("Failed to parse config: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("INSPECTOR_GATEWAY_URL") {
            config.gateway.base_url = url;
        }
        if let Ok(token) = std::env::var("INSPECTOR_TOKEN") {
            if !token.is_empty() {
                config.gateway.token = Some(token);
            }
        }
        if let Ok(val) = std::env::var("INSPECTOR_TIMEOUT_SECS") {
            if let Ok(val) = val.parse() {
                config.gateway.timeout_secs = val;
            }
        }
        if let Ok(val) = std::env::var("INSPECTOR_PAGE_SIZE") {
            if let Ok(val) = val.parse() {
                config.display.page_size = val;
            }
        }

        config
    }

    /// Default config file location (`<config_dir>/gateway-inspector/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gateway-inspector").join("config.toml"))
    }

    /// Load the config file (explicit path, else the default path if it
    /// exists), then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file_config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(path)?,
                None => Self::default(),
            },
        };

        Ok(file_config.merge(Self::from_env()))
    }

    /// Merge with another config (other takes precedence where it differs
    /// from the defaults)
    pub fn merge(self, other: Self) -> Self {
        let gateway_defaults = GatewayConfig::default();
        let display_defaults = DisplayConfig::default();

        Self {
            gateway: GatewayConfig {
                base_url: if other.gateway.base_url != gateway_defaults.base_url {
                    other.gateway.base_url
                } else {
                    self.gateway.base_url
                },
                token: other.gateway.token.or(self.gateway.token),
                timeout_secs: if other.gateway.timeout_secs != gateway_defaults.timeout_secs {
                    other.gateway.timeout_secs
                } else {
                    self.gateway.timeout_secs
                },
            },
            display: DisplayConfig {
                highlight: if other.display.highlight != display_defaults.highlight {
                    other.display.highlight
                } else {
                    self.display.highlight
                },
                page_size: if other.display.page_size != display_defaults.page_size {
                    other.display.page_size
                } else {
                    self.display.page_size
                },
            },
        }
    }
}

/// Gateway admin API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Admin API base URL (e.g., http://127.0.0.1:3000)
    pub base_url: String,

    /// Bearer token for the admin API
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Highlight JSON bodies in HTML output
    pub highlight: bool,

    /// Default page size for log listings
    pub page_size: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            highlight: true,
            page_size: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.gateway.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.gateway.timeout_secs, 30);
        assert!(config.gateway.token.is_none());
        assert!(config.display.highlight);
        assert_eq!(config.display.page_size, 20);
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [gateway]
            base_url = "https://gateway.internal:8443"
            token = "admin-jwt"

            [display]
            page_size = 50
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.gateway.base_url, "https://gateway.internal:8443");
        assert_eq!(config.gateway.token.as_deref(), Some("admin-jwt"));
        assert_eq!(config.gateway.timeout_secs, 30);
        assert_eq!(config.display.page_size, 50);
        assert!(config.display.highlight);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.gateway, GatewayConfig::default());
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_merge_prefers_non_default_values() {
        let file = Config {
            gateway: GatewayConfig {
                base_url: "https://file.example".to_string(),
                token: Some("file-token".to_string()),
                timeout_secs: 10,
            },
            display: DisplayConfig {
                highlight: false,
                page_size: 100,
            },
        };
        let env = Config {
            gateway: GatewayConfig {
                token: Some("env-token".to_string()),
                timeout_secs: 5,
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = file.merge(env);
        assert_eq!(merged.gateway.base_url, "https://file.example");
        assert_eq!(merged.gateway.token.as_deref(), Some("env-token"));
        assert_eq!(merged.gateway.timeout_secs, 5);
        assert!(!merged.display.highlight);
        assert_eq!(merged.display.page_size, 100);
    }

    #[test]
    fn test_from_file_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\nhighlight = false\npage_size = 5\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(!config.display.highlight);
        assert_eq!(config.display.page_size, 5);

        std::fs::write(&path, "[gateway\nbase_url = ").unwrap();
        assert!(matches!(
            Config::load(Some(path.as_path())),
            Err(InspectorError::Config(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file("/nonexistent/inspector.toml").unwrap_err();
        assert!(matches!(err, InspectorError::Config(_)));
    }
}

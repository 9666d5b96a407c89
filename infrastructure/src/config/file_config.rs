//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to typed values on use.

use clearflow_application::SupportParams;
use clearflow_domain::{DomainError, Locale};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    /// Backend API settings
    pub api: FileApiConfig,
    /// Locale settings
    pub locale: FileLocaleConfig,
    /// Support/chat settings
    pub support: FileSupportConfig,
    /// Local state storage settings
    pub storage: FileStorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileApiConfig {
    /// Base URL of the CMS backend
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1337".to_string(),
            timeout_secs: 30,
        }
    }
}

impl FileApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileLocaleConfig {
    /// Default storefront locale ("en" or "ar")
    pub default: String,
}

impl Default for FileLocaleConfig {
    fn default() -> Self {
        Self {
            default: "en".to_string(),
        }
    }
}

impl FileLocaleConfig {
    pub fn parse_default(&self) -> Result<Locale, DomainError> {
        self.default.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileSupportConfig {
    /// Ticket poll cadence in seconds
    pub poll_interval_secs: u64,
    /// Chat greeting override; unset falls back to the locale default
    pub greeting: Option<String>,
}

impl Default for FileSupportConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
            greeting: None,
        }
    }
}

impl FileSupportConfig {
    /// Typed support parameters, with `fallback_greeting` applied when the
    /// file carries no override.
    pub fn to_support_params(&self, fallback_greeting: &str) -> SupportParams {
        SupportParams::default()
            .with_poll_interval(Duration::from_secs(self.poll_interval_secs))
            .with_greeting(self.greeting.as_deref().unwrap_or(fallback_greeting))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Override for the state directory; unset uses the platform default
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[api]
base_url = "https://cms.example.com"
timeout_secs = 10

[locale]
default = "ar"

[support]
poll_interval_secs = 3
greeting = "أهلا!"

[storage]
dir = "/tmp/clearflow-state"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.api.base_url, "https://cms.example.com");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.locale.parse_default().unwrap(), Locale::Ar);

        let params = config.support.to_support_params("Hi!");
        assert_eq!(params.poll_interval, Duration::from_secs(3));
        assert_eq!(params.greeting, "أهلا!");
        assert_eq!(
            config.storage.dir.as_deref(),
            Some(std::path::Path::new("/tmp/clearflow-state"))
        );
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: FileConfig = toml::from_str("[locale]\ndefault = \"ar\"\n").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:1337");
        assert_eq!(config.support.poll_interval_secs, 5);
    }

    #[test]
    fn test_greeting_falls_back() {
        let config = FileConfig::default();
        let params = config.support.to_support_params("Hi! How can we help you today?");
        assert_eq!(params.greeting, "Hi! How can we help you today?");
    }

    #[test]
    fn test_invalid_locale_is_error() {
        let config: FileConfig = toml::from_str("[locale]\ndefault = \"xx\"\n").unwrap();
        assert!(config.locale.parse_default().is_err());
    }
}

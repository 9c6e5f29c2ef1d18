use crate::core::prefs::{DisplayPrefs, Theme};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{FeedError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub dashboard: DashboardConfig,
    pub source: SourceConfig,
    pub display: Option<DisplayConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub poll_interval_seconds: Option<u64>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

/// Seed values for [`DisplayPrefs`]; stored preferences still win at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub hidden_wells: Option<Vec<String>>,
    pub hidden_stock: Option<Vec<String>>,
    pub auto_scroll: Option<bool>,
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FeedError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FeedError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    // ${VAR_NAME} placeholders resolve against the environment; unknown
    // variables are left in place so validation flags them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FeedError::ConfigError {
            message: format!("env substitution regex: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("dashboard.name", &self.dashboard.name)?;
        validation::validate_url("source.endpoint", &self.source.endpoint)?;

        if let Some(interval) = self.source.poll_interval_seconds {
            validation::validate_range("source.poll_interval_seconds", interval, 1, 86_400)?;
        }
        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }

        if let Some(display) = &self.display {
            if let Some(theme) = &display.theme {
                if !matches!(theme.as_str(), "dark" | "light") {
                    return Err(FeedError::InvalidConfigValueError {
                        field: "display.theme".to_string(),
                        value: theme.clone(),
                        reason: "Valid themes: dark, light".to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    /// Display preferences seeded from the `[display]` section.
    pub fn display_prefs(&self) -> DisplayPrefs {
        let mut prefs = DisplayPrefs::default();
        if let Some(display) = &self.display {
            if let Some(hidden_wells) = &display.hidden_wells {
                prefs.hidden_wells = hidden_wells.clone();
            }
            if let Some(hidden_stock) = &display.hidden_stock {
                prefs.hidden_stock = hidden_stock.clone();
            }
            if let Some(auto_scroll) = display.auto_scroll {
                prefs.auto_scroll = auto_scroll;
            }
            if display.theme.as_deref() == Some("light") {
                prefs.theme = Theme::Light;
            }
        }
        prefs
    }
}

impl ConfigProvider for TomlConfig {
    fn feed_url(&self) -> &str {
        &self.source.endpoint
    }

    fn poll_interval_secs(&self) -> u64 {
        self.source
            .poll_interval_seconds
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS)
    }

    fn request_timeout_secs(&self) -> Option<u64> {
        self.source.timeout_seconds
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[dashboard]
name = "frac-board"
description = "Drilling stage board"

[source]
endpoint = "https://api.example.com/feed"
poll_interval_seconds = 15
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.dashboard.name, "frac-board");
        assert_eq!(config.source.endpoint, "https://api.example.com/feed");
        assert_eq!(config.poll_interval_secs(), 15);
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_poll_interval_defaults_when_absent() {
        let toml_content = r#"
[dashboard]
name = "board"

[source]
endpoint = "https://api.example.com/feed"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.poll_interval_secs(), DEFAULT_POLL_INTERVAL_SECS);
        assert_eq!(config.request_timeout_secs(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("WELLFEED_TEST_ENDPOINT", "https://test.api.com");

        let toml_content = r#"
[dashboard]
name = "board"

[source]
endpoint = "${WELLFEED_TEST_ENDPOINT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.endpoint, "https://test.api.com");

        std::env::remove_var("WELLFEED_TEST_ENDPOINT");
    }

    #[test]
    fn test_config_validation_rejects_bad_endpoint() {
        let toml_content = r#"
[dashboard]
name = "board"

[source]
endpoint = "invalid-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_unknown_theme() {
        let toml_content = r#"
[dashboard]
name = "board"

[source]
endpoint = "https://api.example.com/feed"

[display]
theme = "solarized"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_display_prefs_seeded_from_config() {
        let toml_content = r#"
[dashboard]
name = "board"

[source]
endpoint = "https://api.example.com/feed"

[display]
hidden_wells = ["Pozo 5", "Pozo 6"]
auto_scroll = false
theme = "light"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let prefs = config.display_prefs();
        assert_eq!(prefs.hidden_wells, vec!["Pozo 5", "Pozo 6"]);
        assert!(!prefs.auto_scroll);
        assert_eq!(prefs.theme, Theme::Light);
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[dashboard]
name = "file-test"

[source]
endpoint = "https://api.example.com"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.dashboard.name, "file-test");
    }
}

#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::DEFAULT_TIMEOUT_SECONDS;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use std::path::Path;
use toml_config::InspectorConfig;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";
pub const DEFAULT_CONFIG_FILE: &str = "koreader-inspector.toml";

/// Values given explicitly on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub json: bool,
}

/// Effective configuration after layering flags over the config file over
/// built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            json: false,
        }
    }
}

impl Settings {
    pub fn layered(overrides: &Overrides, file: Option<&InspectorConfig>) -> Self {
        let defaults = Self::default();

        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| file.and_then(|f| f.base_url()).map(str::to_string))
            .unwrap_or(defaults.base_url);
        let timeout_seconds = overrides
            .timeout_seconds
            .or_else(|| file.and_then(|f| f.timeout_seconds()))
            .unwrap_or(defaults.timeout_seconds);
        let json = overrides.json || file.and_then(|f| f.json_output()).unwrap_or(defaults.json);

        Self {
            base_url,
            timeout_seconds,
            json,
        }
    }

    /// Reads `config_path` if given, otherwise `koreader-inspector.toml` in the
    /// working directory when present, then layers `overrides` on top.
    pub fn load(overrides: &Overrides, config_path: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => Some(InspectorConfig::from_file(path)?),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                tracing::debug!("Using {} from the working directory", DEFAULT_CONFIG_FILE);
                Some(InspectorConfig::from_file(DEFAULT_CONFIG_FILE)?)
            }
            None => None,
        };

        let settings = Self::layered(overrides, file.as_ref());
        settings.validate()?;
        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("device.base_url", &self.base_url)?;
        validate_positive_number("device.timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_config(toml: &str) -> InspectorConfig {
        InspectorConfig::from_toml_str(toml).unwrap()
    }

    #[test]
    fn test_defaults_apply_without_file_or_flags() {
        let settings = Settings::layered(&Overrides::default(), None);
        assert_eq!(settings, Settings::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = file_config("[device]\nbase_url = \"http://kobo:8080\"\n[output]\njson = true\n");
        let settings = Settings::layered(&Overrides::default(), Some(&file));

        assert_eq!(settings.base_url, "http://kobo:8080");
        assert_eq!(settings.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert!(settings.json);
    }

    #[test]
    fn test_flags_override_file() {
        let file = file_config("[device]\nbase_url = \"http://kobo:8080\"\ntimeout_seconds = 30\n");
        let overrides = Overrides {
            base_url: Some("http://pocketbook:8080".to_string()),
            timeout_seconds: Some(2),
            json: false,
        };
        let settings = Settings::layered(&overrides, Some(&file));

        assert_eq!(settings.base_url, "http://pocketbook:8080");
        assert_eq!(settings.timeout_seconds, 2);
        assert!(!settings.json);
    }

    #[test]
    fn test_validation_rejects_zero_timeout_and_bad_url() {
        let mut settings = Settings::default();
        settings.timeout_seconds = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.base_url = "kobo:8080".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[device]\nbase_url = \"http://kindle.lan:8080/\"\ntimeout_seconds = 4\n")
            .unwrap();

        let settings = Settings::load(&Overrides::default(), Some(temp_file.path())).unwrap();
        assert_eq!(settings.base_url, "http://kindle.lan:8080/");
        assert_eq!(settings.timeout_seconds, 4);
    }

    #[test]
    fn test_load_reports_invalid_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[device]\nbase_url = \"ftp://kindle.lan/\"\n")
            .unwrap();

        let err = Settings::load(&Overrides::default(), Some(temp_file.path())).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}

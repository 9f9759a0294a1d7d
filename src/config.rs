use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::models::RiskThresholds;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Remote inference endpoint for the heart disease classifier
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelSettings {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ModelSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(10))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_bmi_overweight")]
    pub bmi_overweight: f64,
    #[serde(default = "default_bmi_obese")]
    pub bmi_obese: f64,
    #[serde(default = "default_sleep_min_hours")]
    pub sleep_min_hours: f64,
    #[serde(default = "default_sleep_max_hours")]
    pub sleep_max_hours: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            bmi_overweight: default_bmi_overweight(),
            bmi_obese: default_bmi_obese(),
            sleep_min_hours: default_sleep_min_hours(),
            sleep_max_hours: default_sleep_max_hours(),
        }
    }
}

impl From<&ThresholdsConfig> for RiskThresholds {
    fn from(config: &ThresholdsConfig) -> Self {
        Self {
            bmi_overweight: config.bmi_overweight,
            bmi_obese: config.bmi_obese,
            sleep_min_hours: config.sleep_min_hours,
            sleep_max_hours: config.sleep_max_hours,
        }
    }
}

fn default_bmi_overweight() -> f64 { 25.0 }
fn default_bmi_obese() -> f64 { 30.0 }
fn default_sleep_min_hours() -> f64 { 6.0 }
fn default_sleep_max_hours() -> f64 { 9.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingSettings {
    /// LOG_FORMAT from the environment wins over the configured format
    pub fn effective_format(&self, env_format: Option<String>) -> String {
        env_format
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| self.format.clone())
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HEARTGUARD_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HEARTGUARD__MODEL__ENDPOINT -> model.endpoint
            .add_source(env_source())
            .build()?;

        let settings = apply_model_env(settings)?;

        settings.try_deserialize()
    }

    pub fn risk_thresholds(&self) -> RiskThresholds {
        RiskThresholds::from(&self.thresholds)
    }

    /// Reject threshold sets that are not finite, negative, or inverted
    pub fn validate_thresholds(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        let named = [
            ("bmi_overweight", t.bmi_overweight),
            ("bmi_obese", t.bmi_obese),
            ("sleep_min_hours", t.sleep_min_hours),
            ("sleep_max_hours", t.sleep_max_hours),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Message(format!(
                    "thresholds.{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }
        if t.bmi_overweight > t.bmi_obese {
            return Err(ConfigError::Message(format!(
                "thresholds.bmi_overweight ({}) must not exceed thresholds.bmi_obese ({})",
                t.bmi_overweight, t.bmi_obese
            )));
        }
        if t.sleep_min_hours > t.sleep_max_hours {
            return Err(ConfigError::Message(format!(
                "thresholds.sleep_min_hours ({}) must not exceed thresholds.sleep_max_hours ({})",
                t.sleep_min_hours, t.sleep_max_hours
            )));
        }
        Ok(())
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("HEARTGUARD")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Pick up the conventional MODEL_URL / MODEL_API_KEY variables
fn apply_model_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    apply_model_overrides(settings, env::var("MODEL_URL").ok(), env::var("MODEL_API_KEY").ok())
}

fn apply_model_overrides(
    settings: Config,
    endpoint: Option<String>,
    api_key: Option<String>,
) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = endpoint {
        builder = builder.set_override("model.endpoint", endpoint)?;
    }
    if let Some(api_key) = api_key {
        builder = builder.set_override("model.api_key", api_key)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let thresholds = ThresholdsConfig::default();
        assert_eq!(thresholds.bmi_overweight, 25.0);
        assert_eq!(thresholds.bmi_obese, 30.0);
        assert_eq!(thresholds.sleep_min_hours, 6.0);
        assert_eq!(thresholds.sleep_max_hours, 9.0);
        assert_eq!(RiskThresholds::from(&thresholds), RiskThresholds::default());
    }

    fn base_config(raw: &str) -> Config {
        Config::builder()
            .add_source(File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
    }

    #[test]
    fn test_model_url_overrides_file_endpoint() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [model]
            endpoint = "http://from-file:5000/invocations"
        "#;

        let merged = apply_model_overrides(
            base_config(raw),
            Some("http://from-env:7000/invocations".to_string()),
            Some("secret".to_string()),
        )
        .unwrap();
        let settings: Settings = merged.try_deserialize().unwrap();

        assert_eq!(settings.model.endpoint.as_deref(), Some("http://from-env:7000/invocations"));
        assert_eq!(settings.model.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_file_endpoint_kept_without_model_url() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [model]
            endpoint = "http://from-file:5000/invocations"
        "#;

        let merged = apply_model_overrides(base_config(raw), None, None).unwrap();
        let settings: Settings = merged.try_deserialize().unwrap();

        assert_eq!(settings.model.endpoint.as_deref(), Some("http://from-file:5000/invocations"));
        assert!(settings.model.api_key.is_none());
    }

    #[test]
    fn test_log_format_env_wins() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.effective_format(Some("pretty".to_string())), "pretty");
        assert_eq!(logging.effective_format(Some(" ".to_string())), "json");
        assert_eq!(logging.effective_format(None), "json");
    }

    #[test]
    fn test_partial_thresholds_section() {
        let parsed: ThresholdsConfig = toml::from_str("bmi_obese = 32.5").unwrap();
        assert_eq!(parsed.bmi_obese, 32.5);
        assert_eq!(parsed.bmi_overweight, 25.0);
        assert_eq!(parsed.sleep_max_hours, 9.0);
    }

    #[test]
    fn test_settings_from_toml() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [model]
            endpoint = "http://model:5000/invocations"
            timeout_secs = 3
        "#;
        let settings: Settings = toml::from_str(raw).unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.model.timeout(), Duration::from_secs(3));
        assert_eq!(settings.logging.format, "json");
        assert!(settings.validate_thresholds().is_ok());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [thresholds]
            sleep_min_hours = 10.0
        "#;
        let settings: Settings = toml::from_str(raw).unwrap();

        assert!(settings.validate_thresholds().is_err());
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [thresholds]
            sleep_min_hours = nan
        "#;
        let settings: Settings = toml::from_str(raw).unwrap();

        assert!(settings.risk_thresholds().sleep_min_hours.is_nan());
        assert!(settings.validate_thresholds().is_err());
    }

    #[test]
    fn test_negative_thresholds_rejected() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [thresholds]
            bmi_overweight = -10.0
            bmi_obese = -5.0
        "#;
        let settings: Settings = toml::from_str(raw).unwrap();

        assert!(settings.validate_thresholds().is_err());
    }

    #[test]
    fn test_infinite_threshold_rejected() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [thresholds]
            sleep_max_hours = inf
        "#;
        let settings: Settings = toml::from_str(raw).unwrap();

        assert!(settings.validate_thresholds().is_err());
    }
}

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Logging settings shared by every client binary.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit flattened JSON events instead of human-readable lines.
    #[serde(default)]
    pub json: bool,
    /// OTLP gRPC collector (e.g. http://tempo:4317). Spans are only exported when set.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            otlp_endpoint: None,
        }
    }
}

/// Load settings from `<dir>/base.yaml` (optional) overlaid with `APP_` environment variables.
///
/// Nested keys use `__` as separator, so `APP_API__BASE_URL` maps to `api.base_url`.
pub fn load_settings<T: DeserializeOwned>(configuration_directory: &Path) -> Result<T, ConfigError> {
    dotenvy::dotenv().ok();

    let settings = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yaml")).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default)]
        logging: LoggingSettings,
    }

    #[test]
    fn test_missing_directory_yields_defaults() {
        let probe: Probe = load_settings(Path::new("/nonexistent/config")).unwrap();
        assert_eq!(probe.logging.level, "info");
        assert!(!probe.logging.json);
        assert!(probe.logging.otlp_endpoint.is_none());
    }

    #[test]
    fn test_logging_settings_from_yaml_values() {
        let settings: LoggingSettings = serde_json::from_value(serde_json::json!({
            "level": "debug",
            "json": true
        }))
        .unwrap();
        assert_eq!(settings.level, "debug");
        assert!(settings.json);
        assert!(settings.otlp_endpoint.is_none());
    }
}

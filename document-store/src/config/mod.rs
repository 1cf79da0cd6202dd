use client_core::config::{load_settings, LoggingSettings};
use secrecy::Secret;
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApiSettings {
    /// Root of the REST API, including the version prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sent as `Authorization: Token <token>` when set.
    #[serde(default)]
    pub token: Option<Secret<String>>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/v1".to_string()
}

fn default_service_name() -> String {
    "document-store".to_string()
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;

    // Run either from the workspace root or from the crate directory
    let configuration_directory = if base_path.ends_with("document-store") {
        base_path.join("config")
    } else {
        base_path.join("document-store").join("config")
    };

    load_settings(&configuration_directory)
}

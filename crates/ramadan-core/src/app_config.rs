use std::path::PathBuf;

use crate::localize::Locale;
use crate::location::Coordinates;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub locale: Locale,
    pub settings_path: PathBuf,
    pub prayer_api_url: String,
    pub weather_api_url: String,
    pub ip_location_url: String,
    pub directory_api_url: String,
    /// Caller-side abort for schedule and weather fetches.
    pub request_timeout_secs: u64,
    /// Upper bound on a device position request.
    pub geolocation_timeout_secs: u64,
    pub settings_poll_secs: u64,
    pub user_agent: String,
    /// Fixed position reported as the device's own, when configured.
    pub device_position: Option<Coordinates>,
}

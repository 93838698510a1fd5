use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::error::ConfigError;
use crate::localize::Locale;
use crate::location::Coordinates;

pub const DEFAULT_PRAYER_API_URL: &str = "https://api.aladhan.com/v1";
pub const DEFAULT_WEATHER_API_URL: &str = "https://api.open-meteo.com/v1";
pub const DEFAULT_IP_LOCATION_URL: &str = "https://ipapi.co/json/";
pub const DEFAULT_DIRECTORY_API_URL: &str = "https://countriesnow.space/api/v0.1/countries";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let parse_f64 = |var: &str| -> Result<Option<f64>, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(None),
        }
    };

    let env = parse_environment(&or_default("RAMADAN_ENV", "development"))?;
    let log_level = or_default("RAMADAN_LOG_LEVEL", "info");
    let locale = or_default("RAMADAN_LOCALE", "en")
        .parse::<Locale>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "RAMADAN_LOCALE".to_string(),
            reason: e.to_string(),
        })?;
    let settings_path = lookup("RAMADAN_SETTINGS_PATH")
        .map_or_else(|_| default_settings_path(), PathBuf::from);

    let prayer_api_url = or_default("RAMADAN_PRAYER_API_URL", DEFAULT_PRAYER_API_URL);
    let weather_api_url = or_default("RAMADAN_WEATHER_API_URL", DEFAULT_WEATHER_API_URL);
    let ip_location_url = or_default("RAMADAN_IP_LOCATION_URL", DEFAULT_IP_LOCATION_URL);
    let directory_api_url = or_default("RAMADAN_DIRECTORY_API_URL", DEFAULT_DIRECTORY_API_URL);

    let request_timeout_secs = parse_u64("RAMADAN_REQUEST_TIMEOUT_SECS", "10")?;
    let geolocation_timeout_secs = parse_u64("RAMADAN_GEOLOCATION_TIMEOUT_SECS", "5")?;
    let settings_poll_secs = parse_u64("RAMADAN_SETTINGS_POLL_SECS", "2")?;
    let user_agent = or_default("RAMADAN_USER_AGENT", "ramadan-hub/0.1");

    let device_position = match (
        parse_f64("RAMADAN_DEVICE_LATITUDE")?,
        parse_f64("RAMADAN_DEVICE_LONGITUDE")?,
    ) {
        (Some(latitude), Some(longitude)) => {
            if !(-90.0..=90.0).contains(&latitude) {
                return Err(ConfigError::InvalidEnvVar {
                    var: "RAMADAN_DEVICE_LATITUDE".to_string(),
                    reason: format!("{latitude} is outside -90..=90"),
                });
            }
            if !(-180.0..=180.0).contains(&longitude) {
                return Err(ConfigError::InvalidEnvVar {
                    var: "RAMADAN_DEVICE_LONGITUDE".to_string(),
                    reason: format!("{longitude} is outside -180..=180"),
                });
            }
            Some(Coordinates {
                latitude,
                longitude,
            })
        }
        (None, None) => None,
        (Some(_), None) => {
            return Err(ConfigError::MissingEnvVar(
                "RAMADAN_DEVICE_LONGITUDE".to_string(),
            ))
        }
        (None, Some(_)) => {
            return Err(ConfigError::MissingEnvVar(
                "RAMADAN_DEVICE_LATITUDE".to_string(),
            ))
        }
    };

    Ok(AppConfig {
        env,
        log_level,
        locale,
        settings_path,
        prayer_api_url,
        weather_api_url,
        ip_location_url,
        directory_api_url,
        request_timeout_secs,
        geolocation_timeout_secs,
        settings_poll_secs,
        user_agent,
        device_position,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "RAMADAN_ENV".to_string(),
            reason: format!(
                "unrecognized environment '{other}'; expected development, test, or production"
            ),
        }),
    }
}

/// `<config_dir>/ramadan-hub/settings.json`, or a file in the working
/// directory on platforms without a config dir.
fn default_settings_path() -> PathBuf {
    dirs::config_dir().map_or_else(
        || PathBuf::from("ramadan-settings.json"),
        |dir| dir.join("ramadan-hub").join("settings.json"),
    )
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

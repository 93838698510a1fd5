//! HTTP client for the Open-Meteo forecast API.

use chrono::NaiveDate;
use ramadan_core::{Coordinates, CurrentConditions, DailyForecast, WeatherReport};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::ClientError;
use crate::http::{build_client, decode, endpoint, normalise_base_url};

const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1";
const DEFAULT_USER_AGENT: &str = "ramadan-hub/0.1";

const CURRENT_FIELDS: &str =
    "temperature_2m,apparent_temperature,relative_humidity_2m,windspeed_10m,weathercode";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
    #[serde(default)]
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    #[serde(default)]
    time: String,
    temperature_2m: f64,
    #[serde(default)]
    apparent_temperature: Option<f64>,
    #[serde(default)]
    relative_humidity_2m: f64,
    #[serde(default, alias = "wind_speed_10m")]
    windspeed_10m: f64,
    #[serde(default, alias = "weather_code")]
    weathercode: u16,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_max: Vec<f64>,
    #[serde(default)]
    temperature_2m_min: Vec<f64>,
    #[serde(default, alias = "weather_code")]
    weathercode: Vec<u16>,
}

impl ForecastResponse {
    fn into_report(self) -> WeatherReport {
        let current = CurrentConditions {
            temperature: self.current.temperature_2m,
            apparent_temperature: self
                .current
                .apparent_temperature
                .unwrap_or(self.current.temperature_2m),
            humidity: self.current.relative_humidity_2m,
            wind_speed: self.current.windspeed_10m,
            weather_code: self.current.weathercode,
            time: self.current.time,
        };

        // Columns are parallel arrays; stop at the shortest.
        let daily = self.daily.map_or_else(Vec::new, |d| {
            let len = d
                .temperature_2m_max
                .len()
                .min(d.temperature_2m_min.len())
                .min(d.weathercode.len());
            (0..len)
                .map(|i| DailyForecast {
                    date: d
                        .time
                        .get(i)
                        .and_then(|t| NaiveDate::parse_from_str(t, "%Y-%m-%d").ok()),
                    temperature_max: d.temperature_2m_max[i],
                    temperature_min: d.temperature_2m_min[i],
                    weather_code: d.weathercode[i],
                })
                .collect()
        });

        WeatherReport { current, daily }
    }
}

/// Client for current conditions and the daily forecast.
pub struct WeatherClient {
    client: Client,
    base_url: Url,
}

impl WeatherClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the client cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, ClientError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL, DEFAULT_USER_AGENT)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the client cannot be constructed, or
    /// [`ClientError::InvalidBaseUrl`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        timeout_secs: u64,
        base_url: &str,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            base_url: normalise_base_url(base_url)?,
        })
    }

    /// Fetches the current conditions and the daily forecast at `coordinates`,
    /// in the location's own timezone.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or a non-2xx status.
    /// - [`ClientError::Deserialize`] if the body lacks the `current` block.
    pub async fn forecast(&self, coordinates: Coordinates) -> Result<WeatherReport, ClientError> {
        let lat = coordinates.latitude.to_string();
        let lon = coordinates.longitude.to_string();
        let url = endpoint(
            &self.base_url,
            "forecast",
            &[
                ("latitude", &lat),
                ("longitude", &lon),
                ("current", CURRENT_FIELDS),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
            ],
        )?;

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let parsed: ForecastResponse = decode(&body, &format!("forecast({coordinates})"))?;
        Ok(parsed.into_report())
    }
}

//! HTTP client for the Aladhan-style prayer-time REST API.
//!
//! Wraps `reqwest` with envelope checking and typed response
//! deserialization. Every endpoint checks the `"code"` field of the JSON
//! envelope and surfaces failures as [`ClientError::ApiError`].

use chrono::{DateTime, NaiveDate, Utc};
use ramadan_core::{
    CalendarSystem, Coordinates, DaySchedule, HijriDate, LocationTarget, ScheduleDay,
};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::http::{build_client, endpoint, normalise_base_url};
use crate::types::{ApiResponse, ConversionData, TimingsData};

const DEFAULT_BASE_URL: &str = "https://api.aladhan.com/v1";
const DEFAULT_USER_AGENT: &str = "ramadan-hub/0.1";

/// Client for the prayer-time calculation service.
///
/// Use [`PrayerTimesClient::new`] for production or
/// [`PrayerTimesClient::with_base_url`] to point at a mock server in tests.
pub struct PrayerTimesClient {
    client: Client,
    base_url: Url,
}

impl PrayerTimesClient {
    /// Creates a new client pointed at the public API.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, ClientError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL, DEFAULT_USER_AGENT)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
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

    /// Fetches one day's timetable for a coordinate pair, keyed on the unix
    /// timestamp of `at`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::ApiError`] if the API returns a failure envelope.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the response does not match the
    ///   expected shape (including a missing prayer key).
    pub async fn day_by_coordinates(
        &self,
        coordinates: Coordinates,
        method: u8,
        at: DateTime<Utc>,
    ) -> Result<DaySchedule, ClientError> {
        let lat = coordinates.latitude.to_string();
        let lon = coordinates.longitude.to_string();
        let method = method.to_string();
        let path = format!("timings/{}", at.timestamp());
        let url = self.build_url(
            &path,
            &[("latitude", &lat), ("longitude", &lon), ("method", &method)],
        )?;
        let data: TimingsData = self
            .request_data(&url, &format!("timings(lat={lat}, lon={lon})"))
            .await?;
        data.into_day_schedule()
    }

    /// Fetches one day's timetable for a city, keyed on the calendar date.
    ///
    /// # Errors
    ///
    /// See [`PrayerTimesClient::day_by_coordinates`].
    pub async fn day_by_city(
        &self,
        city: &str,
        country: &str,
        method: u8,
        date: NaiveDate,
    ) -> Result<DaySchedule, ClientError> {
        let method = method.to_string();
        let path = format!("timingsByCity/{}", date.format("%d-%m-%Y"));
        let url = self.build_url(
            &path,
            &[("city", city), ("country", country), ("method", &method)],
        )?;
        let data: TimingsData = self
            .request_data(&url, &format!("timingsByCity(city={city}, country={country})"))
            .await?;
        data.into_day_schedule()
    }

    /// Fetches a whole month in either calendar frame, by coordinates or by
    /// city depending on `target`.
    ///
    /// # Errors
    ///
    /// See [`PrayerTimesClient::day_by_coordinates`].
    pub async fn month(
        &self,
        target: &LocationTarget,
        calendar: CalendarSystem,
        year: i32,
        month: u32,
        method: u8,
    ) -> Result<Vec<ScheduleDay>, ClientError> {
        let method = method.to_string();
        let (path, params, context) = match target {
            LocationTarget::Coordinates(c) => {
                let op = match calendar {
                    CalendarSystem::Gregorian => "calendar",
                    CalendarSystem::Hijri => "hijriCalendar",
                };
                (
                    format!("{op}/{year}/{month}"),
                    vec![
                        ("latitude", c.latitude.to_string()),
                        ("longitude", c.longitude.to_string()),
                    ],
                    format!("{op}({year}/{month}, {c})"),
                )
            }
            LocationTarget::City { city, country } => {
                let op = match calendar {
                    CalendarSystem::Gregorian => "calendarByCity",
                    CalendarSystem::Hijri => "hijriCalendarByCity",
                };
                (
                    format!("{op}/{year}/{month}"),
                    vec![("city", city.clone()), ("country", country.clone())],
                    format!("{op}({year}/{month}, city={city}, country={country})"),
                )
            }
        };

        let mut query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        query.push(("method", &method));
        let url = self.build_url(&path, &query)?;

        let days: Vec<TimingsData> = self.request_data(&url, &context).await?;
        days.into_iter()
            .map(TimingsData::into_schedule_day)
            .collect()
    }

    /// Converts a Gregorian date to its Hijri counterpart.
    ///
    /// # Errors
    ///
    /// See [`PrayerTimesClient::day_by_coordinates`].
    pub async fn gregorian_to_hijri(&self, date: NaiveDate) -> Result<HijriDate, ClientError> {
        let formatted = date.format("%d-%m-%Y").to_string();
        let url = self.build_url(&format!("gregorianToHijri/{formatted}"), &[])?;
        let data: ConversionData = self
            .request_data(&url, &format!("gregorianToHijri({formatted})"))
            .await?;
        data.hijri.to_domain()
    }

    fn build_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ClientError> {
        endpoint(&self.base_url, path, query)
    }

    /// Sends a GET request, checks the envelope and deserializes `data`.
    ///
    /// The service reports failures both through the HTTP status and the
    /// envelope `code`; the envelope message is preferred when present.
    async fn request_data<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, ClientError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let value: serde_json::Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(source) if status.is_success() => {
                return Err(ClientError::Deserialize {
                    context: context.to_string(),
                    source,
                })
            }
            Err(_) => return Err(ClientError::ApiError(format!("{context}: HTTP {status}"))),
        };
        Self::check_api_error(&value, context)?;
        if !status.is_success() {
            return Err(ClientError::ApiError(format!("{context}: HTTP {status}")));
        }

        let envelope: ApiResponse<T> =
            serde_json::from_value(value).map_err(|source| ClientError::Deserialize {
                context: context.to_string(),
                source,
            })?;
        Ok(envelope.data)
    }

    /// Checks the top-level `"code"` field and returns an error unless it
    /// is 200.
    fn check_api_error(body: &serde_json::Value, context: &str) -> Result<(), ClientError> {
        if body.get("code").and_then(serde_json::Value::as_u64) == Some(200) {
            return Ok(());
        }
        let msg = body
            .get("data")
            .and_then(serde_json::Value::as_str)
            .or_else(|| body.get("status").and_then(serde_json::Value::as_str))
            .unwrap_or("unknown error");
        Err(ClientError::ApiError(format!("{context}: {msg}")))
    }
}

#[cfg(test)]
#[path = "aladhan_test.rs"]
mod tests;

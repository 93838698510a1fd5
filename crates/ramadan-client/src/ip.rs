//! Coarse location lookup from the caller's public IP address.

use ramadan_core::Coordinates;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::ClientError;
use crate::http::{build_client, decode};

const DEFAULT_URL: &str = "https://ipapi.co/json/";
const DEFAULT_USER_AGENT: &str = "ramadan-hub/0.1";

#[derive(Debug, Deserialize)]
struct IpResponse {
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country_name: Option<String>,
    #[serde(default)]
    error: bool,
    #[serde(default)]
    reason: Option<String>,
}

/// Location reported by the IP lookup service.
#[derive(Debug, Clone, PartialEq)]
pub struct IpLocation {
    pub coordinates: Coordinates,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl IpLocation {
    /// `"City, Country"`, tolerating either half being absent.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.city.as_deref(), self.country.as_deref()) {
            (Some(city), Some(country)) => format!("{city}, {country}"),
            (Some(only), None) | (None, Some(only)) => only.to_string(),
            (None, None) => self.coordinates.to_string(),
        }
    }
}

pub struct IpLocationClient {
    client: Client,
    url: Url,
}

impl IpLocationClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the client cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, ClientError> {
        Self::with_url(timeout_secs, DEFAULT_URL, DEFAULT_USER_AGENT)
    }

    /// The lookup URL is used as-is; the service has no sub-paths.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the client cannot be constructed, or
    /// [`ClientError::InvalidBaseUrl`] if `url` is not a valid URL.
    pub fn with_url(timeout_secs: u64, url: &str, user_agent: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(url).map_err(|e| ClientError::InvalidBaseUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            url: parsed,
        })
    }

    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or a non-2xx status.
    /// - [`ClientError::ApiError`] if the service reports an error.
    /// - [`ClientError::MissingLocation`] if coordinates are absent.
    pub async fn lookup(&self) -> Result<IpLocation, ClientError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        let parsed: IpResponse = decode(&body, "ip lookup")?;

        if parsed.error {
            return Err(ClientError::ApiError(
                parsed.reason.unwrap_or_else(|| "ip lookup failed".to_string()),
            ));
        }
        let (Some(latitude), Some(longitude)) = (parsed.latitude, parsed.longitude) else {
            return Err(ClientError::MissingLocation(
                "ip lookup returned no coordinates".to_string(),
            ));
        };

        Ok(IpLocation {
            coordinates: Coordinates {
                latitude,
                longitude,
            },
            city: parsed.city.filter(|c| !c.is_empty()),
            country: parsed.country_name.filter(|c| !c.is_empty()),
        })
    }
}

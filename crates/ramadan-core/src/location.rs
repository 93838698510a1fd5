use std::fmt;

use serde::{Deserialize, Serialize};

/// Used when every other location strategy has failed.
pub const FALLBACK_COORDINATES: Coordinates = Coordinates {
    latitude: 33.6931,
    longitude: 35.5828,
};
pub const FALLBACK_CITY: &str = "Chouf";
pub const FALLBACK_COUNTRY: &str = "Lebanon";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Where a fetch cycle's location came from. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    Gps,
    Ip,
    Manual,
    Fallback,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LocationSource::Gps => "gps",
            LocationSource::Ip => "ip",
            LocationSource::Manual => "manual",
            LocationSource::Fallback => "fallback",
        };
        f.write_str(s)
    }
}

/// What the schedule fetcher keys its request on.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationTarget {
    Coordinates(Coordinates),
    City { city: String, country: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub target: LocationTarget,
    /// Unknown for manual locations until the schedule response reports it.
    pub coordinates: Option<Coordinates>,
    pub name: String,
    pub source: LocationSource,
}

impl ResolvedLocation {
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            target: LocationTarget::Coordinates(FALLBACK_COORDINATES),
            coordinates: Some(FALLBACK_COORDINATES),
            name: format!("{FALLBACK_CITY}, {FALLBACK_COUNTRY}"),
            source: LocationSource::Fallback,
        }
    }

    #[must_use]
    pub fn manual(city: &str, country: &str) -> Self {
        Self {
            target: LocationTarget::City {
                city: city.to_string(),
                country: country.to_string(),
            },
            coordinates: None,
            name: format!("{city}, {country}"),
            source: LocationSource::Manual,
        }
    }

    #[must_use]
    pub fn at(coordinates: Coordinates, name: String, source: LocationSource) -> Self {
        Self {
            target: LocationTarget::Coordinates(coordinates),
            coordinates: Some(coordinates),
            name,
            source,
        }
    }
}

/// Turns an IANA zone such as `America/New_York` into `"New York"`.
#[must_use]
pub fn city_from_timezone(timezone: &str) -> Option<String> {
    let last = timezone.rsplit('/').next()?.trim();
    if last.is_empty() {
        return None;
    }
    Some(last.replace('_', " "))
}

//! User-owned calculation settings.
//!
//! Fetchers never read these from a global: each refresh receives an owned
//! snapshot, and changes reach running loops only through the settings bus.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::prayer::Prayer;

/// Calculation method used when nothing else is configured (Egyptian
/// General Authority of Survey).
pub const DEFAULT_METHOD_ID: u8 = 5;

pub const SUHOOR_OFFSET_MIN: u32 = 10;
pub const SUHOOR_OFFSET_MAX: u32 = 90;
pub const SUHOOR_OFFSET_STEP: u32 = 5;

/// Named calculation methods offered for selection. Ids are the prayer-time
/// service's `method` parameter.
pub const CALCULATION_METHODS: [CalculationMethod; 7] = [
    CalculationMethod { name: "MWL", id: 3 },
    CalculationMethod { name: "ISNA", id: 2 },
    CalculationMethod { name: "Egypt", id: 5 },
    CalculationMethod { name: "Makkah", id: 4 },
    CalculationMethod { name: "Karachi", id: 1 },
    CalculationMethod { name: "Tehran", id: 7 },
    CalculationMethod { name: "Jafari", id: 0 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationMethod {
    pub name: &'static str,
    pub id: u8,
}

impl CalculationMethod {
    /// Looks up a method by name (case-insensitive) or by numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownMethod`] if neither matches.
    pub fn lookup(value: &str) -> Result<Self, CoreError> {
        let value = value.trim();
        CALCULATION_METHODS
            .into_iter()
            .find(|m| {
                m.name.eq_ignore_ascii_case(value)
                    || value.parse::<u8>().is_ok_and(|id| id == m.id)
            })
            .ok_or_else(|| CoreError::UnknownMethod(value.to_string()))
    }

    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        CALCULATION_METHODS.into_iter().find(|m| m.id == id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    #[default]
    Geo,
    Manual,
}

impl fmt::Display for LocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationMode::Geo => f.write_str("geo"),
            LocationMode::Manual => f.write_str("manual"),
        }
    }
}

impl FromStr for LocationMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "geo" => Ok(LocationMode::Geo),
            "manual" => Ok(LocationMode::Manual),
            other => Err(CoreError::InvalidSetting {
                field: "location_mode".to_string(),
                reason: format!("expected \"geo\" or \"manual\", got \"{other}\""),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationSettings {
    pub location_mode: LocationMode,
    pub city: String,
    pub country: String,
    pub calculation_method: u8,
    pub high_precision: bool,
    pub offsets: BTreeMap<Prayer, i32>,
    pub notifications: bool,
    /// Minutes before Fajr at which the Suhoor reminder fires.
    pub suhoor_offset: u32,
    pub sound_enabled: bool,
}

impl Default for CalculationSettings {
    fn default() -> Self {
        Self {
            location_mode: LocationMode::Geo,
            city: String::new(),
            country: String::new(),
            calculation_method: DEFAULT_METHOD_ID,
            high_precision: true,
            offsets: Prayer::ROTATION.into_iter().map(|p| (p, 0)).collect(),
            notifications: true,
            suhoor_offset: 30,
            sound_enabled: true,
        }
    }
}

impl CalculationSettings {
    /// The manual `(city, country)` pair, when manual mode is selected and
    /// both parts are filled in.
    #[must_use]
    pub fn manual_place(&self) -> Option<(&str, &str)> {
        let city = self.city.trim();
        let country = self.country.trim();
        (self.location_mode == LocationMode::Manual && !city.is_empty() && !country.is_empty())
            .then_some((city, country))
    }

    #[must_use]
    pub fn offset_for(&self, prayer: Prayer) -> i32 {
        self.offsets.get(&prayer).copied().unwrap_or(0)
    }

    /// Checks the ranges a settings form would enforce.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSetting`] for an out-of-range Suhoor
    /// buffer or an offset larger than a day.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(SUHOOR_OFFSET_MIN..=SUHOOR_OFFSET_MAX).contains(&self.suhoor_offset)
            || self.suhoor_offset % SUHOOR_OFFSET_STEP != 0
        {
            return Err(CoreError::InvalidSetting {
                field: "suhoor_offset".to_string(),
                reason: format!(
                    "must be {SUHOOR_OFFSET_MIN}..={SUHOOR_OFFSET_MAX} \
                     in steps of {SUHOOR_OFFSET_STEP}, got {}",
                    self.suhoor_offset
                ),
            });
        }
        if let Some((prayer, offset)) = self.offsets.iter().find(|(_, o)| o.abs() >= 24 * 60) {
            return Err(CoreError::InvalidSetting {
                field: format!("offsets.{}", prayer.api_key().to_ascii_lowercase()),
                reason: format!("offset {offset} exceeds one day"),
            });
        }
        Ok(())
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The eight canonical entries of a day's timetable.
///
/// Variant order is chronological for a typical day, so the derived `Ord`
/// doubles as the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prayer {
    Imsak,
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
    Midnight,
}

impl Prayer {
    pub const ALL: [Prayer; 8] = [
        Prayer::Imsak,
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
        Prayer::Midnight,
    ];

    /// Prayers that take part in the "next prayer" countdown. Sunrise, Imsak
    /// and Midnight are informational only.
    pub const ROTATION: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// The key used by the prayer-time service (`"Fajr"`, `"Maghrib"`, ...).
    #[must_use]
    pub fn api_key(self) -> &'static str {
        match self {
            Prayer::Imsak => "Imsak",
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
            Prayer::Midnight => "Midnight",
        }
    }

    #[must_use]
    pub fn arabic_name(self) -> &'static str {
        match self {
            Prayer::Imsak => "الإمساك",
            Prayer::Fajr => "الفجر",
            Prayer::Sunrise => "الشروق",
            Prayer::Dhuhr => "الظهر",
            Prayer::Asr => "العصر",
            Prayer::Maghrib => "المغرب",
            Prayer::Isha => "العشاء",
            Prayer::Midnight => "منتصف الليل",
        }
    }

    #[must_use]
    pub fn is_rotation(self) -> bool {
        Self::ROTATION.contains(&self)
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_key())
    }
}

impl FromStr for Prayer {
    type Err = CoreError;

    /// Case-insensitive: accepts both the service's `"Fajr"` and the settings
    /// file's `"fajr"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Prayer::ALL
            .into_iter()
            .find(|p| p.api_key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownPrayer(s.to_string()))
    }
}

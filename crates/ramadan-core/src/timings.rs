//! A single day's timetable and clock-string parsing.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::prayer::Prayer;

/// One day's timetable as local "HH:MM" strings.
///
/// All eight keys are required when deserializing; a payload missing any of
/// them is rejected rather than silently defaulted. Extra keys the service
/// sends (`Sunset`, `Firstthird`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailyTimings {
    pub imsak: String,
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
    pub midnight: String,
}

impl DailyTimings {
    #[must_use]
    pub fn get(&self, prayer: Prayer) -> &str {
        match prayer {
            Prayer::Imsak => &self.imsak,
            Prayer::Fajr => &self.fajr,
            Prayer::Sunrise => &self.sunrise,
            Prayer::Dhuhr => &self.dhuhr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Isha => &self.isha,
            Prayer::Midnight => &self.midnight,
        }
    }

    pub fn get_mut(&mut self, prayer: Prayer) -> &mut String {
        match prayer {
            Prayer::Imsak => &mut self.imsak,
            Prayer::Fajr => &mut self.fajr,
            Prayer::Sunrise => &mut self.sunrise,
            Prayer::Dhuhr => &mut self.dhuhr,
            Prayer::Asr => &mut self.asr,
            Prayer::Maghrib => &mut self.maghrib,
            Prayer::Isha => &mut self.isha,
            Prayer::Midnight => &mut self.midnight,
        }
    }

    /// Parses the clock string for `prayer`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidClock`] if the stored string is not a
    /// valid `HH:MM` time.
    pub fn clock(&self, prayer: Prayer) -> Result<NaiveTime, CoreError> {
        parse_clock(self.get(prayer)).ok_or_else(|| CoreError::InvalidClock {
            prayer: prayer.to_string(),
            value: self.get(prayer).to_string(),
        })
    }
}

/// Parses `"HH:MM"`, ignoring anything after the first whitespace.
///
/// Monthly calendar responses append the zone abbreviation (`"04:31 (EET)"`);
/// daily responses do not.
#[must_use]
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    let bare = value.split_whitespace().next()?;
    let (h, m) = bare.split_once(':')?;
    let hour = h.parse::<u32>().ok()?;
    let minute = m.parse::<u32>().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

#[cfg(test)]
pub(crate) fn sample_timings() -> DailyTimings {
    DailyTimings {
        imsak: "04:20".to_string(),
        fajr: "04:30".to_string(),
        sunrise: "05:55".to_string(),
        dhuhr: "12:15".to_string(),
        asr: "15:45".to_string(),
        maghrib: "18:20".to_string(),
        isha: "19:50".to_string(),
        midnight: "23:40".to_string(),
    }
}

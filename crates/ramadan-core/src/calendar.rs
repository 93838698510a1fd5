//! Day and month schedules in the Gregorian and Hijri frames.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::location::Coordinates;
use crate::timings::DailyTimings;

/// Ramadan is the ninth Hijri month.
pub const RAMADAN_MONTH: u32 = 9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarSystem {
    Gregorian,
    #[default]
    Hijri,
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarSystem::Gregorian => f.write_str("gregorian"),
            CalendarSystem::Hijri => f.write_str("hijri"),
        }
    }
}

impl FromStr for CalendarSystem {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gregorian" => Ok(CalendarSystem::Gregorian),
            "hijri" => Ok(CalendarSystem::Hijri),
            other => Err(CoreError::InvalidSetting {
                field: "calendar_mode".to_string(),
                reason: format!("expected \"gregorian\" or \"hijri\", got \"{other}\""),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HijriDate {
    pub day: u32,
    pub month: u32,
    pub month_en: String,
    pub month_ar: String,
    pub year: i32,
}

impl HijriDate {
    #[must_use]
    pub fn is_ramadan(&self) -> bool {
        self.month == RAMADAN_MONTH
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} AH", self.day, self.month_en, self.year)
    }
}

/// A single day's timetable with its place in both calendars.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedule {
    pub timings: DailyTimings,
    pub gregorian: NaiveDate,
    pub hijri: HijriDate,
    /// IANA zone name reported by the service, e.g. `"Asia/Beirut"`.
    pub timezone: String,
    pub coordinates: Option<Coordinates>,
    pub method_id: Option<u8>,
    pub method_name: Option<String>,
}

impl DaySchedule {
    /// The schedule's zone, or `None` if the service sent a name `chrono-tz`
    /// does not know.
    #[must_use]
    pub fn tz(&self) -> Option<Tz> {
        self.timezone.parse::<Tz>().ok()
    }

    /// Wall-clock time at the location for the instant `now`, or system
    /// local time when the zone is unknown.
    #[must_use]
    pub fn local_now(&self, now: DateTime<Utc>) -> NaiveDateTime {
        match self.tz() {
            Some(tz) => now.with_timezone(&tz).naive_local(),
            None => now.with_timezone(&Local).naive_local(),
        }
    }

    /// Converts a wall-clock time at the location to UTC. Ambiguous times
    /// take the earlier instant; times skipped by a DST jump yield `None`.
    #[must_use]
    pub fn to_utc(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self.tz() {
            Some(tz) => earliest(tz.from_local_datetime(&local)),
            None => earliest(Local.from_local_datetime(&local)),
        }
    }
}

fn earliest<T: TimeZone>(result: LocalResult<DateTime<T>>) -> Option<DateTime<Utc>> {
    result.earliest().map(|dt| dt.with_timezone(&Utc))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleDay {
    pub gregorian: NaiveDate,
    pub hijri: HijriDate,
    pub timings: DailyTimings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySchedule {
    pub calendar: CalendarSystem,
    pub month: u32,
    pub year: i32,
    pub days: Vec<ScheduleDay>,
}

impl MonthlySchedule {
    /// Index of the row for `date`, used to highlight "today".
    #[must_use]
    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        self.days.iter().position(|d| d.gregorian == date)
    }
}

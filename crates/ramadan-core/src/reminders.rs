//! Suhoor and Iftar reminder instants.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::CoreError;
use crate::prayer::Prayer;
use crate::settings::CalculationSettings;
use crate::timings::DailyTimings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    /// `suhoor_offset` minutes before Fajr.
    Suhoor,
    /// At Maghrib.
    Iftar,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub kind: ReminderKind,
    pub prayer: Prayer,
    pub fire_at: NaiveDateTime,
}

/// The reminders belonging to `date`'s timetable. Empty when notifications
/// are turned off.
///
/// # Errors
///
/// Returns [`CoreError::InvalidClock`] if Fajr or Maghrib cannot be parsed.
pub fn reminders_for_day(
    timings: &DailyTimings,
    settings: &CalculationSettings,
    date: NaiveDate,
) -> Result<Vec<Reminder>, CoreError> {
    if !settings.notifications {
        return Ok(Vec::new());
    }
    let fajr = date.and_time(timings.clock(Prayer::Fajr)?);
    let maghrib = date.and_time(timings.clock(Prayer::Maghrib)?);
    Ok(vec![
        Reminder {
            kind: ReminderKind::Suhoor,
            prayer: Prayer::Fajr,
            fire_at: fajr - Duration::minutes(i64::from(settings.suhoor_offset)),
        },
        Reminder {
            kind: ReminderKind::Iftar,
            prayer: Prayer::Maghrib,
            fire_at: maghrib,
        },
    ])
}

/// Reminders whose instant falls in `(since, now]`.
///
/// Looks at the timetable placed on both `since`'s and `now`'s dates (and
/// the day after `now`, for a Suhoor buffer that reaches back past
/// midnight), so a tick window spanning midnight is covered.
///
/// # Errors
///
/// Returns [`CoreError::InvalidClock`] if Fajr or Maghrib cannot be parsed.
pub fn due_reminders(
    timings: &DailyTimings,
    settings: &CalculationSettings,
    since: NaiveDateTime,
    now: NaiveDateTime,
) -> Result<Vec<Reminder>, CoreError> {
    if now <= since {
        return Ok(Vec::new());
    }
    let mut dates = vec![since.date(), now.date()];
    if let Some(next) = now.date().succ_opt() {
        dates.push(next);
    }
    dates.dedup();

    let mut due = Vec::new();
    for date in dates {
        for reminder in reminders_for_day(timings, settings, date)? {
            if reminder.fire_at > since && reminder.fire_at <= now && !due.contains(&reminder) {
                due.push(reminder);
            }
        }
    }
    due.sort_by_key(|r| r.fire_at);
    Ok(due)
}

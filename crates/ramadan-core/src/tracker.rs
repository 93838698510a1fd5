//! Next-prayer countdown.
//!
//! Everything here is pure: callers sample the clock once per tick and pass
//! it in as a naive wall-clock time in the schedule's own timezone.

use chrono::{Duration, NaiveDateTime};

use crate::error::CoreError;
use crate::prayer::Prayer;
use crate::timings::DailyTimings;

#[derive(Debug, Clone, PartialEq)]
pub struct NextPrayerState {
    pub prayer: Prayer,
    /// The timetable string for the next prayer, as displayed.
    pub scheduled_time: String,
    pub at: NaiveDateTime,
    /// The most recently passed rotation prayer.
    pub interval_start: Prayer,
    pub interval_start_at: NaiveDateTime,
    pub remaining: Duration,
    /// `remaining` as zero-padded `HH:MM:SS`.
    pub time_remaining: String,
    /// Share of the current interval already elapsed, in `[0, 100]`.
    pub progress_percent: f64,
}

/// Computes the next rotation prayer relative to `now`.
///
/// Prayers are placed on `now`'s date. When none remain today the next one
/// is tomorrow's first prayer (Fajr) and the interval starts at today's last
/// (Isha). When the next one is today's first, the interval starts at
/// yesterday's last.
///
/// # Errors
///
/// Returns [`CoreError::InvalidClock`] if any rotation prayer's time cannot
/// be parsed.
pub fn next_prayer(
    timings: &DailyTimings,
    now: NaiveDateTime,
) -> Result<NextPrayerState, CoreError> {
    let today = now.date();
    let mut slots = Prayer::ROTATION
        .into_iter()
        .map(|p| Ok((p, today.and_time(timings.clock(p)?))))
        .collect::<Result<Vec<_>, CoreError>>()?;
    slots.sort_by_key(|&(_, at)| at);

    let first = slots[0];
    let last = slots[slots.len() - 1];

    let (next, start) = match slots.iter().position(|&(_, at)| at > now) {
        Some(0) => (first, (last.0, last.1 - Duration::days(1))),
        Some(i) => (slots[i], slots[i - 1]),
        None => ((first.0, first.1 + Duration::days(1)), last),
    };

    let remaining = next.1 - now;
    Ok(NextPrayerState {
        prayer: next.0,
        scheduled_time: timings.get(next.0).to_string(),
        at: next.1,
        interval_start: start.0,
        interval_start_at: start.1,
        remaining,
        time_remaining: format_countdown(remaining),
        progress_percent: progress(start.1, next.1, now),
    })
}

/// `(now - start) / (end - start) * 100`, clamped to `[0, 100]`. An empty or
/// inverted interval reports 0.
#[must_use]
pub fn progress(start: NaiveDateTime, end: NaiveDateTime, now: NaiveDateTime) -> f64 {
    let total = (end - start).num_milliseconds();
    if total <= 0 {
        return 0.0;
    }
    let elapsed = (now - start).num_milliseconds();
    #[allow(clippy::cast_precision_loss)]
    let pct = elapsed as f64 / total as f64 * 100.0;
    pct.clamp(0.0, 100.0)
}

/// Formats a duration as `HH:MM:SS`, truncating sub-second remainders.
/// Negative durations format as `00:00:00`.
#[must_use]
pub fn format_countdown(remaining: Duration) -> String {
    let secs = remaining.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::timings::sample_timings;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn thirty_seconds_before_maghrib() {
        let state = next_prayer(&sample_timings(), at(18, 19, 30)).unwrap();
        assert_eq!(state.prayer, Prayer::Maghrib);
        assert_eq!(state.interval_start, Prayer::Asr);
        assert_eq!(state.time_remaining, "00:00:30");
        assert_eq!(state.scheduled_time, "18:20");

        // Asr 15:45 -> Maghrib 18:20 is 155 min; 154.5 min elapsed.
        let expected = 154.5 / 155.0 * 100.0;
        assert!((state.progress_percent - expected).abs() < 1e-9);
    }

    #[test]
    fn after_isha_wraps_to_tomorrows_fajr() {
        let now = at(22, 0, 0);
        let state = next_prayer(&sample_timings(), now).unwrap();
        assert_eq!(state.prayer, Prayer::Fajr);
        assert_eq!(state.interval_start, Prayer::Isha);
        assert_eq!(state.at, at(4, 30, 0) + Duration::days(1));
        assert_eq!(state.interval_start_at, at(19, 50, 0));
        assert_eq!(state.time_remaining, "06:30:00");
    }

    #[test]
    fn before_fajr_starts_interval_at_yesterdays_isha() {
        let now = at(2, 0, 0);
        let state = next_prayer(&sample_timings(), now).unwrap();
        assert_eq!(state.prayer, Prayer::Fajr);
        assert_eq!(state.interval_start, Prayer::Isha);
        assert_eq!(state.interval_start_at, at(19, 50, 0) - Duration::days(1));
        assert_eq!(state.time_remaining, "02:30:00");
        assert!(state.progress_percent > 0.0 && state.progress_percent < 100.0);
    }

    #[test]
    fn exactly_at_prayer_time_moves_on_to_the_following_one() {
        let state = next_prayer(&sample_timings(), at(12, 15, 0)).unwrap();
        assert_eq!(state.prayer, Prayer::Asr);
        assert_eq!(state.interval_start, Prayer::Dhuhr);
        assert!(state.progress_percent.abs() < f64::EPSILON);
    }

    #[test]
    fn exactly_one_rotation_prayer_and_bounded_progress_all_day() {
        let timings = sample_timings();
        for minute in (0..24 * 60).step_by(7) {
            let now = at(minute / 60, minute % 60, 17);
            let state = next_prayer(&timings, now).unwrap();
            assert!(state.prayer.is_rotation());
            assert!(state.at > now, "next must be in the future at {now}");
            assert!(state.interval_start_at <= now);
            assert!((0.0..=100.0).contains(&state.progress_percent));
        }
    }

    #[test]
    fn invalid_clock_is_an_error() {
        let mut timings = sample_timings();
        timings.isha = "late".to_string();
        assert!(next_prayer(&timings, at(10, 0, 0)).is_err());
    }

    #[test]
    fn sunrise_is_never_next() {
        // 05:00 is between Fajr and Sunrise; Sunrise is informational only.
        let state = next_prayer(&sample_timings(), at(5, 0, 0)).unwrap();
        assert_eq!(state.prayer, Prayer::Dhuhr);
        assert_eq!(state.interval_start, Prayer::Fajr);
    }

    #[test]
    fn countdown_formatting() {
        assert_eq!(format_countdown(Duration::seconds(0)), "00:00:00");
        assert_eq!(format_countdown(Duration::seconds(3_725)), "01:02:05");
        assert_eq!(format_countdown(Duration::milliseconds(1_999)), "00:00:01");
        assert_eq!(format_countdown(Duration::seconds(-10)), "00:00:00");
    }

    #[test]
    fn progress_handles_degenerate_intervals() {
        let t = at(12, 0, 0);
        assert!(progress(t, t, t).abs() < f64::EPSILON);
        let later = t + Duration::hours(1);
        assert!((progress(t, later, t + Duration::hours(2)) - 100.0).abs() < f64::EPSILON);
        assert!(progress(t, later, t - Duration::hours(1)).abs() < f64::EPSILON);
    }
}

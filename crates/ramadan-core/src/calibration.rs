//! Per-prayer minute offsets applied on top of the calculated timetable.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::prayer::Prayer;
use crate::timings::{parse_clock, DailyTimings};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Shifts a clock string by `offset_minutes`, wrapping through midnight.
///
/// The result is always zero-padded `"HH:MM"`, and any zone suffix on the
/// input is dropped. Returns `None` if `value` is not a valid clock.
#[must_use]
pub fn shift_clock(value: &str, offset_minutes: i32) -> Option<String> {
    use chrono::Timelike;

    let time = parse_clock(value)?;
    let base = i64::from(time.hour()) * 60 + i64::from(time.minute());
    let shifted = (base + i64::from(offset_minutes)).rem_euclid(MINUTES_PER_DAY);
    Some(format!("{:02}:{:02}", shifted / 60, shifted % 60))
}

/// Applies every non-zero offset in `offsets` to `timings` in place.
///
/// A zero offset leaves the stored string untouched, so an unpadded or
/// suffixed value from the service survives verbatim.
///
/// # Errors
///
/// Returns [`CoreError::InvalidClock`] if a prayer with a non-zero offset
/// holds an unparseable clock. `timings` may be partially calibrated when
/// this happens.
pub fn calibrate(
    timings: &mut DailyTimings,
    offsets: &BTreeMap<Prayer, i32>,
) -> Result<(), CoreError> {
    for (&prayer, &offset) in offsets {
        if offset == 0 {
            continue;
        }
        let slot = timings.get_mut(prayer);
        let shifted = shift_clock(slot, offset).ok_or_else(|| CoreError::InvalidClock {
            prayer: prayer.to_string(),
            value: slot.clone(),
        })?;
        *slot = shifted;
    }
    Ok(())
}

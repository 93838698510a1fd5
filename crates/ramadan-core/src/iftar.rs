//! Two-state Iftar window detection.
//!
//! `Normal -> IftarWindow` on the first tick inside the five minutes after
//! Maghrib, `IftarWindow -> Normal` on the first tick outside. The phase is
//! the only state, so the cycle repeats every day without reset.

use chrono::{Duration, NaiveDateTime};

use crate::error::CoreError;
use crate::prayer::Prayer;
use crate::timings::DailyTimings;

pub const IFTAR_WINDOW_SECS: i64 = 5 * 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IftarPhase {
    #[default]
    Normal,
    IftarWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IftarTransition {
    Started,
    Ended,
}

/// True iff `0 >= (maghrib - now) > -5 min`, with Maghrib on `now`'s date.
///
/// # Errors
///
/// Returns [`CoreError::InvalidClock`] if Maghrib cannot be parsed.
pub fn in_iftar_window(timings: &DailyTimings, now: NaiveDateTime) -> Result<bool, CoreError> {
    let maghrib = now.date().and_time(timings.clock(Prayer::Maghrib)?);
    let diff = maghrib - now;
    Ok(diff <= Duration::zero() && diff > -Duration::seconds(IFTAR_WINDOW_SECS))
}

#[derive(Debug, Default)]
pub struct IftarWatch {
    phase: IftarPhase,
}

impl IftarWatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> IftarPhase {
        self.phase
    }

    /// Re-evaluates the window for this tick and reports an edge, if any.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidClock`] if Maghrib cannot be parsed; the
    /// phase is left unchanged.
    pub fn observe(
        &mut self,
        timings: &DailyTimings,
        now: NaiveDateTime,
    ) -> Result<Option<IftarTransition>, CoreError> {
        let inside = in_iftar_window(timings, now)?;
        let transition = match (self.phase, inside) {
            (IftarPhase::Normal, true) => {
                self.phase = IftarPhase::IftarWindow;
                Some(IftarTransition::Started)
            }
            (IftarPhase::IftarWindow, false) => {
                self.phase = IftarPhase::Normal;
                Some(IftarTransition::Ended)
            }
            _ => None,
        };
        Ok(transition)
    }
}

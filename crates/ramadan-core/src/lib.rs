//! Domain model for the Ramadan prayer-time companion.
//!
//! Nothing in this crate touches the network: timetables come in as values,
//! and every computation takes the current time as a parameter.

pub mod app_config;
pub mod calendar;
pub mod calibration;
pub mod config;
pub mod error;
pub mod ics;
pub mod iftar;
pub mod localize;
pub mod location;
pub mod prayer;
pub mod reminders;
pub mod settings;
pub mod store;
pub mod theme;
pub mod timings;
pub mod tracker;
pub mod weather;

pub use app_config::{AppConfig, Environment};
pub use calendar::{CalendarSystem, DaySchedule, HijriDate, MonthlySchedule, ScheduleDay};
pub use calibration::{calibrate, shift_clock};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError, StoreError};
pub use ics::IcsEvent;
pub use iftar::{IftarPhase, IftarTransition, IftarWatch};
pub use localize::Locale;
pub use location::{Coordinates, LocationSource, LocationTarget, ResolvedLocation};
pub use prayer::Prayer;
pub use reminders::{due_reminders, Reminder, ReminderKind};
pub use settings::{CalculationMethod, CalculationSettings, LocationMode};
pub use store::{SettingsStore, StoredState};
pub use theme::{Palette, TimeOfDay};
pub use timings::DailyTimings;
pub use tracker::{next_prayer, NextPrayerState};
pub use weather::{CurrentConditions, DailyForecast, WeatherReport};

//! English/Arabic presentation helpers.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::prayer::Prayer;
use crate::timings::parse_clock;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => f.write_str("en"),
            Locale::Ar => f.write_str("ar"),
        }
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ar" => Ok(Locale::Ar),
            other => Err(CoreError::InvalidSetting {
                field: "locale".to_string(),
                reason: format!("expected \"en\" or \"ar\", got \"{other}\""),
            }),
        }
    }
}

/// Replaces ASCII digits with Arabic-Indic digits.
#[must_use]
pub fn localize_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// Applies [`localize_digits`] only for Arabic.
#[must_use]
pub fn digits_for(input: &str, locale: Locale) -> String {
    match locale {
        Locale::En => input.to_string(),
        Locale::Ar => localize_digits(input),
    }
}

/// `"16:05"` to `"4:05 PM"` (or `"٤:٠٥ م"`). Input that is not a clock is
/// returned unchanged.
#[must_use]
pub fn format_12h(time24: &str, locale: Locale) -> String {
    use chrono::Timelike;

    let Some(time) = parse_clock(time24) else {
        return time24.to_string();
    };
    let (is_pm, hour12) = time.hour12();
    let clock = format!("{hour12}:{:02}", time.minute());
    match locale {
        Locale::En => format!("{clock} {}", if is_pm { "PM" } else { "AM" }),
        Locale::Ar => format!("{} {}", localize_digits(&clock), if is_pm { "م" } else { "ص" }),
    }
}

#[must_use]
pub fn prayer_name(prayer: Prayer, locale: Locale) -> &'static str {
    match locale {
        Locale::En => prayer.api_key(),
        Locale::Ar => prayer.arabic_name(),
    }
}

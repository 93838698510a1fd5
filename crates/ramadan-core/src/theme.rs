//! Cosmetic theme selection from the clock, the next prayer and the weather.

use std::fmt;

use crate::prayer::Prayer;

/// Coarse time-of-day bucket, re-evaluated once a minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl TimeOfDay {
    #[must_use]
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=7 => TimeOfDay::Dawn,
            8..=16 => TimeOfDay::Day,
            17..=19 => TimeOfDay::Dusk,
            _ => TimeOfDay::Night,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeOfDay::Dawn => "dawn",
            TimeOfDay::Day => "day",
            TimeOfDay::Dusk => "dusk",
            TimeOfDay::Night => "night",
        };
        f.write_str(s)
    }
}

/// Background colour set for the countdown view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub main: &'static str,
    pub glow: [&'static str; 3],
}

const DEFAULT_PALETTE: Palette = Palette {
    main: "#0a0e14",
    glow: [
        "rgba(255, 159, 10, 0.12)",
        "rgba(94, 92, 230, 0.07)",
        "rgba(0, 122, 255, 0.07)",
    ],
};

/// Weather codes above this are cloud, fog, rain, snow or storms.
const CLEAR_SKY_MAX_CODE: u16 = 3;

impl Palette {
    /// Picks the palette for the upcoming prayer, muted under bad weather.
    #[must_use]
    pub fn for_prayer(prayer: Prayer, weather_code: Option<u16>) -> Self {
        let mut palette = match prayer {
            Prayer::Fajr | Prayer::Imsak => Palette {
                main: "#0f172a",
                glow: [
                    "rgba(94, 92, 230, 0.15)",
                    "rgba(212, 175, 55, 0.05)",
                    "rgba(0, 122, 255, 0.1)",
                ],
            },
            Prayer::Dhuhr | Prayer::Asr => Palette {
                main: "#0c0c0c",
                glow: [
                    "rgba(0, 122, 255, 0.1)",
                    "rgba(255, 255, 255, 0.05)",
                    "rgba(94, 92, 230, 0.05)",
                ],
            },
            Prayer::Maghrib => Palette {
                main: "#1a0f0f",
                glow: [
                    "rgba(245, 158, 11, 0.15)",
                    "rgba(220, 38, 38, 0.05)",
                    "rgba(94, 92, 230, 0.08)",
                ],
            },
            Prayer::Isha => Palette {
                main: "#050505",
                glow: [
                    "rgba(94, 92, 230, 0.1)",
                    "rgba(0, 0, 0, 0)",
                    "rgba(0, 122, 255, 0.05)",
                ],
            },
            Prayer::Sunrise | Prayer::Midnight => DEFAULT_PALETTE,
        };

        if weather_code.is_some_and(|c| c > CLEAR_SKY_MAX_CODE) {
            palette.main = "#111827";
            palette.glow[0] = mute(palette.glow[0]);
        }
        palette
    }
}

fn mute(glow: &'static str) -> &'static str {
    match glow {
        "rgba(94, 92, 230, 0.15)" => "rgba(94, 92, 230, 0.05)",
        "rgba(245, 158, 11, 0.15)" => "rgba(245, 158, 11, 0.05)",
        "rgba(0, 122, 255, 0.1)" => "rgba(0, 122, 255, 0.03)",
        "rgba(94, 92, 230, 0.1)" => "rgba(94, 92, 230, 0.03)",
        other => other,
    }
}

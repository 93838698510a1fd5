use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::localize::Locale;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub apparent_temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Wind speed in km/h.
    pub wind_speed: f64,
    /// WMO weather interpretation code.
    pub weather_code: u16,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: Option<NaiveDate>,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub weather_code: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecast>,
}

/// Human label for a WMO code. Unknown codes read as clear sky.
#[must_use]
pub fn condition_label(code: u16, locale: Locale) -> &'static str {
    let (en, ar) = match code {
        1 => ("Mainly Clear", "صافٍ غالباً"),
        2 => ("Partly Cloudy", "غائم جزئياً"),
        3 => ("Overcast", "غائم"),
        45 => ("Fog", "ضباب"),
        48 => ("Depositing Rime Fog", "ضباب جليدي"),
        51 => ("Light Drizzle", "رذاذ خفيف"),
        53 => ("Moderate Drizzle", "رذاذ متوسط"),
        55 => ("Dense Drizzle", "رذاذ كثيف"),
        61 => ("Slight Rain", "مطر خفيف"),
        63 => ("Moderate Rain", "مطر متوسط"),
        65 => ("Heavy Rain", "مطر غزير"),
        71 => ("Slight Snow", "ثلج خفيف"),
        77 => ("Snow Grains", "حبيبات ثلجية"),
        80 => ("Slight Rain Showers", "زخات مطر خفيفة"),
        95 => ("Thunderstorm", "عاصفة رعدية"),
        _ => ("Clear Sky", "سماء صافية"),
    };
    match locale {
        Locale::En => en,
        Locale::Ar => ar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_labels() {
        assert_eq!(condition_label(3, Locale::En), "Overcast");
        assert_eq!(condition_label(95, Locale::Ar), "عاصفة رعدية");
    }

    #[test]
    fn unknown_code_reads_as_clear() {
        assert_eq!(condition_label(99, Locale::En), "Clear Sky");
        assert_eq!(condition_label(0, Locale::En), "Clear Sky");
    }
}

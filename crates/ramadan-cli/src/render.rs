//! Plain-text rendering for terminal output.

use ramadan_core::localize::{digits_for, format_12h, prayer_name};
use ramadan_core::weather::condition_label;
use ramadan_core::{
    CalculationSettings, DaySchedule, Locale, MonthlySchedule, NextPrayerState, Prayer,
    ResolvedLocation, WeatherReport,
};

pub(crate) fn location_line(location: &ResolvedLocation) -> String {
    match location.coordinates {
        Some(c) => format!("{} ({c}) [{}]", location.name, location.source),
        None => format!("{} [{}]", location.name, location.source),
    }
}

pub(crate) fn day_header(day: &DaySchedule, locale: Locale) -> String {
    let gregorian = day.gregorian.format("%A %-d %B %Y").to_string();
    let hijri = match locale {
        Locale::En => day.hijri.to_string(),
        Locale::Ar => digits_for(
            &format!("{} {} {}", day.hijri.day, day.hijri.month_ar, day.hijri.year),
            locale,
        ),
    };
    format!("{gregorian} | {hijri}")
}

/// All eight timetable entries, one per line, in display order.
pub(crate) fn timings_table(day: &DaySchedule, locale: Locale) -> String {
    Prayer::ALL
        .iter()
        .map(|&p| {
            format!(
                "  {:<10}{:>9}",
                prayer_name(p, locale),
                format_12h(day.timings.get(p), locale)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn method_line(day: &DaySchedule) -> Option<String> {
    day.method_name
        .as_ref()
        .map(|name| format!("Method: {name}"))
}

/// `"Next: Maghrib at 6:20 PM, in 01:02:03 (42%)"`.
pub(crate) fn next_prayer_line(state: &NextPrayerState, locale: Locale) -> String {
    let name = prayer_name(state.prayer, locale);
    let at = format_12h(&state.scheduled_time, locale);
    let remaining = digits_for(&state.time_remaining, locale);
    let pct = digits_for(&format!("{:.0}%", state.progress_percent), locale);
    match locale {
        Locale::En => format!("Next: {name} at {at}, in {remaining} ({pct})"),
        Locale::Ar => format!("الصلاة القادمة: {name} {at}، بعد {remaining} ({pct})"),
    }
}

pub(crate) fn iftar_notice(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Iftar time. Taqabbal Allah.",
        Locale::Ar => "حان وقت الإفطار. تقبل الله.",
    }
}

pub(crate) fn weather_block(report: &WeatherReport, locale: Locale) -> String {
    let c = &report.current;
    let mut lines = vec![format!(
        "{}, {:.0}°C (feels {:.0}°C), humidity {:.0}%, wind {:.0} km/h",
        condition_label(c.weather_code, locale),
        c.temperature,
        c.apparent_temperature,
        c.humidity,
        c.wind_speed
    )];
    for day in &report.daily {
        let date = day
            .date
            .map_or_else(|| "\u{2014}".to_string(), |d| d.format("%a %d %b").to_string());
        lines.push(format!(
            "  {date:<12}{:>4.0}° /{:>4.0}°  {}",
            day.temperature_max,
            day.temperature_min,
            condition_label(day.weather_code, locale)
        ));
    }
    lines.join("\n")
}

/// Month table; the row at `highlight` is marked with `>`.
pub(crate) fn month_table(
    schedule: &MonthlySchedule,
    highlight: Option<usize>,
    locale: Locale,
) -> String {
    let columns = [
        Prayer::Imsak,
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];
    let mut header = format!("  {:<7}{:<12}", "HIJRI", "DATE");
    for p in columns {
        header.push_str(&format!("{:<9}", prayer_name(p, locale).to_uppercase()));
    }
    let mut lines = vec![header.trim_end().to_string()];

    for (i, day) in schedule.days.iter().enumerate() {
        let marker = if highlight == Some(i) { '>' } else { ' ' };
        let mut row = format!(
            "{marker} {:<7}{:<12}",
            day.hijri.day,
            day.gregorian.format("%d-%m-%Y")
        );
        for p in columns {
            let clock = day.timings.get(p).split_whitespace().next().unwrap_or("");
            row.push_str(&format!("{clock:<9}"));
        }
        lines.push(digits_for(row.trim_end(), locale));
    }
    lines.join("\n")
}

pub(crate) fn settings_block(settings: &CalculationSettings) -> String {
    let method = ramadan_core::CalculationMethod::from_id(settings.calculation_method)
        .map_or_else(
            || settings.calculation_method.to_string(),
            |m| format!("{} ({})", m.name, m.id),
        );
    let offsets = settings
        .offsets
        .iter()
        .map(|(p, m)| format!("{p}={m:+}"))
        .collect::<Vec<_>>()
        .join(" ");
    let place = if settings.city.is_empty() && settings.country.is_empty() {
        "\u{2014}".to_string()
    } else {
        format!("{}, {}", settings.city, settings.country)
    };
    [
        format!("location mode   {}", settings.location_mode),
        format!("place           {place}"),
        format!("method          {method}"),
        format!("high precision  {}", settings.high_precision),
        format!("offsets         {offsets}"),
        format!("notifications   {}", settings.notifications),
        format!("suhoor offset   {} min", settings.suhoor_offset),
        format!("sound           {}", settings.sound_enabled),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use ramadan_core::{
        CalendarSystem, Coordinates, DailyTimings, HijriDate, LocationSource, ScheduleDay,
    };

    use super::*;

    fn timings() -> DailyTimings {
        DailyTimings {
            imsak: "04:20".to_string(),
            fajr: "04:30".to_string(),
            sunrise: "05:55".to_string(),
            dhuhr: "12:15".to_string(),
            asr: "15:45".to_string(),
            maghrib: "18:20 (EET)".to_string(),
            isha: "19:50".to_string(),
            midnight: "23:40".to_string(),
        }
    }

    fn hijri(day: u32) -> HijriDate {
        HijriDate {
            day,
            month: 9,
            month_en: "Ramaḍān".to_string(),
            month_ar: "رَمَضان".to_string(),
            year: 1447,
        }
    }

    #[test]
    fn location_line_includes_source_tag() {
        let loc = ResolvedLocation::at(
            Coordinates {
                latitude: 33.9,
                longitude: 35.5,
            },
            "Beirut".to_string(),
            LocationSource::Gps,
        );
        assert_eq!(location_line(&loc), "Beirut (33.9000, 35.5000) [gps]");
        let manual = ResolvedLocation::manual("Cairo", "Egypt");
        assert_eq!(location_line(&manual), "Cairo, Egypt [manual]");
    }

    #[test]
    fn next_prayer_line_in_both_locales() {
        let at = NaiveDate::from_ymd_opt(2026, 2, 20)
            .unwrap()
            .and_hms_opt(18, 20, 0)
            .unwrap();
        let state = NextPrayerState {
            prayer: Prayer::Maghrib,
            scheduled_time: "18:20".to_string(),
            at,
            interval_start: Prayer::Asr,
            interval_start_at: at - Duration::minutes(155),
            remaining: Duration::seconds(3723),
            time_remaining: "01:02:03".to_string(),
            progress_percent: 42.4,
        };
        assert_eq!(
            next_prayer_line(&state, Locale::En),
            "Next: Maghrib at 6:20 PM, in 01:02:03 (42%)"
        );
        let ar = next_prayer_line(&state, Locale::Ar);
        assert!(ar.contains("٠١:٠٢:٠٣"), "{ar}");
        assert!(ar.contains("المغرب"), "{ar}");
    }

    #[test]
    fn month_table_marks_today_and_strips_zone_suffix() {
        let first = NaiveDate::from_ymd_opt(2026, 2, 18).unwrap();
        let schedule = MonthlySchedule {
            calendar: CalendarSystem::Hijri,
            month: 9,
            year: 1447,
            days: (0..2)
                .map(|i| ScheduleDay {
                    gregorian: first + Duration::days(i),
                    hijri: hijri(u32::try_from(i).unwrap() + 1),
                    timings: timings(),
                })
                .collect(),
        };
        let table = month_table(&schedule, Some(1), Locale::En);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("> 2"), "{table}");
        assert!(lines[1].starts_with("  1"), "{table}");
        assert!(!table.contains("EET"));
        assert!(lines[2].contains("18:20"));
    }

    #[test]
    fn iftar_notice_follows_locale() {
        assert_eq!(iftar_notice(Locale::En), "Iftar time. Taqabbal Allah.");
        assert_eq!(iftar_notice(Locale::Ar), "حان وقت الإفطار. تقبل الله.");
    }

    #[test]
    fn settings_block_names_the_method() {
        let block = settings_block(&CalculationSettings::default());
        assert!(block.contains("Egypt (5)"), "{block}");
        assert!(block.contains("suhoor offset   30 min"), "{block}");
    }
}

//! Single-event iCalendar export.

use chrono::{DateTime, Utc};
use uuid::Uuid;

const PRODID: &str = "-//Ramadan Hub//EN";
const UID_DOMAIN: &str = "ramadanhub.app";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcsEvent {
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl IcsEvent {
    /// Renders with a fresh UID and the current time as `DTSTAMP`.
    #[must_use]
    pub fn to_ics(&self) -> String {
        render_ics(self, Utc::now(), Uuid::new_v4())
    }
}

/// Renders a `VCALENDAR` holding exactly one `VEVENT`, with CRLF line endings.
#[must_use]
pub fn render_ics(event: &IcsEvent, stamp: DateTime<Utc>, uid: Uuid) -> String {
    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{uid}@{UID_DOMAIN}"),
        format!("DTSTAMP:{}", ics_timestamp(stamp)),
        format!("DTSTART:{}", ics_timestamp(event.start)),
        format!("DTEND:{}", ics_timestamp(event.end)),
        format!("SUMMARY:{}", escape_text(&event.title)),
        format!("DESCRIPTION:{}", escape_text(&event.description)),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];
    let mut out = lines.join("\r\n");
    out.push_str("\r\n");
    out
}

fn ics_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

/// RFC 5545 TEXT escaping.
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn event() -> IcsEvent {
        IcsEvent {
            title: "Maghrib - Ramadan Hub".to_string(),
            description: "Iftar in Chouf, Lebanon".to_string(),
            start: Utc.with_ymd_and_hms(2026, 2, 20, 16, 20, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2026, 2, 20, 16, 50, 0).unwrap(),
        }
    }

    #[test]
    fn renders_a_complete_vevent() {
        let stamp = Utc.with_ymd_and_hms(2026, 2, 20, 9, 0, 5).unwrap();
        let ics = render_ics(&event(), stamp, Uuid::nil());
        let lines: Vec<&str> = ics.split("\r\n").collect();

        assert_eq!(lines[0], "BEGIN:VCALENDAR");
        assert_eq!(lines[2], "PRODID:-//Ramadan Hub//EN");
        assert_eq!(lines[4], "UID:00000000-0000-0000-0000-000000000000@ramadanhub.app");
        assert_eq!(lines[5], "DTSTAMP:20260220T090005Z");
        assert_eq!(lines[6], "DTSTART:20260220T162000Z");
        assert_eq!(lines[7], "DTEND:20260220T165000Z");
        assert_eq!(lines[8], "SUMMARY:Maghrib - Ramadan Hub");
        assert_eq!(lines[9], "DESCRIPTION:Iftar in Chouf\\, Lebanon");
        assert_eq!(lines[11], "END:VCALENDAR");
        assert!(ics.ends_with("\r\n"));
    }

    #[test]
    fn escapes_special_characters() {
        assert_eq!(escape_text("a;b\\c\nd"), "a\\;b\\\\c\\nd");
    }

    #[test]
    fn fresh_uids_differ() {
        let e = event();
        assert_ne!(e.to_ics(), e.to_ics());
    }
}

#![allow(dead_code)]

use serde_json::{json, Value};

pub fn timings_json() -> Value {
    json!({
        "Fajr": "04:30 (EET)",
        "Sunrise": "05:55 (EET)",
        "Dhuhr": "12:15 (EET)",
        "Asr": "15:45 (EET)",
        "Sunset": "18:18 (EET)",
        "Maghrib": "18:20 (EET)",
        "Isha": "19:50 (EET)",
        "Imsak": "04:20 (EET)",
        "Midnight": "23:40 (EET)"
    })
}

pub fn day_json(gregorian: &str, hijri_day: &str) -> Value {
    day_json_in(gregorian, hijri_day, "Asia/Beirut")
}

pub fn day_json_in(gregorian: &str, hijri_day: &str, timezone: &str) -> Value {
    json!({
        "timings": timings_json(),
        "date": {
            "readable": "01 Mar 2025",
            "gregorian": { "date": gregorian },
            "hijri": {
                "date": format!("{hijri_day}-09-1446"),
                "day": hijri_day,
                "month": { "number": 9, "en": "Ramaḍān", "ar": "رَمَضان" },
                "year": "1446"
            }
        },
        "meta": {
            "latitude": 33.8938,
            "longitude": 35.5018,
            "timezone": timezone,
            "method": { "id": 5, "name": "Egyptian General Authority of Survey" }
        }
    })
}

pub fn envelope(data: Value) -> Value {
    json!({ "code": 200, "status": "OK", "data": data })
}

pub fn forecast_json() -> Value {
    json!({
        "current": {
            "time": "2025-03-01T18:00",
            "temperature_2m": 14.2,
            "apparent_temperature": 12.9,
            "relative_humidity_2m": 71,
            "windspeed_10m": 9.4,
            "weathercode": 3
        },
        "daily": {
            "time": ["2025-03-01", "2025-03-02"],
            "temperature_2m_max": [17.0, 18.5],
            "temperature_2m_min": [9.0, 10.2],
            "weathercode": [3, 61]
        }
    })
}

//! Integration tests for `PrayerTimesClient` and `ScheduleFetcher` using
//! wiremock HTTP mocks.

mod support;

use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};
use ramadan_client::{ClientError, PrayerTimesClient, ScheduleFetcher};
use ramadan_core::{CalculationSettings, CalendarSystem, Coordinates, LocationTarget, Prayer};
use serde_json::json;
use support::{day_json, day_json_in, envelope};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PrayerTimesClient {
    PrayerTimesClient::with_base_url(30, &format!("{base_url}/v1"), "test-agent")
        .expect("client construction should not fail")
}

const BEIRUT: Coordinates = Coordinates {
    latitude: 33.8938,
    longitude: 35.5018,
};

#[tokio::test]
async fn day_by_coordinates_returns_parsed_schedule() {
    let server = MockServer::start().await;
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();

    Mock::given(method("GET"))
        .and(path(format!("/v1/timings/{}", at.timestamp())))
        .and(query_param("latitude", "33.8938"))
        .and(query_param("longitude", "35.5018"))
        .and(query_param("method", "5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(day_json("01-03-2025", "01"))),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let day = client
        .day_by_coordinates(BEIRUT, 5, at)
        .await
        .expect("should parse day");

    assert_eq!(day.gregorian, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    assert_eq!(day.timezone, "Asia/Beirut");
    assert_eq!(day.timings.fajr, "04:30 (EET)");
    assert!(day.hijri.is_ramadan());
    assert_eq!(day.method_id, Some(5));
}

#[tokio::test]
async fn day_by_city_keys_on_formatted_date() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/timingsByCity/01-03-2025"))
        .and(query_param("city", "Beirut"))
        .and(query_param("country", "Lebanon"))
        .and(query_param("method", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(day_json("01-03-2025", "01"))),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let day = client
        .day_by_city("Beirut", "Lebanon", 3, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
        .await
        .expect("should parse day");

    assert_eq!(day.coordinates, Some(BEIRUT));
}

#[tokio::test]
async fn api_error_envelope_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/timingsByCity/01-03-2025"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 400,
            "status": "BAD_REQUEST",
            "data": "Unable to find city."
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .day_by_city("Atlantis", "Nowhere", 5, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
        .await
        .unwrap_err();

    assert!(
        matches!(err, ClientError::ApiError(ref m) if m.contains("Unable to find city.")),
        "expected ApiError, got {err:?}"
    );
}

#[tokio::test]
async fn server_error_without_json_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .gregorian_to_hijri(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::ApiError(ref m) if m.contains("502")), "{err:?}");
}

#[tokio::test]
async fn missing_prayer_key_is_deserialize_error() {
    let server = MockServer::start().await;
    let mut day = day_json("01-03-2025", "01");
    day["timings"].as_object_mut().unwrap().remove("Asr");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(day)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .day_by_coordinates(BEIRUT, 5, Utc::now())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Deserialize { .. }), "{err:?}");
}

#[tokio::test]
async fn hijri_month_by_city_uses_hijri_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/hijriCalendarByCity/1446/9"))
        .and(query_param("city", "Cairo"))
        .and(query_param("country", "Egypt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            day_json("01-03-2025", "01"),
            day_json("02-03-2025", "02"),
        ]))))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let target = LocationTarget::City {
        city: "Cairo".to_string(),
        country: "Egypt".to_string(),
    };
    let days = client
        .month(&target, CalendarSystem::Hijri, 1446, 9, 5)
        .await
        .expect("should parse month");

    assert_eq!(days.len(), 2);
    assert_eq!(days[1].hijri.day, 2);
    assert_eq!(days[1].gregorian, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
}

#[tokio::test]
async fn gregorian_month_by_coordinates_uses_calendar_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/calendar/2025/3"))
        .and(query_param("latitude", "33.8938"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!([day_json("01-03-2025", "01")]))),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let days = client
        .month(
            &LocationTarget::Coordinates(BEIRUT),
            CalendarSystem::Gregorian,
            2025,
            3,
            5,
        )
        .await
        .expect("should parse month");

    assert_eq!(days.len(), 1);
}

#[tokio::test]
async fn gregorian_to_hijri_returns_hijri_date() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/gregorianToHijri/19-10-2026"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "hijri": {
                "date": "08-05-1448",
                "day": "08",
                "month": { "number": 5, "en": "Jumādá al-ūlá", "ar": "جُمادى الأولى" },
                "year": "1448"
            },
            "gregorian": { "date": "19-10-2026" }
        }))))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let hijri = client
        .gregorian_to_hijri(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
        .await
        .expect("should convert");

    assert_eq!(hijri.day, 8);
    assert_eq!(hijri.month, 5);
    assert_eq!(hijri.year, 1448);
    assert!(!hijri.is_ramadan());
}

#[tokio::test]
async fn fetcher_applies_offsets_and_leaves_zero_offsets_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(day_json("01-03-2025", "01"))),
        )
        .mount(&server)
        .await;

    let fetcher = ScheduleFetcher::new(test_client(&server.uri()), 10);
    let mut settings = CalculationSettings::default();
    settings.offsets.insert(Prayer::Maghrib, 2);
    settings.offsets.insert(Prayer::Fajr, -35);

    let day = fetcher
        .fetch_day(&LocationTarget::Coordinates(BEIRUT), &settings, Utc::now())
        .await
        .expect("should fetch");

    assert_eq!(day.timings.maghrib, "18:22");
    assert_eq!(day.timings.fajr, "03:55");
    assert_eq!(day.timings.isha, "19:50 (EET)");
}

#[tokio::test]
async fn city_day_follows_the_city_calendar_date() {
    let server = MockServer::start().await;
    // 16:00 UTC on the 20th is already 01:00 on the 21st in Tokyo.
    let now = Utc.with_ymd_and_hms(2026, 2, 20, 16, 0, 0).unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/timingsByCity/20-02-2026"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(day_json_in("20-02-2026", "02", "Asia/Tokyo"))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/timingsByCity/21-02-2026"))
        .and(query_param("city", "Tokyo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(day_json_in("21-02-2026", "03", "Asia/Tokyo"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ScheduleFetcher::new(test_client(&server.uri()), 10);
    let day = fetcher
        .fetch_day(
            &LocationTarget::City {
                city: "Tokyo".to_string(),
                country: "Japan".to_string(),
            },
            &CalculationSettings::default(),
            now,
        )
        .await
        .expect("should fetch");

    assert_eq!(day.gregorian, NaiveDate::from_ymd_opt(2026, 2, 21).unwrap());
    assert_eq!(day.local_now(now).date(), day.gregorian);
}

#[tokio::test]
async fn fetcher_times_out_slow_responses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(day_json("01-03-2025", "01")))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let fetcher = ScheduleFetcher::new(test_client(&server.uri()), 1);
    let err = fetcher
        .fetch_day(
            &LocationTarget::Coordinates(BEIRUT),
            &CalculationSettings::default(),
            Utc::now(),
        )
        .await
        .unwrap_err();

    assert!(
        matches!(err, ClientError::Timeout { secs: 1, .. }),
        "expected Timeout, got {err:?}"
    );
}

#[tokio::test]
async fn fetcher_calibrates_every_day_of_a_month() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/hijriCalendar/1446/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            day_json("01-03-2025", "01"),
            day_json("02-03-2025", "02"),
        ]))))
        .mount(&server)
        .await;

    let fetcher = ScheduleFetcher::new(test_client(&server.uri()), 10);
    let mut settings = CalculationSettings::default();
    settings.offsets.insert(Prayer::Isha, 15);

    let month = fetcher
        .fetch_month(
            &LocationTarget::Coordinates(BEIRUT),
            &settings,
            CalendarSystem::Hijri,
            9,
            1446,
        )
        .await
        .expect("should fetch month");

    assert_eq!(month.days.len(), 2);
    assert!(month.days.iter().all(|d| d.timings.isha == "20:05"));
    assert_eq!(month.calendar, CalendarSystem::Hijri);
}

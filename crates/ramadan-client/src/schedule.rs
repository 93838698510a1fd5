//! Calibrated day and month schedules for a resolved location.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, Utc};
use ramadan_core::{
    calibrate, CalculationSettings, CalendarSystem, DaySchedule, HijriDate, LocationTarget,
    MonthlySchedule,
};

use crate::aladhan::PrayerTimesClient;
use crate::error::ClientError;

pub struct ScheduleFetcher {
    client: PrayerTimesClient,
    timeout: Duration,
}

impl ScheduleFetcher {
    pub fn new(client: PrayerTimesClient, timeout_secs: u64) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Fetches today's timetable and applies the configured offsets.
    ///
    /// Coordinates are keyed on the instant `now`. Cities are keyed on a
    /// calendar date: the system date first, then, if the returned zone puts
    /// `now` on a different day, that day is fetched instead.
    ///
    /// # Errors
    ///
    /// Any transport, API or parse failure, [`ClientError::Timeout`] when the
    /// deadline elapses, and [`ClientError::Calibration`] when a timetable
    /// entry cannot be shifted.
    pub async fn fetch_day(
        &self,
        target: &LocationTarget,
        settings: &CalculationSettings,
        now: DateTime<Utc>,
    ) -> Result<DaySchedule, ClientError> {
        let method = settings.calculation_method;
        let mut day = match target {
            LocationTarget::Coordinates(coordinates) => {
                self.bounded(
                    "day schedule",
                    self.client.day_by_coordinates(*coordinates, method, now),
                )
                .await?
            }
            LocationTarget::City { city, country } => {
                let date = now.with_timezone(&Local).date_naive();
                let day = self.city_day(city, country, method, date).await?;
                match day.tz().map(|tz| now.with_timezone(&tz).date_naive()) {
                    Some(there) if there != date => {
                        tracing::debug!(
                            %city,
                            timezone = %day.timezone,
                            requested = %date,
                            local = %there,
                            "city date differs from system date, refetching"
                        );
                        self.city_day(city, country, method, there).await?
                    }
                    _ => day,
                }
            }
        };
        calibrate(&mut day.timings, &settings.offsets)?;
        Ok(day)
    }

    /// Fetches a calibrated month in the requested calendar frame.
    ///
    /// # Errors
    ///
    /// See [`ScheduleFetcher::fetch_day`].
    pub async fn fetch_month(
        &self,
        target: &LocationTarget,
        settings: &CalculationSettings,
        calendar: CalendarSystem,
        month: u32,
        year: i32,
    ) -> Result<MonthlySchedule, ClientError> {
        let mut days = self
            .bounded(
                "monthly schedule",
                self.client
                    .month(target, calendar, year, month, settings.calculation_method),
            )
            .await?;
        for day in &mut days {
            calibrate(&mut day.timings, &settings.offsets)?;
        }
        Ok(MonthlySchedule {
            calendar,
            month,
            year,
            days,
        })
    }

    /// # Errors
    ///
    /// See [`ScheduleFetcher::fetch_day`].
    pub async fn hijri_date(&self, date: NaiveDate) -> Result<HijriDate, ClientError> {
        self.bounded("hijri conversion", self.client.gregorian_to_hijri(date))
            .await
    }

    async fn city_day(
        &self,
        city: &str,
        country: &str,
        method: u8,
        date: NaiveDate,
    ) -> Result<DaySchedule, ClientError> {
        self.bounded(
            "day schedule",
            self.client.day_by_city(city, country, method, date),
        )
        .await
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = Result<T, ClientError>>,
    ) -> Result<T, ClientError> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| ClientError::Timeout {
                operation: operation.to_string(),
                secs: self.timeout.as_secs(),
            })?
    }
}

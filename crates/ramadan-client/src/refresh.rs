//! One refresh cycle: resolve the location, fetch the day, fetch the weather.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use ramadan_core::location::city_from_timezone;
use ramadan_core::{
    CalculationSettings, CalendarSystem, Coordinates, DaySchedule, LocationSource,
    MonthlySchedule, ResolvedLocation, WeatherReport,
};

use crate::error::ClientError;
use crate::position::PositionSource;
use crate::resolver::LocationResolver;
use crate::schedule::ScheduleFetcher;
use crate::weather::WeatherClient;

/// Everything one refresh produces.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub location: ResolvedLocation,
    pub day: DaySchedule,
    /// Absent when the forecast could not be fetched.
    pub weather: Option<WeatherReport>,
}

pub struct RefreshCycle<P> {
    resolver: LocationResolver<P>,
    schedule: ScheduleFetcher,
    weather: WeatherClient,
    weather_timeout: Duration,
}

impl<P: PositionSource> RefreshCycle<P> {
    pub fn new(
        resolver: LocationResolver<P>,
        schedule: ScheduleFetcher,
        weather: WeatherClient,
        weather_timeout_secs: u64,
    ) -> Self {
        Self {
            resolver,
            schedule,
            weather,
            weather_timeout: Duration::from_secs(weather_timeout_secs),
        }
    }

    pub fn schedule(&self) -> &ScheduleFetcher {
        &self.schedule
    }

    pub async fn resolve(&self, settings: &CalculationSettings) -> ResolvedLocation {
        self.resolver.resolve(settings).await
    }

    /// Runs a full cycle against `settings`.
    ///
    /// # Errors
    ///
    /// Returns the schedule fetch error. Location and weather failures are
    /// absorbed.
    pub async fn run(&self, settings: &CalculationSettings) -> Result<Snapshot, ClientError> {
        let mut location = self.resolver.resolve(settings).await;
        tracing::info!(source = %location.source, name = %location.name, "location resolved");

        let day = self
            .schedule
            .fetch_day(&location.target, settings, Utc::now())
            .await?;
        enrich_location(&mut location, &day);

        let weather = match location.coordinates {
            Some(coordinates) => self.weather(coordinates).await,
            None => None,
        };

        Ok(Snapshot {
            location,
            day,
            weather,
        })
    }

    /// Resolves the location and fetches a calibrated month.
    ///
    /// # Errors
    ///
    /// Returns the schedule fetch error.
    pub async fn run_month(
        &self,
        settings: &CalculationSettings,
        calendar: CalendarSystem,
        month: u32,
        year: i32,
    ) -> Result<(ResolvedLocation, MonthlySchedule), ClientError> {
        let location = self.resolver.resolve(settings).await;
        let schedule = self
            .schedule
            .fetch_month(&location.target, settings, calendar, month, year)
            .await?;
        Ok((location, schedule))
    }

    /// Forecast at `coordinates`, or `None` after logging the failure.
    pub async fn weather(&self, coordinates: Coordinates) -> Option<WeatherReport> {
        match tokio::time::timeout(self.weather_timeout, self.weather.forecast(coordinates)).await
        {
            Ok(Ok(report)) => Some(report),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "weather fetch failed");
                None
            }
            Err(_) => {
                tracing::warn!(
                    secs = self.weather_timeout.as_secs(),
                    "weather fetch timed out"
                );
                None
            }
        }
    }
}

/// Fills in what the schedule response knows about the place: coordinates
/// for manual locations, and a city name for device fixes.
fn enrich_location(location: &mut ResolvedLocation, day: &DaySchedule) {
    if location.coordinates.is_none() {
        location.coordinates = day.coordinates;
    }
    if location.source == LocationSource::Gps {
        if let Some(city) = city_from_timezone(&day.timezone) {
            location.name = city;
        }
    }
}

/// Orders concurrent refreshes: only the most recently started one may be
/// applied.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    latest: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new fetch, superseding every earlier ticket.
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

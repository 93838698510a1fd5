//! Wiring from environment configuration to the service clients.

use anyhow::Context as _;
use ramadan_client::{
    DevicePosition, DirectoryClient, IpLocationClient, LocationResolver, PrayerTimesClient,
    RefreshCycle, ScheduleFetcher, WeatherClient,
};
use ramadan_core::{AppConfig, CalculationSettings, SettingsStore};

pub(crate) struct AppContext {
    pub config: AppConfig,
    pub store: SettingsStore,
}

impl AppContext {
    pub(crate) fn new(config: AppConfig) -> Self {
        let store = SettingsStore::new(config.settings_path.clone());
        Self { config, store }
    }

    /// Current persisted settings. Invalid values are reported but do not
    /// stop the command.
    pub(crate) fn settings(&self) -> anyhow::Result<CalculationSettings> {
        let settings = self
            .store
            .load_settings()
            .with_context(|| format!("reading {}", self.store.path().display()))?;
        if let Err(e) = settings.validate() {
            tracing::warn!(error = %e, "stored settings are out of range");
        }
        Ok(settings)
    }

    pub(crate) fn refresh_cycle(&self) -> anyhow::Result<RefreshCycle<DevicePosition>> {
        let c = &self.config;
        let ip = IpLocationClient::with_url(
            c.request_timeout_secs,
            &c.ip_location_url,
            &c.user_agent,
        )
        .context("building IP location client")?;
        let prayer = PrayerTimesClient::with_base_url(
            c.request_timeout_secs,
            &c.prayer_api_url,
            &c.user_agent,
        )
        .context("building prayer-time client")?;
        let weather = WeatherClient::with_base_url(
            c.request_timeout_secs,
            &c.weather_api_url,
            &c.user_agent,
        )
        .context("building weather client")?;

        let resolver = LocationResolver::new(
            DevicePosition::from_config(c.device_position),
            ip,
            c.geolocation_timeout_secs,
        );
        Ok(RefreshCycle::new(
            resolver,
            ScheduleFetcher::new(prayer, c.request_timeout_secs),
            weather,
            c.request_timeout_secs,
        ))
    }

    pub(crate) fn directory(&self) -> anyhow::Result<DirectoryClient> {
        let c = &self.config;
        DirectoryClient::with_base_url(c.request_timeout_secs, &c.directory_api_url, &c.user_agent)
            .context("building directory client")
    }
}

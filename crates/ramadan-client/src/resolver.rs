//! Location waterfall: manual settings, then the device position, then the
//! IP lookup, then a fixed fallback.

use std::time::Duration;

use ramadan_core::{CalculationSettings, Coordinates, LocationSource, ResolvedLocation};

use crate::error::ClientError;
use crate::ip::IpLocationClient;
use crate::position::PositionSource;

/// Display name for a device fix until the schedule reports its timezone.
pub const GPS_PLACEHOLDER_NAME: &str = "Current location";

pub struct LocationResolver<P> {
    position: P,
    ip: IpLocationClient,
    geolocation_timeout: Duration,
}

impl<P: PositionSource> LocationResolver<P> {
    pub fn new(position: P, ip: IpLocationClient, geolocation_timeout_secs: u64) -> Self {
        Self {
            position,
            ip,
            geolocation_timeout: Duration::from_secs(geolocation_timeout_secs),
        }
    }

    /// Resolves the location to fetch for. Never fails: every strategy that
    /// errors is logged and the next one is tried.
    pub async fn resolve(&self, settings: &CalculationSettings) -> ResolvedLocation {
        if let Some((city, country)) = settings.manual_place() {
            tracing::debug!(city, country, "using manual location");
            return ResolvedLocation::manual(city, country);
        }

        if settings.high_precision {
            match self.device_position().await {
                Ok(coordinates) => {
                    tracing::debug!(%coordinates, "using device position");
                    return ResolvedLocation::at(
                        coordinates,
                        GPS_PLACEHOLDER_NAME.to_string(),
                        LocationSource::Gps,
                    );
                }
                Err(e) => tracing::warn!(error = %e, "device position failed, trying IP lookup"),
            }
        }

        match self.ip.lookup().await {
            Ok(found) => {
                tracing::debug!(coordinates = %found.coordinates, "using IP location");
                ResolvedLocation::at(found.coordinates, found.display_name(), LocationSource::Ip)
            }
            Err(e) => {
                tracing::warn!(error = %e, "IP lookup failed, using fallback location");
                ResolvedLocation::fallback()
            }
        }
    }

    async fn device_position(&self) -> Result<Coordinates, ClientError> {
        tokio::time::timeout(self.geolocation_timeout, self.position.current_position(true))
            .await
            .map_err(|_| ClientError::Timeout {
                operation: "device position".to_string(),
                secs: self.geolocation_timeout.as_secs(),
            })?
    }
}

//! Device positioning.
//!
//! A terminal has no location sensor, so the device position is either
//! configured up front or absent. The trait stays open for other sources.

use std::future::Future;

use ramadan_core::Coordinates;

use crate::error::ClientError;

pub trait PositionSource: Send + Sync {
    /// Reports the device position. `high_accuracy` requests the most
    /// precise fix the source can produce.
    fn current_position(
        &self,
        high_accuracy: bool,
    ) -> impl Future<Output = Result<Coordinates, ClientError>> + Send;
}

/// The device position as far as the process knows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DevicePosition {
    Fixed(Coordinates),
    Unavailable,
}

impl DevicePosition {
    #[must_use]
    pub fn from_config(position: Option<Coordinates>) -> Self {
        position.map_or(Self::Unavailable, Self::Fixed)
    }
}

impl PositionSource for DevicePosition {
    async fn current_position(&self, _high_accuracy: bool) -> Result<Coordinates, ClientError> {
        match self {
            Self::Fixed(coordinates) => Ok(*coordinates),
            Self::Unavailable => Err(ClientError::PositionUnavailable(
                "no device position configured".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_position_is_reported() {
        let coords = Coordinates {
            latitude: 21.4225,
            longitude: 39.8262,
        };
        let source = DevicePosition::from_config(Some(coords));
        assert_eq!(source.current_position(true).await.unwrap(), coords);
    }

    #[tokio::test]
    async fn unavailable_position_errors() {
        let source = DevicePosition::from_config(None);
        let err = source.current_position(true).await.unwrap_err();
        assert!(matches!(err, ClientError::PositionUnavailable(_)));
    }
}

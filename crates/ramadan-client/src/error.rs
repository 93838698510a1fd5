use ramadan_core::CoreError;
use thiserror::Error;

/// Errors returned by the external-service clients and the refresh pipeline.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a failure envelope or a non-2xx status.
    #[error("API error: {0}")]
    ApiError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The caller-side deadline elapsed before the request completed.
    #[error("{operation} timed out after {secs}s")]
    Timeout { operation: String, secs: u64 },

    /// A fetched timetable could not be calibrated.
    #[error("calibration failed: {0}")]
    Calibration(#[from] CoreError),

    /// The response did not carry enough data to place the location.
    #[error("location data missing: {0}")]
    MissingLocation(String),

    /// The device could not report its position.
    #[error("device position unavailable: {0}")]
    PositionUnavailable(String),
}

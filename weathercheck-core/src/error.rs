//! Error taxonomy
//!
//! Location and forecast failures end up in `Status::Failed` with the
//! user-facing message from [`LocationError::user_message`] or
//! [`WEATHER_FETCH_FAILED`]. Place lookup failures are only logged.

use std::path::PathBuf;

use reqwest::StatusCode;

/// User-facing message for any forecast failure (transport, status or parse).
pub const WEATHER_FETCH_FAILED: &str = "Failed to fetch weather data";

const LOCATION_DENIED: &str = "Unable to retrieve your location. Please allow access.";
const LOCATION_UNSUPPORTED: &str = "Geolocation not supported by your browser";

/// Locator errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("location permission denied")]
    Denied,
    #[error("no location source configured")]
    Unsupported,
    #[error("location unavailable: {0}")]
    Unavailable(String),
}

impl LocationError {
    /// Message shown in the error banner.
    ///
    /// Denial and unavailability look the same to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::Denied | LocationError::Unavailable(_) => LOCATION_DENIED,
            LocationError::Unsupported => LOCATION_UNSUPPORTED,
        }
    }
}

/// HTTP provider errors
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned status {0}")]
    Status(StatusCode),
    #[error("invalid response body: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("could not determine the platform config directory")]
    NoConfigDir,
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use super::{build_client, get_json};
use crate::error::FetchError;
use crate::state::Coordinates;

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Hourly variables requested from Open-Meteo
pub const HOURLY_FIELDS: &str = "temperature_2m,precipitation_probability";

/// Open-Meteo forecast client
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }

    /// Fetch the hourly temperature and precipitation-probability series.
    pub async fn fetch(&self, coordinates: Coordinates) -> Result<Value, FetchError> {
        tracing::debug!(
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "fetching forecast"
        );

        let request = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", coordinates.latitude),
                ("longitude", coordinates.longitude),
            ])
            .query(&[("hourly", HOURLY_FIELDS)]);

        get_json(request).await
    }
}

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use super::{build_client, get_json};
use crate::error::FetchError;
use crate::state::Coordinates;

pub const DEFAULT_GEOCODE_URL: &str =
    "https://api.bigdatacloud.net/data/reverse-geocode-client";

/// BigDataCloud reverse-geocode client. No API key required.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
}

impl GeocodeClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }

    pub async fn reverse(&self, coordinates: Coordinates) -> Result<Value, FetchError> {
        let request = self.client.get(&self.base_url).query(&[
            ("latitude", coordinates.latitude),
            ("longitude", coordinates.longitude),
        ]);

        get_json(request).await
    }
}

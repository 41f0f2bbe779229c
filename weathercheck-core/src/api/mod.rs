//! HTTP clients for the weather and reverse-geocode providers
//!
//! Both clients return the raw JSON body; projection into state happens in
//! the reducer so a partially malformed response still renders what it can.

mod forecast;
mod geocode;

pub use forecast::{ForecastClient, DEFAULT_FORECAST_URL, HOURLY_FIELDS};
pub use geocode::{GeocodeClient, DEFAULT_GEOCODE_URL};

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::error::FetchError;

pub(crate) const USER_AGENT: &str = concat!("weathercheck/", env!("CARGO_PKG_VERSION"));

pub(crate) fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?)
}

/// Send the request, require a 2xx status and decode the body as JSON.
pub(crate) async fn get_json(request: RequestBuilder) -> Result<Value, FetchError> {
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

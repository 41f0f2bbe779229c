//! Geolocation sources
//!
//! The terminal has no browser geolocation, so the position comes from a
//! [`Locator`]: fixed coordinates from the command line or config file, or an
//! IP lookup. With no locator configured, locating fails as unsupported.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::api::USER_AGENT;
use crate::error::LocationError;
use crate::state::Coordinates;

pub const DEFAULT_IP_LOOKUP_URL: &str = "https://ipinfo.io/json";

#[async_trait]
pub trait Locator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, LocationError>;
}

/// Always answers with the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub Coordinates);

#[async_trait]
impl Locator for FixedLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Location source that is never available
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocator;

#[async_trait]
impl Locator for NoLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unsupported)
    }
}

/// ipinfo.io style response; `loc` is `"latitude,longitude"`
#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    loc: Option<String>,
    #[serde(default)]
    city: Option<String>,
}

fn parse_loc(loc: &str) -> Option<Coordinates> {
    let (lat, lon) = loc.split_once(',')?;
    Some(Coordinates::new(
        lat.trim().parse().ok()?,
        lon.trim().parse().ok()?,
    ))
}

/// Approximate position from the public IP address
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: Client,
    url: String,
}

impl IpLocator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LocationError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Locator for IpLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        match response.status() {
            s if s.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(LocationError::Denied);
            }
            s => return Err(LocationError::Unavailable(format!("status {s}"))),
        }

        let body: IpLookupResponse = response
            .json()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        let coordinates = body
            .loc
            .as_deref()
            .and_then(parse_loc)
            .ok_or_else(|| LocationError::Unavailable("response has no usable loc".into()))?;

        tracing::info!(city = ?body.city, "located by IP address");
        Ok(coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn locator_with(response: ResponseTemplate) -> (MockServer, IpLocator) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(response)
            .mount(&server)
            .await;
        let locator = IpLocator::new(server.uri(), Duration::from_secs(2)).expect("locator");
        (server, locator)
    }

    #[test]
    fn test_parse_loc() {
        assert_eq!(
            parse_loc("37.3860,-122.0838"),
            Some(Coordinates::new(37.386, -122.0838))
        );
        assert_eq!(parse_loc(" 1.5 , 2 "), Some(Coordinates::new(1.5, 2.0)));
        assert_eq!(parse_loc("37.3860"), None);
        assert_eq!(parse_loc("north,south"), None);
    }

    #[tokio::test]
    async fn test_fixed_and_none() {
        let here = Coordinates::new(51.5, -0.12);
        assert_eq!(FixedLocator(here).locate().await, Ok(here));
        assert_eq!(NoLocator.locate().await, Err(LocationError::Unsupported));
    }

    #[tokio::test]
    async fn test_ip_locator_success() {
        let (_server, locator) = locator_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "city": "Lisbon", "loc": "38.7167,-9.1333" })),
        )
        .await;

        assert_eq!(
            locator.locate().await,
            Ok(Coordinates::new(38.7167, -9.1333))
        );
    }

    #[tokio::test]
    async fn test_ip_locator_forbidden_is_denied() {
        let (_server, locator) = locator_with(ResponseTemplate::new(403)).await;
        assert_eq!(locator.locate().await, Err(LocationError::Denied));
    }

    #[tokio::test]
    async fn test_ip_locator_missing_loc() {
        let (_server, locator) =
            locator_with(ResponseTemplate::new(200).set_body_json(json!({ "bogon": true }))).await;
        assert!(matches!(
            locator.locate().await,
            Err(LocationError::Unavailable(_))
        ));
    }
}

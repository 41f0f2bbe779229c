//! Effect handler - turns declared effects into keyed async tasks
//!
//! Each effect kind owns one [`TaskKey`], so a new location aborts any
//! in-flight fetch for the previous one. Place lookup failures are logged
//! and produce no action.

use std::sync::Arc;

use crate::action::Action;
use crate::api::{ForecastClient, GeocodeClient};
use crate::config::Config;
use crate::effect::Effect;
use crate::error::{ConfigError, WEATHER_FETCH_FAILED};
use crate::locate::Locator;
use crate::tasks::{TaskKey, TaskManager};

#[derive(Debug, Clone)]
pub struct EffectHandler {
    locator: Arc<dyn Locator>,
    forecast: ForecastClient,
    geocode: GeocodeClient,
}

impl EffectHandler {
    pub fn new(locator: Arc<dyn Locator>, forecast: ForecastClient, geocode: GeocodeClient) -> Self {
        Self {
            locator,
            forecast,
            geocode,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let invalid = |e: crate::error::FetchError| ConfigError::Invalid(e.to_string());
        Ok(Self::new(
            config.locator()?,
            ForecastClient::new(config.weather_url.clone(), config.timeout()).map_err(invalid)?,
            GeocodeClient::new(config.geocode_url.clone(), config.timeout()).map_err(invalid)?,
        ))
    }

    /// Spawn the task for one effect.
    pub fn handle(&self, effect: Effect, tasks: &mut TaskManager) {
        match effect {
            Effect::Locate => {
                let locator = Arc::clone(&self.locator);
                tasks.spawn(TaskKey::Locate, async move {
                    match locator.locate().await {
                        Ok(coordinates) => Action::LocationDidResolve(coordinates),
                        Err(err) => {
                            tracing::warn!(error = %err, "locate failed");
                            Action::LocationDidError(err)
                        }
                    }
                });
            }

            Effect::FetchForecast {
                generation,
                coordinates,
            } => {
                let client = self.forecast.clone();
                tasks.spawn(TaskKey::Forecast, async move {
                    match client.fetch(coordinates).await {
                        Ok(raw) => Action::ForecastDidLoad { generation, raw },
                        Err(err) => {
                            tracing::error!(generation, error = %err, "forecast fetch failed");
                            Action::ForecastDidError {
                                generation,
                                message: WEATHER_FETCH_FAILED.to_owned(),
                            }
                        }
                    }
                });
            }

            Effect::FetchPlace {
                generation,
                coordinates,
            } => {
                let client = self.geocode.clone();
                tasks.spawn(TaskKey::Place, async move {
                    match client.reverse(coordinates).await {
                        Ok(raw) => Some(Action::PlaceDidLoad { generation, raw }),
                        Err(err) => {
                            // not user-visible: the forecast still renders without a place
                            tracing::warn!(generation, error = %err, "couldn't get city name");
                            None
                        }
                    }
                });
            }
        }
    }
}

//! Reducer - (state, action) -> (changed, effects)
//!
//! - All state mutations happen here
//! - No I/O: fetches are returned as [`Effect`]s
//! - Async results for a superseded generation are identity transitions

use crate::action::Action;
use crate::effect::{DispatchResult, Effect};
use crate::error::LocationError;
use crate::state::{AppState, HourlySeries, Place, Status};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Location =====
        Action::LocateRequest => {
            state.status = Status::LocatingOrLoading;
            DispatchResult::changed_with(Effect::Locate)
        }

        Action::LocationDidResolve(coordinates) => {
            if !coordinates.is_known() {
                tracing::warn!("locator returned the (0, 0) pair, treating as no fix");
                state.status = Status::Failed(
                    LocationError::Unavailable("no fix".into())
                        .user_message()
                        .to_owned(),
                );
                return DispatchResult::changed();
            }

            state.coordinates = Some(coordinates);
            state.generation += 1;
            let generation = state.generation;
            tracing::info!(
                generation,
                latitude = coordinates.latitude,
                longitude = coordinates.longitude,
                "location resolved"
            );

            DispatchResult::changed_with_many(vec![
                Effect::FetchForecast {
                    generation,
                    coordinates,
                },
                Effect::FetchPlace {
                    generation,
                    coordinates,
                },
            ])
        }

        Action::LocationDidError(err) => {
            state.status = Status::Failed(err.user_message().to_owned());
            DispatchResult::changed()
        }

        // ===== Forecast =====
        Action::ForecastDidLoad { generation, raw } => {
            if generation != state.generation {
                tracing::debug!(generation, current = state.generation, "stale forecast dropped");
                return DispatchResult::unchanged();
            }
            state.apply_series(HourlySeries::from_response(&raw));
            state.forecast = Some(raw);
            state.status = Status::Ready;
            DispatchResult::changed()
        }

        Action::ForecastDidError {
            generation,
            message,
        } => {
            if generation != state.generation {
                return DispatchResult::unchanged();
            }
            state.status = Status::Failed(message);
            DispatchResult::changed()
        }

        // ===== Place =====
        Action::PlaceDidLoad { generation, raw } => {
            if generation != state.generation {
                tracing::debug!(generation, current = state.generation, "stale place dropped");
                return DispatchResult::unchanged();
            }
            state.place = Place::from_response(&raw);
            DispatchResult::changed()
        }

        Action::ErrorDismiss => {
            if state.error().is_none() {
                return DispatchResult::unchanged();
            }
            state.status = if state.has_forecast() {
                Status::Ready
            } else {
                Status::Idle
            };
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::UiToggleUnits => {
            state.unit = state.unit.toggle();
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            let changed = state.terminal_size != (width, height);
            state.terminal_size = (width, height);
            DispatchResult::changed_if(changed)
        }

        // ===== Global =====
        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // only re-render while the spinner is visible
            DispatchResult::changed_if(state.is_loading())
        }

        // Handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}

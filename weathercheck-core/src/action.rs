//! Actions
//!
//! Naming convention:
//! - Prefix is the category: `LocateRequest`, `LocationDidResolve` -> "location"
//! - `Did` marks the result of an async task
//! - Async results carry the generation they were requested for

use serde_json::Value;

use crate::error::LocationError;
use crate::state::Coordinates;

/// Everything that can change [`AppState`](crate::state::AppState)
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Location category =====
    /// Intent: user asked to locate (also the retry action)
    LocateRequest,

    /// Result: locator produced a position
    LocationDidResolve(Coordinates),

    /// Result: locator failed or is unavailable
    LocationDidError(LocationError),

    // ===== Forecast category =====
    /// Result: raw forecast response received
    ForecastDidLoad { generation: u64, raw: Value },

    /// Result: forecast fetch failed
    ForecastDidError { generation: u64, message: String },

    // ===== Place category =====
    /// Result: raw reverse-geocode response received
    PlaceDidLoad { generation: u64, raw: Value },

    // ===== Error banner =====
    ErrorDismiss,

    // ===== UI category =====
    UiToggleUnits,

    UiTerminalResize(u16, u16),

    // ===== Uncategorized =====
    /// Periodic tick for loading animation
    Tick,

    Quit,
}

impl Action {
    /// Variant name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Action::LocateRequest => "LocateRequest",
            Action::LocationDidResolve(_) => "LocationDidResolve",
            Action::LocationDidError(_) => "LocationDidError",
            Action::ForecastDidLoad { .. } => "ForecastDidLoad",
            Action::ForecastDidError { .. } => "ForecastDidError",
            Action::PlaceDidLoad { .. } => "PlaceDidLoad",
            Action::ErrorDismiss => "ErrorDismiss",
            Action::UiToggleUnits => "UiToggleUnits",
            Action::UiTerminalResize(..) => "UiTerminalResize",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }

    pub fn category(&self) -> Option<&'static str> {
        match self {
            Action::LocateRequest
            | Action::LocationDidResolve(_)
            | Action::LocationDidError(_) => Some("location"),
            Action::ForecastDidLoad { .. } | Action::ForecastDidError { .. } => Some("forecast"),
            Action::PlaceDidLoad { .. } => Some("place"),
            Action::ErrorDismiss => Some("error"),
            Action::UiToggleUnits | Action::UiTerminalResize(..) => Some("ui"),
            Action::Tick | Action::Quit => None,
        }
    }

    /// True for results of async tasks
    pub fn is_async_result(&self) -> bool {
        self.name().contains("Did")
    }

    /// Concise one-line description for the action log.
    ///
    /// Raw responses are summarized by sample count instead of dumped.
    pub fn summary(&self) -> String {
        match self {
            Action::ForecastDidLoad { generation, raw } => {
                let samples = raw
                    .pointer("/hourly/time")
                    .and_then(Value::as_array)
                    .map_or(0, Vec::len);
                format!("ForecastDidLoad {{ generation: {generation}, samples: {samples} }}")
            }
            Action::PlaceDidLoad { generation, raw } => {
                let country = raw
                    .get("countryName")
                    .and_then(Value::as_str)
                    .unwrap_or("?");
                format!("PlaceDidLoad {{ generation: {generation}, country: {country:?} }}")
            }
            Action::ForecastDidError { generation, message } => {
                let msg = if message.len() > 40 {
                    format!("{}...", message.chars().take(37).collect::<String>())
                } else {
                    message.clone()
                };
                format!("ForecastDidError {{ generation: {generation}, message: {msg:?} }}")
            }
            _ => format!("{:?}", self),
        }
    }
}

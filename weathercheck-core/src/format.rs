//! Derived presentation values - pure functions of state, never stored

use chrono::NaiveDateTime;

use crate::state::AppState;

// Open-Meteo returns local time without seconds or offset.
const HOURLY_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

fn parse_timestamp(ts: &str) -> Option<NaiveDateTime> {
    HOURLY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(ts, fmt).ok())
}

/// Temperature of the first hourly sample, if any.
pub fn current_temperature(state: &AppState) -> Option<f64> {
    state.temperatures_today.first().copied().flatten()
}

/// 12-hour clock label, e.g. `12 AM`, `3 PM`.
///
/// Unparseable input is returned unchanged.
pub fn hour_label(ts: &str) -> String {
    match parse_timestamp(ts) {
        Some(dt) => dt.format("%-I %p").to_string(),
        None => ts.to_owned(),
    }
}

/// Long date label, e.g. `Monday, January 1`. Empty for missing or bad input.
pub fn date_label(ts: Option<&str>) -> String {
    ts.and_then(parse_timestamp)
        .map(|dt| dt.format("%A, %B %-d").to_string())
        .unwrap_or_default()
}

/// Date label for the first hourly sample
pub fn today_label(state: &AppState) -> String {
    date_label(state.hours_today.first().map(String::as_str))
}

//! Application state - single source of truth
//!
//! Only the reducer mutates `AppState`. Everything the UI renders is either
//! stored here or derived from it by the helpers in [`crate::format`].

use serde_json::Value;

/// Number of hourly samples kept from a forecast response.
pub const HOURS_PER_DAY: usize = 24;

/// Fallback city name when the reverse-geocode response has neither a city nor a locality.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Spinner frame interval in milliseconds.
pub const LOADING_ANIM_TICK_MS: u64 = 100;

/// A latitude/longitude pair in decimal degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// The (0, 0) pair doubles as "no fix yet" and never triggers fetches.
    pub fn is_known(&self) -> bool {
        !(self.latitude == 0.0 && self.longitude == 0.0)
    }
}

/// Reverse-geocoded place name
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Place {
    pub city: String,
    pub country: String,
}

impl Place {
    /// Project a reverse-geocode response into a place.
    ///
    /// City falls back through `city`, then `locality`, then [`UNKNOWN_LOCATION`].
    /// Empty strings count as missing.
    pub fn from_response(raw: &Value) -> Self {
        let field = |name: &str| {
            raw.get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };

        Self {
            city: field("city")
                .or_else(|| field("locality"))
                .unwrap_or_else(|| UNKNOWN_LOCATION.to_owned()),
            country: field("countryName").unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_empty() && self.country.is_empty()
    }
}

/// Hourly series projected from a forecast response, index-aligned from offset 0
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HourlySeries {
    pub hours: Vec<String>,
    pub temperatures: Vec<Option<f64>>,
    pub precipitation_probabilities: Vec<Option<f64>>,
}

impl HourlySeries {
    /// Slice the first [`HOURS_PER_DAY`] entries of each hourly array.
    ///
    /// A missing or mistyped array yields an empty sequence. `null` samples
    /// stay in place as `None` so index `i` keeps pointing at the same hour.
    pub fn from_response(raw: &Value) -> Self {
        let hours = hourly_array(raw, "time")
            .iter()
            .take(HOURS_PER_DAY)
            .map(|v| v.as_str().map(str::to_owned).unwrap_or_default())
            .collect();
        let numbers = |name: &str| -> Vec<Option<f64>> {
            hourly_array(raw, name)
                .iter()
                .take(HOURS_PER_DAY)
                .map(Value::as_f64)
                .collect()
        };

        Self {
            hours,
            temperatures: numbers("temperature_2m"),
            precipitation_probabilities: numbers("precipitation_probability"),
        }
    }
}

fn hourly_array<'a>(raw: &'a Value, name: &str) -> &'a [Value] {
    raw.get("hourly")
        .and_then(|hourly| hourly.get(name))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Where the controller is in the locate/fetch pipeline
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    LocatingOrLoading,
    Ready,
    Failed(String),
}

impl Status {
    pub fn is_loading(&self) -> bool {
        matches!(self, Status::LocatingOrLoading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Status::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Temperature unit preference
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn toggle(&self) -> Self {
        match self {
            TempUnit::Celsius => TempUnit::Fahrenheit,
            TempUnit::Fahrenheit => TempUnit::Celsius,
        }
    }

    pub fn convert(&self, celsius: f64) -> f64 {
        match self {
            TempUnit::Celsius => celsius,
            TempUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TempUnit::Celsius => "°C",
            TempUnit::Fahrenheit => "°F",
        }
    }

    /// Whole-degree reading with unit, e.g. `21°C`
    pub fn format(&self, celsius: f64) -> String {
        format!("{:.0}{}", self.convert(celsius), self.symbol())
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    /// Last resolved position (None = not yet located)
    pub coordinates: Option<Coordinates>,

    /// Raw forecast response, kept as received
    pub forecast: Option<Value>,

    /// First 24 hourly timestamps (ISO-8601, provider local time)
    pub hours_today: Vec<String>,

    /// Temperatures in °C, aligned with `hours_today`
    pub temperatures_today: Vec<Option<f64>>,

    /// Precipitation probabilities in percent, aligned with `hours_today`
    pub precipitation_probabilities: Vec<Option<f64>>,

    pub place: Place,

    pub status: Status,

    /// Bumped on every resolved location; results for older generations are dropped
    pub generation: u64,

    pub unit: TempUnit,

    /// Animation frame counter (for loading spinner)
    pub tick_count: u32,

    pub terminal_size: (u16, u16),
}

impl AppState {
    pub fn new() -> Self {
        Self {
            coordinates: None,
            forecast: None,
            hours_today: Vec::new(),
            temperatures_today: Vec::new(),
            precipitation_probabilities: Vec::new(),
            place: Place::default(),
            status: Status::Idle,
            generation: 0,
            unit: TempUnit::default(),
            tick_count: 0,
            terminal_size: (80, 24),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }

    pub fn has_forecast(&self) -> bool {
        self.forecast.is_some()
    }

    pub(crate) fn apply_series(&mut self, series: HourlySeries) {
        self.hours_today = series.hours;
        self.temperatures_today = series.temperatures;
        self.precipitation_probabilities = series.precipitation_probabilities;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

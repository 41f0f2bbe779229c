//! WeatherCheck terminal UI
//!
//! Components, input polling and the runtime loop on top of
//! [`weathercheck_core`].

pub mod app;
pub mod cli;
pub mod components;
pub mod event;
pub mod logging;
pub mod runtime;
pub mod testing;

pub use app::WeatherUi;
pub use event::EventKind;
pub use runtime::{EventOutcome, Runtime};

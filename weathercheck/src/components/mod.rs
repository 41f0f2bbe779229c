//! Screen components
//!
//! Every component is a pure function of its props: it renders from borrowed
//! state and turns input into [`Action`](weathercheck_core::Action)s, never
//! mutating anything itself.

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

pub mod current_weather;
pub mod error_banner;
pub mod help_bar;
pub mod hourly_grid;
pub mod loader;
pub mod weather_screen;
pub mod welcome_card;

pub use current_weather::{CurrentWeather, CurrentWeatherProps};
pub use error_banner::{ErrorBanner, ErrorBannerProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use hourly_grid::{HourlyGrid, HourlyGridProps};
pub use loader::{Loader, LoaderProps};
pub use weather_screen::{WeatherScreen, WeatherScreenProps};
pub use welcome_card::{WelcomeCard, WelcomeCardProps};

pub const LOCATION_ICON: &str = "📍 ";
pub const ERROR_ICON: &str = "⚠ ";
pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Spinner frame for an animation tick
pub fn spinner(tick_count: u32) -> &'static str {
    SPINNERS[(tick_count as usize / 2) % SPINNERS.len()]
}

/// A UI element that renders from props and emits actions
///
/// Props carry all read-only data needed for rendering. `handle_event`
/// returns actions and never mutates external state.
pub trait Component<A> {
    /// Data required to render the component
    type Props<'a>;

    /// Turn an input event into actions to dispatch.
    ///
    /// Render-only components keep the default, which emits nothing.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}

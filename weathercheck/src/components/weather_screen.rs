//! Root screen
//!
//! Picks what to show from the state:
//! - an error banner whenever the status is failed
//! - the loader while locating or fetching
//! - the dashboard once a forecast is loaded
//! - the welcome card otherwise
//!
//! Key handling lives here too; children are render-only.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders},
    Frame,
};
use weathercheck_core::{Action, AppState};

use super::{
    spinner, Component, CurrentWeather, CurrentWeatherProps, ErrorBanner, ErrorBannerProps,
    HelpBar, HelpBarProps, HourlyGrid, HourlyGridProps, Loader, LoaderProps, WelcomeCard,
    WelcomeCardProps,
};
use crate::event::EventKind;

pub struct WeatherScreenProps<'a> {
    pub state: &'a AppState,
}

#[derive(Default)]
pub struct WeatherScreen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Body {
    Loading,
    Dashboard,
    Welcome,
    Empty,
}

impl Body {
    fn from_state(state: &AppState) -> Self {
        if state.is_loading() {
            Body::Loading
        } else if state.has_forecast() {
            Body::Dashboard
        } else if state.error().is_none() {
            Body::Welcome
        } else {
            Body::Empty
        }
    }
}

impl Component<Action> for WeatherScreen {
    type Props<'a> = WeatherScreenProps<'a>;

    fn handle_event<'a>(&mut self, event: &EventKind, props: Self::Props<'a>) -> Vec<Action>
    where
        'a: 'a,
    {
        let EventKind::Key(key) = event else {
            return vec![];
        };
        let state = props.state;

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => vec![Action::Quit],
                _ => vec![],
            };
        }

        match key.code {
            KeyCode::Char('l') | KeyCode::Enter if !state.is_loading() => {
                vec![Action::LocateRequest]
            }
            KeyCode::Char('r') | KeyCode::F(5) if state.error().is_some() => {
                vec![Action::LocateRequest]
            }
            KeyCode::Char('d') | KeyCode::Esc if state.error().is_some() => {
                vec![Action::ErrorDismiss]
            }
            KeyCode::Char('u') => vec![Action::UiToggleUnits],
            KeyCode::Char('q') => vec![Action::Quit],
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        let loading_indicator = if state.is_loading() {
            format!(" {} ", spinner(state.tick_count))
        } else {
            String::new()
        };

        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" ☁ WeatherCheck{loading_indicator}"))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let [main, help_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let body_area = match state.error() {
            Some(message) => {
                let [banner, rest] = Layout::vertical([
                    Constraint::Length(ErrorBanner::HEIGHT),
                    Constraint::Min(0),
                ])
                .areas(main);
                ErrorBanner.render(frame, banner, ErrorBannerProps { message });
                rest
            }
            None => main,
        };

        match Body::from_state(state) {
            Body::Loading => Loader.render(
                frame,
                body_area,
                LoaderProps {
                    tick_count: state.tick_count,
                },
            ),
            Body::Dashboard => {
                let [current, grid] = Layout::vertical([
                    Constraint::Length(CurrentWeather::HEIGHT + 1),
                    Constraint::Min(0),
                ])
                .areas(body_area);
                CurrentWeather.render(frame, current, CurrentWeatherProps { state });
                HourlyGrid.render(
                    frame,
                    grid,
                    HourlyGridProps {
                        hours: &state.hours_today,
                        temperatures: &state.temperatures_today,
                        precipitation_probabilities: &state.precipitation_probabilities,
                        unit: state.unit,
                    },
                );
            }
            Body::Welcome => WelcomeCard.render(frame, body_area, WelcomeCardProps),
            Body::Empty => {}
        }

        HelpBar.render(
            frame,
            help_area,
            HelpBarProps {
                is_loading: state.is_loading(),
                has_error: state.error().is_some(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key, ActionAssertions};
    use weathercheck_core::Status;

    fn press(state: &AppState, k: &str) -> Vec<Action> {
        WeatherScreen.handle_event(&EventKind::Key(key(k)), WeatherScreenProps { state })
    }

    fn failed() -> AppState {
        AppState {
            status: Status::Failed("Failed to fetch weather data".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_locate_keys() {
        let state = AppState::default();
        press(&state, "l").assert_first(Action::LocateRequest);
        press(&state, "enter").assert_first(Action::LocateRequest);
    }

    #[test]
    fn test_locate_ignored_while_loading() {
        let state = AppState {
            status: Status::LocatingOrLoading,
            ..Default::default()
        };
        press(&state, "l").assert_empty();
        press(&state, "u").assert_first(Action::UiToggleUnits);
    }

    #[test]
    fn test_retry_and_dismiss_only_when_failed() {
        let idle = AppState::default();
        press(&idle, "r").assert_empty();
        press(&idle, "d").assert_empty();
        press(&idle, "esc").assert_empty();

        let state = failed();
        press(&state, "r").assert_first(Action::LocateRequest);
        press(&state, "d").assert_first(Action::ErrorDismiss);
        press(&state, "esc").assert_first(Action::ErrorDismiss);
    }

    #[test]
    fn test_quit_keys() {
        let state = AppState::default();
        press(&state, "q").assert_first(Action::Quit);
        press(&state, "ctrl+c").assert_first(Action::Quit);
        press(&state, "ctrl+l").assert_empty();
    }

    #[test]
    fn test_resize_is_not_a_key() {
        let state = AppState::default();
        WeatherScreen
            .handle_event(&EventKind::Resize(10, 10), WeatherScreenProps { state: &state })
            .assert_empty();
    }

    #[test]
    fn test_body_selection() {
        assert_eq!(Body::from_state(&AppState::default()), Body::Welcome);
        assert_eq!(Body::from_state(&failed()), Body::Empty);

        let loading = AppState {
            status: Status::LocatingOrLoading,
            forecast: Some(serde_json::json!({})),
            ..Default::default()
        };
        assert_eq!(Body::from_state(&loading), Body::Loading);

        let failed_with_forecast = AppState {
            forecast: Some(serde_json::json!({})),
            ..failed()
        };
        assert_eq!(Body::from_state(&failed_with_forecast), Body::Dashboard);
    }
}

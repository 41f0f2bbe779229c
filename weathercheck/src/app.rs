//! Glue between the root screen and the runtime loop

use ratatui::{layout::Rect, Frame};
use weathercheck_core::{Action, AppState};

use crate::components::{Component, WeatherScreen, WeatherScreenProps};
use crate::event::EventKind;
use crate::runtime::EventOutcome;

#[derive(Default)]
pub struct WeatherUi {
    screen: WeatherScreen,
}

impl WeatherUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        self.screen.render(frame, area, WeatherScreenProps { state });
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome {
        if let EventKind::Resize(width, height) = event {
            return EventOutcome::action(Action::UiTerminalResize(*width, *height)).with_render();
        }
        EventOutcome::from_actions(self.screen.handle_event(event, WeatherScreenProps { state }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::key;

    #[test]
    fn test_resize_forces_render() {
        let mut ui = WeatherUi::new();
        let outcome = ui.map_event(&EventKind::Resize(100, 30), &AppState::default());
        assert_eq!(outcome.actions, vec![Action::UiTerminalResize(100, 30)]);
        assert!(outcome.needs_render);
    }

    #[test]
    fn test_key_maps_through_screen() {
        let mut ui = WeatherUi::new();
        let outcome = ui.map_event(&EventKind::Key(key("l")), &AppState::default());
        assert_eq!(outcome.actions, vec![Action::LocateRequest]);
        assert!(!outcome.needs_render);

        let outcome = ui.map_event(&EventKind::Key(key("x")), &AppState::default());
        assert_eq!(outcome, EventOutcome::ignored());
    }
}

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};
use weathercheck_core::Action;

use super::Component;

/// Idle prompt shown before the first lookup
pub struct WelcomeCard;

pub struct WelcomeCardProps;

impl WelcomeCard {
    pub const HEIGHT: u16 = 4;
}

impl Component<Action> for WelcomeCard {
    type Props<'a> = WelcomeCardProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, _props: Self::Props<'_>) {
        let [card] = Layout::vertical([Constraint::Length(Self::HEIGHT)])
            .flex(Flex::Center)
            .areas(area);

        let text = Text::from(vec![
            Line::from(Span::styled(
                "Check local weather",
                Style::default().fg(Color::White).bold(),
            )),
            Line::from(Span::styled(
                "Get today's weather for your current location instantly.",
                Style::default().fg(Color::Gray),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("[ l ]", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" Locate Me", Style::default().fg(Color::White)),
            ]),
        ])
        .centered();
        frame.render_widget(Paragraph::new(text), card);
    }
}

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use weathercheck_core::Action;

use super::{spinner, Component};

pub struct Loader;

pub struct LoaderProps {
    pub tick_count: u32,
}

impl Component<Action> for Loader {
    type Props<'a> = LoaderProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [line_area] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(area);

        let dots = ".".repeat((props.tick_count as usize / 3) % 4);
        let line = Line::from(vec![
            Span::styled(spinner(props.tick_count), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!(" Fetching forecast{dots:<3}"),
                Style::default().fg(Color::Gray),
            ),
        ])
        .centered();
        frame.render_widget(Paragraph::new(line), line_area);
    }
}

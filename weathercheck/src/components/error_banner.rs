use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use weathercheck_core::Action;

use super::{Component, ERROR_ICON};

pub struct ErrorBanner;

pub struct ErrorBannerProps<'a> {
    pub message: &'a str,
}

impl ErrorBanner {
    pub const HEIGHT: u16 = 4;
}

impl Component<Action> for ErrorBanner {
    type Props<'a> = ErrorBannerProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));

        let text = Text::from(vec![
            Line::from(vec![
                Span::styled(ERROR_ICON, Style::default().fg(Color::Red)),
                Span::styled(
                    props.message.to_owned(),
                    Style::default().fg(Color::Rgb(230, 120, 120)).bold(),
                ),
            ]),
            Line::from(vec![
                Span::styled("r", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" try again   ", Style::default().fg(Color::DarkGray)),
                Span::styled("d", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" dismiss", Style::default().fg(Color::DarkGray)),
            ]),
        ])
        .centered();

        frame.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
            area,
        );
    }
}

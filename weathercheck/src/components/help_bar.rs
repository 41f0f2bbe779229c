use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use weathercheck_core::Action;

use super::Component;

pub struct HelpBar;

/// Which hints apply right now
pub struct HelpBarProps {
    pub is_loading: bool,
    pub has_error: bool,
}

impl HelpBar {
    fn hints(props: &HelpBarProps) -> Vec<(&'static str, &'static str)> {
        let mut hints = Vec::with_capacity(5);
        if !props.is_loading {
            hints.push(("l", "locate"));
        }
        if props.has_error && !props.is_loading {
            hints.push(("r", "retry"));
        }
        if props.has_error {
            hints.push(("d", "dismiss"));
        }
        hints.push(("u", "units"));
        hints.push(("q", "quit"));
        hints
    }
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let spans: Vec<Span> = Self::hints(&props)
            .into_iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(format!(" {key}"), Style::default().fg(Color::Cyan).bold()),
                    Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}

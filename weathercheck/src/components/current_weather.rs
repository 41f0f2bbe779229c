use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};
use weathercheck_core::format::{current_temperature, today_label};
use weathercheck_core::{Action, AppState};

use super::{Component, LOCATION_ICON};

/// Place, current temperature and date
pub struct CurrentWeather;

pub struct CurrentWeatherProps<'a> {
    pub state: &'a AppState,
}

impl CurrentWeather {
    pub const HEIGHT: u16 = 4;

    fn place_line(state: &AppState) -> Line<'static> {
        let place = &state.place;
        if place.is_empty() {
            // reverse geocoding still running or failed; coordinates stand in
            let coords = state
                .coordinates
                .map(|c| format!("{:.2}, {:.2}", c.latitude, c.longitude))
                .unwrap_or_default();
            return Line::from(vec![
                Span::raw(LOCATION_ICON),
                Span::styled(coords, Style::default().fg(Color::DarkGray)),
            ]);
        }

        let mut spans = vec![
            Span::raw(LOCATION_ICON),
            Span::styled(place.city.clone(), Style::default().fg(Color::White).bold()),
        ];
        if !place.country.is_empty() {
            spans.push(Span::styled(
                format!(", {}", place.country),
                Style::default().fg(Color::Gray),
            ));
        }
        Line::from(spans)
    }
}

impl Component<Action> for CurrentWeather {
    type Props<'a> = CurrentWeatherProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        let temperature = match current_temperature(state) {
            Some(celsius) => Span::styled(
                state.unit.format(celsius),
                Style::default().fg(temp_to_color(celsius)).bold(),
            ),
            None => Span::styled("--", Style::default().fg(Color::DarkGray)),
        };

        let text = Text::from(vec![
            Self::place_line(state),
            Line::default(),
            Line::from(temperature),
            Line::from(Span::styled(
                today_label(state),
                Style::default().fg(Color::Gray),
            )),
        ])
        .centered();
        frame.render_widget(Paragraph::new(text), area);
    }
}

fn temp_to_color(celsius: f64) -> Color {
    match celsius.round() as i32 {
        ..=-10 => Color::Rgb(150, 200, 255),
        -9..=0 => Color::Rgb(100, 180, 255),
        1..=10 => Color::Rgb(100, 220, 200),
        11..=20 => Color::Rgb(150, 230, 150),
        21..=30 => Color::Rgb(255, 220, 100),
        31..=40 => Color::Rgb(255, 150, 80),
        _ => Color::Rgb(255, 100, 100),
    }
}

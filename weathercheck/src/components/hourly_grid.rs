//! Hourly forecast grid
//!
//! One cell per hour with the time, precipitation probability and
//! temperature, wrapped into as many rows as the width requires.

use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use weathercheck_core::format::hour_label;
use weathercheck_core::{Action, TempUnit};

use super::Component;

pub struct HourlyGrid;

pub struct HourlyGridProps<'a> {
    pub hours: &'a [String],
    pub temperatures: &'a [Option<f64>],
    pub precipitation_probabilities: &'a [Option<f64>],
    pub unit: TempUnit,
}

const CELL_WIDTH: usize = 9;
const MISSING: &str = "--";

struct Cell {
    time: String,
    precipitation: String,
    temperature: String,
}

impl HourlyGrid {
    /// Cells per row for an inner width of `width` columns
    pub fn columns(width: u16) -> usize {
        (width as usize / CELL_WIDTH).max(1)
    }

    fn cells(props: &HourlyGridProps<'_>) -> Vec<Cell> {
        props
            .hours
            .iter()
            .enumerate()
            .map(|(i, hour)| Cell {
                time: hour_label(hour),
                precipitation: props
                    .precipitation_probabilities
                    .get(i)
                    .copied()
                    .flatten()
                    .map(|p| format!("{p:.0}%"))
                    .unwrap_or_else(|| MISSING.to_owned()),
                temperature: props
                    .temperatures
                    .get(i)
                    .copied()
                    .flatten()
                    .map(|t| format!("{:.0}°", props.unit.convert(t)))
                    .unwrap_or_else(|| MISSING.to_owned()),
            })
            .collect()
    }

    fn row_lines(row: &[Cell]) -> [Line<'static>; 3] {
        let pad = |s: &str| format!("{s:^width$}", width = CELL_WIDTH);
        [
            Line::from(
                row.iter()
                    .map(|c| Span::styled(pad(&c.time), Style::default().fg(Color::Gray)))
                    .collect::<Vec<_>>(),
            ),
            Line::from(
                row.iter()
                    .map(|c| {
                        Span::styled(
                            pad(&c.precipitation),
                            Style::default().fg(Color::Rgb(100, 160, 255)),
                        )
                    })
                    .collect::<Vec<_>>(),
            ),
            Line::from(
                row.iter()
                    .map(|c| Span::styled(pad(&c.temperature), Style::default().fg(Color::White).bold()))
                    .collect::<Vec<_>>(),
            ),
        ]
    }
}

impl Component<Action> for HourlyGrid {
    type Props<'a> = HourlyGridProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" Hourly Forecast ")
            .title_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cells = Self::cells(&props);
        let mut lines = Vec::new();
        for (i, row) in cells.chunks(Self::columns(inner.width)).enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.extend(Self::row_lines(row));
        }

        frame.render_widget(Paragraph::new(lines).centered(), inner);
    }
}

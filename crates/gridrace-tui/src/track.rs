//! Race track widget: one lane per entrant with its car at the display position.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use gridrace_core::lineup::Entrant;

use crate::styles::{lane_style, ColorTheme};

/// Glyph drawn for a car.
pub const CAR_GLYPH: char = '▶';
/// Glyph drawn for the finish line.
pub const FINISH_GLYPH: char = '┃';

/// What the track needs to draw one lane.
#[derive(Debug, Clone, Copy)]
pub struct LaneView {
    pub entrant: Entrant,
    pub position: f64,
}

/// Column of the car in a lane `width` cells wide.
///
/// The last cell is the finish line; the overshoot dip draws at column 0.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn car_column(position: f64, width: u16) -> u16 {
    let run = width.saturating_sub(2);
    let p = if position.is_nan() {
        0.0
    } else {
        position.clamp(0.0, 1.0)
    };
    (p * f64::from(run)).round() as u16
}

/// Text of one lane: dots behind and ahead of the car, finish line last.
#[must_use]
pub fn lane_text(position: f64, width: u16) -> (String, String) {
    let run = usize::from(width.saturating_sub(2));
    let col = usize::from(car_column(position, width));
    let behind = "·".repeat(col);
    let ahead = " ".repeat(run.saturating_sub(col));
    (behind, ahead)
}

/// Render all lanes stacked vertically.
pub fn render_track(frame: &mut Frame, area: Rect, lanes: &[LaneView]) {
    if lanes.is_empty() {
        return;
    }
    let theme = ColorTheme::default();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); lanes.len()])
        .split(area);

    for (lane, row) in lanes.iter().zip(rows.iter()) {
        let style = lane_style(lane.entrant.color);
        let inner_width = row.width.saturating_sub(2);
        let (behind, ahead) = lane_text(lane.position, inner_width);
        let line = Line::from(vec![
            Span::styled(behind, theme.track_style()),
            Span::styled(CAR_GLYPH.to_string(), style),
            Span::raw(ahead),
            Span::styled(FINISH_GLYPH.to_string(), theme.header_style()),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.muted_style())
            .title(Span::styled(
                format!(" {} {} · {} ", lane.entrant.name, lane.entrant.id, lane.entrant.profile),
                style,
            ));
        frame.render_widget(Paragraph::new(line).block(block), *row);
    }
}

//! TUI header panel.

use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use gridrace_core::coordinator::RacePhase;

use crate::styles::ColorTheme;

fn phase_label(phase: RacePhase) -> &'static str {
    match phase {
        RacePhase::NotStarted => "on the grid",
        RacePhase::Running => "racing",
        RacePhase::Finished => "finished",
    }
}

/// Render the header panel.
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    phase: RacePhase,
    elapsed: Option<Duration>,
    seed: Option<u64>,
) {
    let theme = ColorTheme::default();
    let mut spans = vec![
        Span::styled("GridRace", theme.header_style()),
        Span::raw(format!(" | {}", phase_label(phase))),
    ];
    if let Some(elapsed) = elapsed {
        spans.push(Span::raw(format!(" | {:.1}s", elapsed.as_secs_f64())));
    }
    if let Some(seed) = seed {
        spans.push(Span::styled(format!(" | seed {seed}"), theme.muted_style()));
    }

    let block = Block::default().borders(Borders::BOTTOM);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

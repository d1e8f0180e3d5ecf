//! TUI footer panel.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use gridrace_core::coordinator::RacePhase;

/// Render the footer panel with the keys that matter in `phase`.
pub fn render_footer(frame: &mut Frame, area: Rect, phase: RacePhase) {
    let key = Style::default().fg(Color::Yellow);
    let spans = match phase {
        RacePhase::NotStarted => vec![
            Span::raw("Press "),
            Span::styled("Space", key),
            Span::raw(" to start | "),
            Span::styled("q", key),
            Span::raw(": quit"),
        ],
        RacePhase::Running => vec![
            Span::styled("q", key),
            Span::raw(": quit | "),
            Span::styled("↑/↓", key),
            Span::raw(": scroll log"),
        ],
        RacePhase::Finished => vec![
            Span::raw("Press "),
            Span::styled("Esc", key),
            Span::raw(" to exit"),
        ],
    };

    let block = Block::default().borders(Borders::TOP);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

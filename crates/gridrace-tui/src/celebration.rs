//! Winner banner with a spinning trophy glyph.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use gridrace_core::lineup::Entrant;

use crate::styles::{lane_style, ColorTheme};

/// Spinner frames, advanced once per rendered frame.
pub const SPIN_FRAMES: [char; 4] = ['◐', '◓', '◑', '◒'];

/// Glyph for a given spin state.
#[must_use]
pub fn spin_glyph(spin: usize) -> char {
    SPIN_FRAMES[spin % SPIN_FRAMES.len()]
}

/// Rect of `width` x `height` centered in `area`, clipped to it.
#[must_use]
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width - width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);
    horizontal[1]
}

/// Render the centered winner banner.
pub fn render_celebration(frame: &mut Frame, area: Rect, winner: &Entrant, spin: usize) {
    let theme = ColorTheme::default();
    let glyph = spin_glyph(spin).to_string();
    let text = vec![
        Line::from(vec![
            Span::styled(glyph.clone(), theme.winner_style()),
            Span::raw(" "),
            Span::styled(format!("{} {} wins!", winner.name, winner.id), lane_style(winner.color)),
            Span::raw(" "),
            Span::styled(glyph, theme.winner_style()),
        ]),
        Line::from(Span::styled(
            format!("profile: {}", winner.profile),
            theme.muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled("Press Esc to exit", theme.muted_style())),
    ];

    let banner = centered(area, 36, 6);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.winner_style())
        .title(" Winner ");
    frame.render_widget(Clear, banner);
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(block),
        banner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridrace_core::lineup::Lineup;
    use gridrace_core::motion::MotionProfile;
    use gridrace_core::participant::ParticipantId;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(width: u16, height: u16, spin: usize) -> String {
        let lineup = Lineup::with_profiles(MotionProfile::ALL, None);
        let winner = *lineup.get(ParticipantId(2)).unwrap();
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let completed = terminal
            .draw(|frame| render_celebration(frame, frame.area(), &winner, spin))
            .unwrap();
        let buf = completed.buffer;
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn spin_cycles() {
        assert_eq!(spin_glyph(0), '◐');
        assert_eq!(spin_glyph(1), '◓');
        assert_eq!(spin_glyph(4), '◐');
    }

    #[test]
    fn centered_rect_is_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let r = centered(area, 36, 6);
        assert_eq!((r.width, r.height), (36, 6));
        assert_eq!(r.x, 22);
        assert_eq!(r.y, 9);

        let tiny = centered(Rect::new(0, 0, 10, 3), 36, 6);
        assert_eq!((tiny.width, tiny.height), (10, 3));
    }

    #[test]
    fn banner_names_winner_and_exit_hint() {
        let text = screen_text(80, 24, 0);
        assert!(text.contains("Red #2 wins!"));
        assert!(text.contains("Press Esc to exit"));
        assert!(text.contains('◐'));
    }

    #[test]
    fn spin_changes_glyph() {
        let text = screen_text(80, 24, 1);
        assert!(text.contains('◓'));
        assert!(!text.contains('◐'));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let _ = screen_text(8, 3, 2);
    }
}

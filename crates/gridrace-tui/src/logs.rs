//! Race log panel with scrolling.

use std::collections::VecDeque;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

/// Lines kept before the oldest are dropped.
pub const LOG_CAPACITY: usize = 200;

/// Bounded log buffer plus its scroll position.
#[derive(Debug, Clone)]
pub struct LogPanel {
    lines: VecDeque<String>,
    /// Index of the bottom visible line; `render` fills the rows above it.
    pub offset: usize,
    /// Whether new lines keep the view pinned to the bottom.
    pub auto_scroll: bool,
}

impl LogPanel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: VecDeque::with_capacity(LOG_CAPACITY),
            offset: 0,
            auto_scroll: true,
        }
    }

    /// Append a line, dropping the oldest past capacity.
    pub fn push(&mut self, line: String) {
        if self.lines.len() == LOG_CAPACITY {
            self.lines.pop_front();
            self.offset = self.offset.saturating_sub(1);
        }
        self.lines.push_back(line);
        if self.auto_scroll {
            self.offset = self.last_index();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    fn last_index(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    /// Scroll up by one line.
    pub fn scroll_up(&mut self) {
        self.auto_scroll = false;
        self.offset = self.offset.saturating_sub(1);
    }

    /// Scroll down by one line; reaching the bottom re-pins the view.
    pub fn scroll_down(&mut self) {
        self.offset = (self.offset + 1).min(self.last_index());
        if self.offset >= self.last_index() {
            self.auto_scroll = true;
        }
    }

    /// Render the panel with the line at `offset` on the bottom row.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let visible = usize::from(area.height.saturating_sub(2));
        let first = if visible == 0 {
            self.offset
        } else {
            self.offset.saturating_sub(visible - 1)
        };

        let items: Vec<ListItem> = self
            .lines
            .iter()
            .skip(first)
            .take(visible)
            .map(|line| {
                let style = if line.contains("wins") {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                ListItem::new(Line::raw(line.as_str())).style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Race log ")
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(list, area);
    }
}

impl Default for LogPanel {
    fn default() -> Self {
        Self::new()
    }
}

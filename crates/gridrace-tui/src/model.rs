//! TUI application model (Elm architecture).
//!
//! The model reads lane snapshots and the coordinator phase directly every
//! frame; channel messages carry logs and the finish edge. The only race
//! state it ever writes is the start transition.

use std::io;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;
use tracing::debug;

use gridrace_core::constants::CONFETTI_COUNT;
use gridrace_core::coordinator::RacePhase;
use gridrace_core::error::RaceError;
use gridrace_core::lineup::Entrant;
use gridrace_core::participant::ParticipantId;
use gridrace_orchestration::interfaces::RaceSummary;
use gridrace_orchestration::orchestrator::RaceHandle;

use crate::celebration::render_celebration;
use crate::confetti::Confetti;
use crate::footer::render_footer;
use crate::header::render_header;
use crate::keymap::{map_key, KeyAction};
use crate::logs::LogPanel;
use crate::messages::TuiMessage;
use crate::track::{render_track, LaneView};

/// Time between two frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Grid and race: lanes with moving cars.
    Racing,
    /// Winner banner over falling confetti.
    Celebration { winner: ParticipantId },
}

/// TUI application state (Elm Model).
pub struct TuiApp {
    race: RaceHandle,
    rx: Receiver<TuiMessage>,
    /// Current screen.
    pub mode: Mode,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Whether the quit came from the race token rather than a key.
    pub interrupted: bool,
    /// Spinner state, advanced once per frame while celebrating.
    pub spin: usize,
    /// Log panel contents.
    pub logs: LogPanel,
    /// Last known terminal size.
    pub area: Rect,
    confetti: Confetti,
    start_time: Option<Instant>,
    finish_time: Option<Instant>,
}

impl TuiApp {
    /// Create a new TUI app around a launched (not yet started) race.
    #[must_use]
    pub fn new(race: RaceHandle, rx: Receiver<TuiMessage>) -> Self {
        let seed = race.lineup().seed();
        Self {
            race,
            rx,
            mode: Mode::Racing,
            should_quit: false,
            interrupted: false,
            spin: 0,
            logs: LogPanel::new(),
            area: Rect::new(0, 0, 80, 24),
            confetti: Confetti::new(seed),
            start_time: None,
            finish_time: None,
        }
    }

    /// Current race phase as seen by the coordinator.
    #[must_use]
    pub fn phase(&self) -> RacePhase {
        self.race.coordinator().phase()
    }

    #[must_use]
    pub fn confetti(&self) -> &Confetti {
        &self.confetti
    }

    /// Update the model with incoming messages (Elm Update).
    ///
    /// Also polls the coordinator so a dropped finish message cannot keep
    /// the celebration from starting, and quits once the race token was
    /// cancelled from outside (Ctrl+C).
    pub fn update(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
        }
        if let (Mode::Racing, Some(winner)) = (self.mode, self.race.coordinator().winner()) {
            self.celebrate(winner);
        }
        if !self.should_quit && self.race.is_cancelled() {
            debug!("race cancelled, leaving the race screen");
            self.should_quit = true;
            self.interrupted = true;
        }
    }

    /// Handle a single message.
    pub fn handle_message(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::Started => {
                self.start_time.get_or_insert_with(Instant::now);
                self.logs.push("Race started".into());
            }
            TuiMessage::Finished { winner } => self.celebrate(winner),
            TuiMessage::Log(line) => self.logs.push(line),
            TuiMessage::Tick => self.on_frame(),
            TuiMessage::Resize { width, height } => {
                self.area = Rect::new(0, 0, width, height);
            }
            TuiMessage::KeyPress(action) => self.handle_key_action(action),
        }
    }

    /// Handle a keyboard action.
    pub fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Start => {
                if self.mode == Mode::Racing && self.race.start() {
                    self.handle_message(TuiMessage::Started);
                }
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::ScrollUp => self.logs.scroll_up(),
            KeyAction::ScrollDown => self.logs.scroll_down(),
            KeyAction::None => {}
        }
    }

    /// Enter celebration mode once, on the finish edge.
    fn celebrate(&mut self, winner: ParticipantId) {
        if self.mode != Mode::Racing {
            return;
        }
        debug!(%winner, "celebration started");
        self.mode = Mode::Celebration { winner };
        self.finish_time = Some(Instant::now());
        self.confetti.burst(self.area, CONFETTI_COUNT);
        let name = self
            .race
            .lineup()
            .get(winner)
            .map_or_else(|| winner.to_string(), |e| format!("{} {}", e.name, e.id));
        self.logs.push(format!("{name} wins"));
    }

    /// Advance per-frame animation state.
    fn on_frame(&mut self) {
        if let Mode::Celebration { .. } = self.mode {
            self.spin = self.spin.wrapping_add(1);
            self.confetti.fall(self.area);
        }
    }

    /// Time on the clock: running since the start, frozen at the finish.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        let start = self.start_time?;
        Some(match self.finish_time {
            Some(end) => end.saturating_duration_since(start),
            None => start.elapsed(),
        })
    }

    fn lane_views(&self) -> Vec<LaneView> {
        self.race
            .lanes()
            .iter()
            .map(|lane| LaneView {
                entrant: lane.entrant,
                position: lane.state.snapshot().position,
            })
            .collect()
    }

    fn winner_entrant(&self) -> Option<Entrant> {
        match self.mode {
            Mode::Celebration { winner } => self.race.lineup().get(winner).copied(),
            Mode::Racing => None,
        }
    }

    /// Compute the layout.
    ///
    /// Returns (header, track, logs, footer) rects.
    #[must_use]
    pub fn compute_layout(area: Rect) -> (Rect, Rect, Rect, Rect) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),  // header
                Constraint::Length(12), // four lanes
                Constraint::Min(3),     // log
                Constraint::Length(2),  // footer
            ])
            .split(area);
        (outer[0], outer[1], outer[2], outer[3])
    }

    /// Render the full TUI view.
    pub fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        let (header_area, track_area, log_area, footer_area) = Self::compute_layout(area);
        let phase = self.phase();

        render_header(frame, header_area, phase, self.elapsed(), self.race.lineup().seed());
        render_track(frame, track_area, &self.lane_views());
        self.logs.render(frame, log_area);
        render_footer(frame, footer_area, phase);

        if let Some(winner) = self.winner_entrant() {
            frame.render_widget(&self.confetti, area);
            render_celebration(frame, area, &winner, self.spin);
        }
    }

    /// Set up the terminal for TUI mode.
    pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        enter_alternate_screen(&mut stdout, terminal::disable_raw_mode)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    /// Tear down the terminal, restoring normal mode.
    pub fn teardown_terminal(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Run the TUI event loop until the user quits.
    ///
    /// The terminal is restored even when drawing fails.
    pub fn run(&mut self) -> Result<(), RaceError> {
        let mut terminal = Self::setup_terminal()?;
        if let Ok(size) = terminal.size() {
            self.area = Rect::new(0, 0, size.width, size.height);
        }
        let result = self.event_loop(&mut terminal);
        Self::teardown_terminal(&mut terminal)?;
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<(), RaceError> {
        let mut last_frame = Instant::now();
        loop {
            terminal.draw(|frame| self.render(frame))?;
            if self.should_quit {
                return Ok(());
            }

            let timeout = FRAME_INTERVAL.saturating_sub(last_frame.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => self.handle_message(TuiMessage::KeyPress(map_key(key))),
                    Event::Resize(width, height) => {
                        self.handle_message(TuiMessage::Resize { width, height });
                    }
                    _ => {}
                }
            }

            self.update();
            if last_frame.elapsed() >= FRAME_INTERVAL {
                self.handle_message(TuiMessage::Tick);
                last_frame = Instant::now();
            }
        }
    }

    /// Stop the workers, join them, and summarize the race.
    pub fn finish(self) -> Result<RaceSummary, RaceError> {
        if !self.race.coordinator().is_finished() {
            self.race.stop();
        }
        self.race.join()
    }
}

/// Switch `out` to the alternate screen, running `undo_raw_mode` if that fails.
fn enter_alternate_screen<W: io::Write>(
    out: &mut W,
    undo_raw_mode: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    if let Err(err) = execute!(out, EnterAlternateScreen) {
        let _ = undo_raw_mode();
        return Err(err);
    }
    Ok(())
}

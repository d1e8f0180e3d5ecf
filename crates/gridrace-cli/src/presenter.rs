//! CLI result presenter.

use gridrace_orchestration::interfaces::{RaceSummary, ResultPresenter};

use crate::output::{format_json, format_summary};
use crate::ui;

/// How a finished race is printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable report.
    Text,
    /// Only the winner's id.
    Quiet,
    /// Pretty-printed JSON summary.
    Json,
}

impl OutputMode {
    /// Pick the mode from the CLI flags; JSON wins over quiet.
    #[must_use]
    pub fn from_flags(quiet: bool, json: bool) -> Self {
        if json {
            Self::Json
        } else if quiet {
            Self::Quiet
        } else {
            Self::Text
        }
    }
}

/// CLI result presenter.
pub struct CLIResultPresenter {
    mode: OutputMode,
    verbose: bool,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(mode: OutputMode, verbose: bool) -> Self {
        Self { mode, verbose }
    }

    /// Text that [`present_summary`](ResultPresenter::present_summary) prints.
    #[must_use]
    pub fn render(&self, summary: &RaceSummary) -> String {
        match self.mode {
            OutputMode::Quiet => summary.winner.0.to_string(),
            OutputMode::Json => format_json(summary).unwrap_or_else(|e| {
                tracing::error!(error = %e, "failed to serialize race summary");
                String::from("{}")
            }),
            OutputMode::Text => format_summary(summary, self.verbose),
        }
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_summary(&self, summary: &RaceSummary) {
        if self.mode == OutputMode::Text {
            ui::print_header("Race finished");
            ui::print_winner(summary.winner_name().as_str(), summary.winner);
        }
        let rendered = self.render(summary);
        println!("{}", rendered.trim_end());
    }

    fn present_error(&self, error: &str) {
        ui::print_error(error);
    }
}

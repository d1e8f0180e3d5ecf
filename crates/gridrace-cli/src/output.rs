//! CLI output formatting.

use std::fmt::Write as _;
use std::time::Duration;

use gridrace_orchestration::interfaces::RaceSummary;

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a fraction as a percentage with one decimal.
#[must_use]
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Multi-line text report of a race.
#[must_use]
pub fn format_summary(summary: &RaceSummary, verbose: bool) -> String {
    let mut out = String::new();
    let winner = summary.winner_entry();
    let _ = writeln!(
        out,
        "Winner: {} {}{}",
        summary.winner_name(),
        summary.winner,
        winner.map_or_else(String::new, |w| format!(" ({})", w.entrant.profile)),
    );
    let _ = writeln!(out, "Elapsed: {}", format_duration(summary.elapsed));
    if let Some(seed) = summary.seed {
        let _ = writeln!(out, "Seed: {seed}");
    }

    let _ = writeln!(out, "{:-<60}", "");
    for entry in &summary.entrants {
        let _ = write!(
            out,
            "  {:<3} {:<7} {:<17} {:>7} {:>6} ticks",
            entry.entrant.id.to_string(),
            entry.entrant.name,
            entry.entrant.profile.name(),
            format_percent(entry.progress),
            entry.ticks,
        );
        if verbose {
            let _ = write!(out, "  position {:.3}  {:?}", entry.position, entry.exit);
        }
        out.push('\n');
    }
    out
}

/// JSON report of a race.
pub fn format_json(summary: &RaceSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

//! Application configuration from CLI flags and environment.

use std::time::Duration;

use clap::Parser;

use gridrace_core::options::RaceOptions;

/// GridRace: four cars race to a shared finish line, each on its own easing curve.
#[derive(Parser, Debug)]
#[command(name = "gridrace", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Seed for the profile assignment (and the round order with --deterministic).
    #[arg(long, env = "GRIDRACE_SEED")]
    pub seed: Option<u64>,

    /// Raw progress added to each car per tick, in (0, 1].
    #[arg(long, default_value = "0.001")]
    pub delta: f64,

    /// Milliseconds between two ticks of a car.
    #[arg(long, default_value = "5")]
    pub tick_ms: u64,

    /// Give up on a headless race after this long (e.g. "30s", "5m", "500ms").
    #[arg(long, default_value = "5m", value_parser = parse_duration)]
    pub timeout: Duration,

    /// Play seeded rounds on one thread instead of racing real threads.
    #[arg(long, conflicts_with = "tui")]
    pub deterministic: bool,

    /// Let a car finish as soon as its eased position saturates.
    #[arg(long)]
    pub snap_on_saturation: bool,

    /// Launch the interactive race screen.
    #[arg(long)]
    pub tui: bool,

    /// Print only the winner's id.
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the race summary as JSON.
    #[arg(long)]
    pub json: bool,

    /// Add raw progress to the text report.
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Simulation knobs for this run.
    #[must_use]
    pub fn race_options(&self) -> RaceOptions {
        RaceOptions {
            delta: self.delta,
            tick_interval: Duration::from_millis(self.tick_ms),
            seed: self.seed,
            snap_on_saturation: self.snap_on_saturation,
        }
    }
}

/// Parse a duration string like "5m", "1h", "30s", "250ms" or a bare number of seconds.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let (digits, unit_ms) = if let Some(ms) = s.strip_suffix("ms") {
        (ms, 1)
    } else if let Some(secs) = s.strip_suffix('s') {
        (secs, 1_000)
    } else if let Some(mins) = s.strip_suffix('m') {
        (mins, 60_000)
    } else if let Some(hours) = s.strip_suffix('h') {
        (hours, 3_600_000)
    } else {
        (s, 1_000)
    };
    let n: u64 = digits
        .parse()
        .map_err(|_| format!("invalid duration '{s}'"))?;
    n.checked_mul(unit_ms)
        .map(Duration::from_millis)
        .ok_or_else(|| format!("duration '{s}' is too long"))
}

//! Application entry point and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use gridrace_cli::presenter::{CLIResultPresenter, OutputMode};
use gridrace_cli::LaneBars;
use gridrace_core::error::RaceError;
use gridrace_core::lineup::Lineup;
use gridrace_core::observer::ObserverSet;
use gridrace_core::observers::LoggingObserver;
use gridrace_core::options::RaceOptions;
use gridrace_core::progress::CancellationToken;
use gridrace_orchestration::interfaces::ResultPresenter;
use gridrace_orchestration::lockstep::LockstepRace;
use gridrace_orchestration::orchestrator::launch_race;
use gridrace_tui::{TuiApp, TuiBridgeObserver, TuiMessage};

use crate::config::AppConfig;

/// Minimum gap between two progress log lines.
const LOG_INTERVAL_MS: u64 = 250;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        gridrace_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    let presenter = CLIResultPresenter::new(
        OutputMode::from_flags(config.quiet, config.json),
        config.verbose,
    );
    let opts = config.race_options();

    let result = if config.deterministic {
        run_deterministic(&opts, &presenter)
    } else if config.tui {
        run_tui(&opts, &presenter)
    } else {
        run_cli(config, &opts, &presenter)
    };

    if let Err(err) = &result {
        presenter.present_error(&format!("{err:#}"));
    }
    result
}

/// Headless race: real threads, progress bars on stderr, report on stdout.
fn run_cli(config: &AppConfig, opts: &RaceOptions, presenter: &CLIResultPresenter) -> Result<()> {
    let lineup = Lineup::assign(opts.seed);
    let bars = Arc::new(if config.quiet || config.json {
        LaneBars::hidden(&lineup)
    } else {
        LaneBars::new(&lineup)
    });

    let observers = ObserverSet::new();
    observers.register(bars.clone());
    observers.register(Arc::new(LoggingObserver::new(LOG_INTERVAL_MS)));

    let cancel = CancellationToken::new();
    ctrlc_handler(cancel.clone())?;

    let mut race = launch_race(&lineup, opts, Arc::new(observers), cancel)
        .context("failed to launch race")?;
    race.start();
    let result = race.wait(config.timeout);
    bars.finish();

    let summary = result.context("race did not finish")?;
    presenter.present_summary(&summary);
    Ok(())
}

/// Interactive race: the user starts it with Space and leaves with Esc or q.
///
/// Leaving by key before a winner is not an error; Ctrl+C is, as in a
/// headless race.
fn run_tui(opts: &RaceOptions, presenter: &CLIResultPresenter) -> Result<()> {
    let lineup = Lineup::assign(opts.seed);

    // Unbounded: the finish message is sent blocking from a worker thread.
    let (tx, rx) = crossbeam_channel::unbounded::<TuiMessage>();

    let observers = ObserverSet::new();
    observers.register(Arc::new(TuiBridgeObserver::new(tx.clone())));
    observers.register(Arc::new(LoggingObserver::new(LOG_INTERVAL_MS)));

    let cancel = CancellationToken::new();
    ctrlc_handler(cancel.clone())?;

    let race = launch_race(&lineup, opts, Arc::new(observers), cancel)
        .context("failed to launch race")?;
    for entrant in lineup.entrants() {
        let _ = tx.send(TuiMessage::Log(format!(
            "{} {} runs {}",
            entrant.name,
            entrant.id,
            entrant.profile.name()
        )));
    }

    let mut app = TuiApp::new(race, rx);
    app.run().context("race screen failed")?;

    let interrupted = app.interrupted;
    match app.finish() {
        Ok(summary) => {
            presenter.present_summary(&summary);
            Ok(())
        }
        Err(RaceError::Cancelled) if !interrupted => {
            info!("left the race screen before a winner");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Seeded single-threaded race; the same seed always prints the same result.
fn run_deterministic(opts: &RaceOptions, presenter: &CLIResultPresenter) -> Result<()> {
    let seed = opts.seed.unwrap_or_else(rand::random);
    let lineup = Lineup::assign(Some(seed));
    let mut race =
        LockstepRace::with_observer(&lineup, opts, Arc::new(LoggingObserver::new(LOG_INTERVAL_MS)))
            .context("failed to set up race")?;
    let summary = race.run_seeded(seed)?;
    presenter.present_summary(&summary);
    Ok(())
}

fn ctrlc_handler(cancel: CancellationToken) -> Result<()> {
    ctrlc::set_handler(move || {
        cancel.cancel();
    })
    .context("failed to install Ctrl+C handler")
}

//! Error type shared by the race crates.

/// Error type for race setup and execution.
///
/// Losing the finalize race is not represented here: a worker that finds the
/// race already finished simply stops.
#[derive(Debug, thiserror::Error)]
pub enum RaceError {
    /// Invalid race configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A worker thread could not be created; the race never started.
    #[error("failed to spawn worker for participant {id}: {source}")]
    WorkerSpawn {
        id: u32,
        #[source]
        source: std::io::Error,
    },

    /// A worker thread panicked while the race was running.
    #[error("worker for participant {0} panicked")]
    WorkerPanicked(u32),

    /// The race was stopped before a winner was declared.
    #[error("race cancelled")]
    Cancelled,

    /// The race did not finish before its deadline.
    #[error("race timed out after {0}")]
    Timeout(String),

    /// Terminal setup or teardown failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

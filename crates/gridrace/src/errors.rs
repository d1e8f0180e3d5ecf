//! Error handling and exit codes.

use gridrace_core::constants::exit_codes;
use gridrace_core::error::RaceError;

/// Exit code for a race error.
#[must_use]
pub fn handle_error(err: &RaceError) -> i32 {
    match err {
        RaceError::Config(_) => exit_codes::ERROR_CONFIG,
        RaceError::Cancelled => exit_codes::ERROR_CANCELED,
        RaceError::Timeout(_) => exit_codes::ERROR_TIMEOUT,
        RaceError::WorkerSpawn { .. } | RaceError::WorkerPanicked(_) | RaceError::Terminal(_) => {
            exit_codes::ERROR_GENERIC
        }
    }
}

/// Exit code for an application error, looking through its context chain.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<RaceError>())
        .map_or(exit_codes::ERROR_GENERIC, handle_error)
}

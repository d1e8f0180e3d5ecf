//! GridRace library: configuration and mode dispatch for the `gridrace` binary.

pub mod app;
pub mod config;
pub mod errors;

//! Cross-crate race scenarios live under `tests/`; this crate has no API.

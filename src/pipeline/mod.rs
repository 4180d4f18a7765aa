//! One-call frame generation driven by a JSON config.

/// Run configuration.
pub mod config;
/// Load, sample and encode.
pub mod run;

//! Errors, frame rates and number helpers shared by every layer.

/// Frame rate and duration validation.
pub mod core;
/// Error type and result alias.
pub mod error;
pub(crate) mod number;

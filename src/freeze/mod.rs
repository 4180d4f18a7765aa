//! The freezing engine: duration analysis, snapshot baking, sampling and encoding.

/// Total sampling duration.
pub mod duration;
/// Snapshot encoding into data URIs.
pub mod encoder;
/// Baking animation state into static snapshots.
pub mod freezer;
/// Fixed-rate sampling.
pub mod sampler;
/// Frame sequences and ordered encoding.
pub mod sequence;

//! SMIL animation support: directive discovery, timing, values and live evaluation.

/// Directive kinds and the per-document directive index.
pub mod directive;
/// Animated values of a document at one instant.
pub mod evaluator;
/// `calcMode`, `keyTimes` and `keySplines`.
pub mod interpolate;
/// Parsed animation elements and per-animation sampling.
pub mod model;
/// Clock values, intervals and active duration.
pub mod timing;
/// Transform lists.
pub mod transform;
/// Typed animation values.
pub mod value;

//! svgframes freezes SMIL-animated SVG documents into fixed-rate sequences of static
//! frames.
//!
//! # Pipeline overview
//!
//! 1. **Load**: markup -> [`AnimatedDocument`] (arena tree, directive index, shared
//!    [`Timeline`])
//! 2. **Analyze**: [`DurationAnalyzer`] picks how long to sample
//! 3. **Freeze**: [`AnimationFreezer`] bakes the animated state at one instant into a
//!    [`Snapshot`] (animation elements are still present in its tree)
//! 4. **Sample**: [`FrameSampler`] freezes at `0, 1/fps, 2/fps, ...` below the duration
//! 5. **Encode**: [`SnapshotEncoder`] neutralizes every animation element and turns
//!    snapshots into SVG or PNG data URIs collected in a [`FrameSequence`]
//!
//! The source document is never modified; freezing works on a deep clone and the
//! timeline position is restored after every freeze.
//!
//! # Getting started
//!
//! ```no_run
//! let frames = svgframes::svg_to_frames(
//!     r#"<svg><rect><animate attributeName="x" from="0" to="10" dur="1s"/></rect></svg>"#,
//!     30.0,
//! )?;
//! for frame in frames.iter() {
//!     println!("{:.3}s {}", frame.time(), frame.src().len());
//! }
//! # Ok::<(), svgframes::FramesError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// SMIL animation model and live evaluation.
pub mod animation;
/// Document tree, parsing and timeline.
pub mod document;
/// Freezing, sampling and encoding.
pub mod freeze;
/// Config-driven frame generation.
pub mod pipeline;

pub use animation::directive::{
    Directive, DirectiveFamily, DirectiveIndex, DirectiveKind, Namespace,
};
pub use animation::evaluator::Evaluator;
pub use animation::model::{AnimationModel, AnimationSpec};
pub use animation::transform::TransformItem;
pub use animation::value::AnimValue;
pub use document::animated::{AnimatedDocument, DocumentSeek};
pub use document::timeline::Timeline;
pub use document::tree::{NodeId, Tree};
pub use foundation::core::FrameRate;
pub use foundation::error::{FramesError, FramesResult};
pub use freeze::duration::{DurationAnalyzer, DurationPolicy};
pub use freeze::encoder::{EncodeOptions, Frame, FrameFormat, SnapshotEncoder};
pub use freeze::freezer::{AnimationFreezer, Correspondence, FreezeOptions, Snapshot};
pub use freeze::sampler::{
    CancelToken, DEFAULT_MAX_FRAMES, FailurePolicy, FrameSampler, PartialSamples, SampleError,
    SampleOptions,
};
pub use freeze::sequence::{EncodeThreading, FrameSequence, encode_snapshots};
pub use pipeline::config::FramesConfig;
pub use pipeline::run::{
    FrameGeneration, SvgSource, generate_frames, generate_frames_with_cancel, svg_to_frames,
};

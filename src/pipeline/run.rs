use std::path::{Path, PathBuf};

use crate::{
    document::animated::AnimatedDocument,
    foundation::error::FramesResult,
    freeze::{
        encoder::{EncodeOptions, SnapshotEncoder},
        sampler::{CancelToken, FailurePolicy, FrameSampler, SampleError, SampleOptions},
        sequence::{EncodeThreading, FrameSequence, encode_snapshots},
    },
    pipeline::config::{FramesConfig, is_inline_markup},
};

/// Where the SVG document comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SvgSource {
    /// Markup given directly.
    Inline(String),
    /// A file on disk.
    File(PathBuf),
}

impl SvgSource {
    /// Markup when `raw` starts with `<`, a file path otherwise.
    pub fn parse(raw: &str) -> Self {
        if is_inline_markup(raw) {
            Self::Inline(raw.to_string())
        } else {
            Self::File(PathBuf::from(raw.trim()))
        }
    }

    /// Load and parse the document.
    pub fn load(&self) -> FramesResult<AnimatedDocument> {
        match self {
            Self::Inline(text) => AnimatedDocument::parse_str(text),
            Self::File(path) => AnimatedDocument::from_path(path),
        }
    }

    /// Directory relative references inside the document resolve against.
    pub fn resources_dir(&self) -> Option<PathBuf> {
        match self {
            Self::Inline(_) => None,
            Self::File(path) => path.parent().map(Path::to_path_buf),
        }
    }
}

/// Output of [`generate_frames`].
#[derive(Debug)]
pub struct FrameGeneration {
    /// Encoded frames in sample order.
    pub sequence: FrameSequence,
    /// Sampled duration in seconds.
    pub duration: f64,
    /// Isolated failures (always empty under [`FailurePolicy::AbortAll`]).
    pub errors: Vec<SampleError>,
    /// Whether an isolated run was cut short by cancellation.
    pub cancelled: bool,
}

/// Load, sample and encode in one call.
pub fn generate_frames(config: &FramesConfig) -> FramesResult<FrameGeneration> {
    generate_frames_with_cancel(config, None)
}

/// [`generate_frames`] with a cancellation token checked between samples.
#[tracing::instrument(skip(config, cancel), fields(source_len = config.source.len()))]
pub fn generate_frames_with_cancel(
    config: &FramesConfig,
    cancel: Option<CancelToken>,
) -> FramesResult<FrameGeneration> {
    config.validate()?;
    let source = SvgSource::parse(&config.source);
    let mut doc = source.load()?;

    let sampler = FrameSampler::new(SampleOptions {
        cancel,
        ..config.sample_options()
    })?;
    let duration = sampler.duration_of(&doc);

    let (snapshots, errors, cancelled) = match config.failure_policy {
        FailurePolicy::AbortAll => (sampler.sample(&mut doc)?, Vec::new(), false),
        FailurePolicy::Isolate => {
            let partial = sampler.sample_partial(&mut doc);
            (partial.snapshots, partial.errors, partial.cancelled)
        }
    };

    let encoder = SnapshotEncoder::new(config.encode_options(source.resources_dir()))?;
    let sequence = encode_snapshots(
        &encoder,
        &snapshots,
        sampler.frame_rate(),
        &config.threading(),
    )?;
    tracing::info!(
        frames = sequence.len(),
        duration,
        errors = errors.len(),
        "generated frames"
    );

    Ok(FrameGeneration {
        sequence,
        duration,
        errors,
        cancelled,
    })
}

/// Freeze animated SVG markup into SVG frames at `frame_rate`, with every other setting at
/// its default.
pub fn svg_to_frames(svg: &str, frame_rate: f64) -> FramesResult<FrameSequence> {
    let sampler = FrameSampler::new(SampleOptions::with_frame_rate(frame_rate))?;
    let mut doc = AnimatedDocument::parse_str(svg)?;
    let snapshots = sampler.sample(&mut doc)?;
    let encoder = SnapshotEncoder::new(EncodeOptions::default())?;
    encode_snapshots(
        &encoder,
        &snapshots,
        sampler.frame_rate(),
        &EncodeThreading::default(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/run.rs"]
mod tests;

//! Fixed-rate sampling of a document timeline.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    document::animated::AnimatedDocument,
    foundation::{
        core::{FrameRate, validate_duration},
        error::{FramesError, FramesResult},
    },
    freeze::{
        duration::{DurationAnalyzer, DurationPolicy},
        freezer::{AnimationFreezer, FreezeOptions, Snapshot},
    },
};

/// Default cap on the number of samples one run may produce.
pub const DEFAULT_MAX_FRAMES: usize = 10_000;

/// Cooperative cancellation flag, checked between two samples.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, not yet cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Every clone of the token observes it.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What a sampling run does when one sample fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailurePolicy {
    /// The first failure aborts the run and no snapshots are returned.
    #[default]
    AbortAll,
    /// Failures are recorded and the run continues (see [`FrameSampler::sample_partial`]).
    Isolate,
}

/// Options for [`FrameSampler`].
#[derive(Clone, Debug)]
pub struct SampleOptions {
    /// Samples per second.
    pub frame_rate: f64,
    /// Explicit duration in seconds; analyzed from the document when `None`.
    pub duration: Option<f64>,
    /// How the duration is analyzed when not given.
    pub duration_policy: DurationPolicy,
    /// Upper bound on produced samples.
    pub max_frames: usize,
    /// Freezer options.
    pub freeze: FreezeOptions,
    /// Optional cancellation flag.
    pub cancel: Option<CancelToken>,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            frame_rate: 30.0,
            duration: None,
            duration_policy: DurationPolicy::default(),
            max_frames: DEFAULT_MAX_FRAMES,
            freeze: FreezeOptions::default(),
            cancel: None,
        }
    }
}

impl SampleOptions {
    /// Default options at `frame_rate`.
    pub fn with_frame_rate(frame_rate: f64) -> Self {
        Self {
            frame_rate,
            ..Self::default()
        }
    }
}

/// A sample that could not be produced.
#[derive(Debug)]
pub struct SampleError {
    /// Ordinal of the sample.
    pub index: usize,
    /// Sample time in seconds.
    pub time: f64,
    /// What went wrong.
    pub error: FramesError,
}

/// Result of [`FrameSampler::sample_partial`].
#[derive(Debug, Default)]
pub struct PartialSamples {
    /// Snapshots that were produced, in sample order.
    pub snapshots: Vec<Snapshot>,
    /// Failures, in sample order.
    pub errors: Vec<SampleError>,
    /// Whether the run stopped because of the cancel token.
    pub cancelled: bool,
}

/// Drives an [`AnimationFreezer`] across `[0, duration)` at a fixed step.
#[derive(Clone, Debug)]
pub struct FrameSampler {
    rate: FrameRate,
    options: SampleOptions,
    freezer: AnimationFreezer,
}

impl FrameSampler {
    /// Validate `options`. Fails with [`FramesError::InvalidFrameRate`] for a zero,
    /// negative or non-finite rate.
    pub fn new(options: SampleOptions) -> FramesResult<Self> {
        let rate = FrameRate::new(options.frame_rate)?;
        if let Some(d) = options.duration {
            validate_duration(d)?;
        }
        if options.max_frames == 0 {
            return Err(FramesError::validation("max_frames must be >= 1"));
        }
        Ok(Self {
            rate,
            freezer: AnimationFreezer::new(options.freeze),
            options,
        })
    }

    /// Validated frame rate.
    pub fn frame_rate(&self) -> FrameRate {
        self.rate
    }

    /// Options the sampler was built with.
    pub fn options(&self) -> &SampleOptions {
        &self.options
    }

    /// Duration that will be sampled for `doc`: the explicit one, or the analyzed one.
    pub fn duration_of(&self, doc: &AnimatedDocument) -> f64 {
        self.options
            .duration
            .unwrap_or_else(|| DurationAnalyzer::analyze(doc, self.options.duration_policy))
    }

    /// Sample times for `duration`: `0, step, 2*step, ...` while below `duration`.
    ///
    /// Times are produced by repeated addition of `1 / rate`, so accumulated rounding can
    /// add one sample: at 10 fps over 1 s the eleventh time is `0.9999999999999999`.
    pub fn sample_times(&self, duration: f64) -> Vec<f64> {
        SampleClock::new(self.rate, duration)
            .take(self.options.max_frames.saturating_add(1))
            .collect()
    }

    /// Freeze `doc` at every sample time. All or nothing: the first failure is returned
    /// and no snapshots are kept.
    #[tracing::instrument(skip(self, doc), fields(rate = self.rate.as_f64()))]
    pub fn sample(&self, doc: &mut AnimatedDocument) -> FramesResult<Vec<Snapshot>> {
        let duration = self.duration_of(doc);
        let limit = self.options.max_frames;
        // Counted on the same clock as the loop so the rounding sample is included.
        let planned = SampleClock::new(self.rate, duration)
            .take(limit.saturating_add(1))
            .count();
        if planned > limit {
            return Err(FramesError::FrameLimitExceeded {
                requested: planned.max(self.rate.ideal_sample_count(duration)),
                limit,
            });
        }

        doc.pause_animations();
        doc.set_current_time(0.0);

        let mut out = Vec::with_capacity(planned + 1);
        for t in SampleClock::new(self.rate, duration) {
            if self.is_cancelled() {
                return Err(FramesError::Cancelled {
                    produced: out.len(),
                });
            }
            out.push(self.freezer.freeze(doc, t)?);
        }
        tracing::debug!(duration, samples = out.len(), "sampled document");
        Ok(out)
    }

    /// Freeze `doc` at every sample time, isolating failures.
    ///
    /// A bad directive is skipped for that sample and reported; the snapshot is kept.
    /// Cancellation and the frame cap stop the run and keep what was produced.
    #[tracing::instrument(skip(self, doc), fields(rate = self.rate.as_f64()))]
    pub fn sample_partial(&self, doc: &mut AnimatedDocument) -> PartialSamples {
        let duration = self.duration_of(doc);
        let limit = self.options.max_frames;
        let mut out = PartialSamples::default();

        doc.pause_animations();
        doc.set_current_time(0.0);

        for (index, t) in SampleClock::new(self.rate, duration).enumerate() {
            if self.is_cancelled() {
                out.cancelled = true;
                break;
            }
            if index >= limit {
                out.errors.push(SampleError {
                    index,
                    time: t,
                    error: FramesError::FrameLimitExceeded {
                        requested: index + 1,
                        limit,
                    },
                });
                break;
            }
            let (snapshot, errors) = self.freezer.freeze_lenient(doc, t);
            out.errors.extend(errors.into_iter().map(|error| SampleError {
                index,
                time: t,
                error,
            }));
            out.snapshots.push(snapshot);
        }
        tracing::debug!(
            duration,
            samples = out.snapshots.len(),
            errors = out.errors.len(),
            cancelled = out.cancelled,
            "sampled document (isolated)"
        );
        out
    }

    fn is_cancelled(&self) -> bool {
        self.options
            .cancel
            .as_ref()
            .is_some_and(CancelToken::is_cancelled)
    }
}

struct SampleClock {
    t: f64,
    step: f64,
    end: f64,
}

impl SampleClock {
    fn new(rate: FrameRate, duration: f64) -> Self {
        Self {
            t: 0.0,
            step: rate.step_secs(),
            end: duration,
        }
    }
}

impl Iterator for SampleClock {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.t >= self.end {
            return None;
        }
        let t = self.t;
        self.t += self.step;
        Some(t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/freeze/sampler.rs"]
mod tests;

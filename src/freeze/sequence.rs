//! Ordered frame sequences and (optionally parallel) snapshot encoding.

use std::time::Duration;

use rayon::prelude::*;

use crate::{
    foundation::{
        core::FrameRate,
        error::{FramesError, FramesResult},
    },
    freeze::{
        encoder::{Frame, SnapshotEncoder},
        freezer::Snapshot,
    },
};

/// Frames of one sampling run, in strictly increasing sample time.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSequence {
    frames: Vec<Frame>,
    rate: FrameRate,
}

impl FrameSequence {
    /// Wrap already ordered frames.
    pub fn new(frames: Vec<Frame>, rate: FrameRate) -> Self {
        Self { frames, rate }
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when the run produced nothing (zero duration).
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame by sequence index.
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Frame to show on playback tick `tick`: wraps around, `None` when empty.
    pub fn at_playback(&self, tick: usize) -> Option<&Frame> {
        if self.frames.is_empty() {
            return None;
        }
        self.frames.get(tick % self.frames.len())
    }

    /// Endless playback order: every frame, then again from the start.
    pub fn playback(&self) -> impl Iterator<Item = &Frame> + '_ {
        self.frames.iter().cycle()
    }

    /// Rate the sequence was sampled at.
    pub fn frame_rate(&self) -> FrameRate {
        self.rate
    }

    /// Time between two playback ticks.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(self.rate.step_secs())
    }

    /// All frames in order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Iterate frames in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Take the frames.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Encoding parallelism.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodeThreading {
    /// Encode on a rayon pool.
    pub parallel: bool,
    /// Pool size; rayon's default when `None`.
    pub threads: Option<usize>,
}

/// Encode `snapshots` into a sequence. Frame `i` always comes from snapshot `i`, with or
/// without parallelism.
#[tracing::instrument(skip(encoder, snapshots), fields(count = snapshots.len()))]
pub fn encode_snapshots(
    encoder: &SnapshotEncoder,
    snapshots: &[Snapshot],
    rate: FrameRate,
    threading: &EncodeThreading,
) -> FramesResult<FrameSequence> {
    let frames = if threading.parallel && snapshots.len() > 1 {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            snapshots
                .par_iter()
                .enumerate()
                .map(|(i, s)| encoder.encode(i, s))
                .collect::<FramesResult<Vec<_>>>()
        })?
    } else {
        snapshots
            .iter()
            .enumerate()
            .map(|(i, s)| encoder.encode(i, s))
            .collect::<FramesResult<Vec<_>>>()?
    };
    Ok(FrameSequence::new(frames, rate))
}

fn build_thread_pool(threads: Option<usize>) -> FramesResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FramesError::validation(
            "encode threading 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FramesError::encode(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/freeze/sequence.rs"]
mod tests;

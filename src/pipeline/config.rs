use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{FrameRate, validate_duration},
        error::{FramesError, FramesResult},
    },
    freeze::{
        duration::DurationPolicy,
        encoder::{EncodeOptions, FrameFormat},
        freezer::{Correspondence, FreezeOptions},
        sampler::{DEFAULT_MAX_FRAMES, FailurePolicy, SampleOptions},
        sequence::EncodeThreading,
    },
};

fn default_frame_rate() -> f64 {
    30.0
}

fn default_max_frames() -> usize {
    DEFAULT_MAX_FRAMES
}

fn default_raster_scale() -> f64 {
    1.0
}

/// Everything one frame generation run needs, as read from JSON (camelCase keys).
///
/// ```json
/// { "source": "spinner.svg", "frameRate": 24, "format": "png", "failurePolicy": "isolate" }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FramesConfig {
    /// SVG file path, or inline markup when it starts with `<`.
    pub source: String,
    /// Samples per second.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    /// Explicit duration in seconds; analyzed when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Duration analysis method.
    #[serde(default)]
    pub duration_policy: DurationPolicy,
    /// Cap on produced frames.
    #[serde(default = "default_max_frames")]
    pub max_frames: usize,
    /// Frame payload type.
    #[serde(default)]
    pub format: FrameFormat,
    /// Raster scale for PNG frames.
    #[serde(default = "default_raster_scale")]
    pub raster_scale: f64,
    /// Strict or isolated failure handling.
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    /// Directive matching strategy.
    #[serde(default)]
    pub correspondence: Correspondence,
    /// Encode frames on a thread pool.
    #[serde(default)]
    pub parallel_encode: bool,
    /// Thread pool size for parallel encoding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

impl FramesConfig {
    /// Defaults for everything but the source and rate.
    pub fn new(source: impl Into<String>, frame_rate: f64) -> Self {
        Self {
            source: source.into(),
            frame_rate,
            duration: None,
            duration_policy: DurationPolicy::default(),
            max_frames: DEFAULT_MAX_FRAMES,
            format: FrameFormat::default(),
            raster_scale: default_raster_scale(),
            failure_policy: FailurePolicy::default(),
            correspondence: Correspondence::default(),
            parallel_encode: false,
            threads: None,
        }
    }

    /// Parse a JSON config.
    pub fn from_json_str(text: &str) -> FramesResult<Self> {
        let config = serde_json::from_str(text).context("parse frames config JSON")?;
        Ok(config)
    }

    /// Read a JSON config file. A relative `source` path is resolved against the file's
    /// directory.
    pub fn from_path(path: &Path) -> FramesResult<Self> {
        let f =
            File::open(path).with_context(|| format!("open frames config '{}'", path.display()))?;
        let mut config: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse frames config '{}'", path.display()))?;
        if !is_inline_markup(&config.source) {
            let source = Path::new(config.source.trim());
            if source.is_relative()
                && let Some(dir) = path.parent()
            {
                config.source = dir.join(source).to_string_lossy().into_owned();
            }
        }
        Ok(config)
    }

    /// Check every field before any work starts.
    pub fn validate(&self) -> FramesResult<()> {
        if self.source.trim().is_empty() {
            return Err(FramesError::validation("source must be non-empty"));
        }
        FrameRate::new(self.frame_rate)?;
        if let Some(d) = self.duration {
            validate_duration(d)?;
        }
        if self.max_frames == 0 {
            return Err(FramesError::validation("maxFrames must be >= 1"));
        }
        if !self.raster_scale.is_finite() || self.raster_scale <= 0.0 {
            return Err(FramesError::validation(
                "rasterScale must be a finite number > 0",
            ));
        }
        if self.threads == Some(0) {
            return Err(FramesError::validation("threads must be >= 1 when set"));
        }
        Ok(())
    }

    /// Sampler options derived from this config.
    pub fn sample_options(&self) -> SampleOptions {
        SampleOptions {
            frame_rate: self.frame_rate,
            duration: self.duration,
            duration_policy: self.duration_policy,
            max_frames: self.max_frames,
            freeze: FreezeOptions {
                correspondence: self.correspondence,
            },
            cancel: None,
        }
    }

    /// Encoder options derived from this config.
    pub fn encode_options(&self, resources_dir: Option<PathBuf>) -> EncodeOptions {
        EncodeOptions {
            format: self.format,
            raster_scale: self.raster_scale,
            resources_dir,
        }
    }

    /// Encoding parallelism derived from this config.
    pub fn threading(&self) -> EncodeThreading {
        EncodeThreading {
            parallel: self.parallel_encode,
            threads: self.threads,
        }
    }
}

pub(crate) fn is_inline_markup(source: &str) -> bool {
    source.trim_start().starts_with('<')
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/config.rs"]
mod tests;

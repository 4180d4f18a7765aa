use crate::foundation::error::{FramesError, FramesResult};

/// Samples per second used to step through an animation timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FrameRate(f64);

impl FrameRate {
    /// Validate and wrap a sampling rate. Rejects zero, negative and non-finite values.
    pub fn new(rate: f64) -> FramesResult<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(FramesError::InvalidFrameRate(rate));
        }
        Ok(Self(rate))
    }

    /// Rate as samples per second.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Time between two consecutive samples, in seconds.
    pub fn step_secs(self) -> f64 {
        1.0 / self.0
    }

    /// Ideal number of samples in `[0, duration)`, ignoring float accumulation.
    pub fn ideal_sample_count(self, duration_secs: f64) -> usize {
        if duration_secs <= 0.0 {
            return 0;
        }
        (duration_secs * self.0).ceil() as usize
    }
}

impl TryFrom<f64> for FrameRate {
    type Error = FramesError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FrameRate> for f64 {
    fn from(value: FrameRate) -> Self {
        value.0
    }
}

/// Validate a sampling duration in seconds.
pub(crate) fn validate_duration(secs: f64) -> FramesResult<f64> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(FramesError::validation(format!(
            "duration must be a finite number >= 0, got {secs}"
        )));
    }
    Ok(secs)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

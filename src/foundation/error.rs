/// Convenience result type used across svgframes.
pub type FramesResult<T> = Result<T, FramesError>;

/// Top-level error taxonomy used by the freezing and sampling APIs.
#[derive(thiserror::Error, Debug)]
pub enum FramesError {
    /// Invalid user-provided options or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The source document could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// An animation directive has no (or an empty) `attributeName`.
    #[error("missing attribute name: <{element}> has no 'attributeName'")]
    MissingAttributeName {
        /// Tag name of the offending directive.
        element: String,
    },

    /// A directive, or its counterpart in the snapshot clone, has no element to animate.
    #[error("unresolvable target: <{element}> {reason}")]
    UnresolvableTarget {
        /// Tag name of the offending directive.
        element: String,
        /// What could not be resolved.
        reason: String,
    },

    /// Frame rate was zero, negative or not finite.
    #[error("invalid frame rate: {0} (must be a finite number > 0)")]
    InvalidFrameRate(f64),

    /// Sampling would exceed the configured frame cap.
    #[error("frame limit exceeded: {requested} frames requested, limit is {limit}")]
    FrameLimitExceeded {
        /// Number of frames the run needs (or has reached).
        requested: usize,
        /// Configured cap.
        limit: usize,
    },

    /// Sampling was cancelled between two samples.
    #[error("sampling cancelled after {produced} frames")]
    Cancelled {
        /// Number of snapshots produced before cancellation.
        produced: usize,
    },

    /// A snapshot could not be encoded into a frame.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramesError {
    /// Build a [`FramesError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramesError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`FramesError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`FramesError::MissingAttributeName`] value.
    pub fn missing_attribute_name(element: impl Into<String>) -> Self {
        Self::MissingAttributeName {
            element: element.into(),
        }
    }

    /// Build a [`FramesError::UnresolvableTarget`] value.
    pub fn unresolvable_target(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnresolvableTarget {
            element: element.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

/// Playback clock owned by an [`AnimatedDocument`](crate::AnimatedDocument).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Timeline {
    current: f64,
    paused: bool,
}

impl Timeline {
    /// Current document time in seconds.
    pub fn current_time(&self) -> f64 {
        self.current
    }

    /// Whether automatic progression is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Reposition the clock. Negative and non-finite times clamp to 0.
    pub fn set_current_time(&mut self, secs: f64) {
        self.current = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
    }

    /// Stop automatic progression.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume automatic progression.
    pub fn unpause(&mut self) {
        self.paused = false;
    }
}

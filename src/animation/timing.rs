//! SMIL timing: clock values, intervals and active duration.

use crate::document::tree::{NodeId, Tree};

/// A duration that may be unbounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimeSpan {
    /// Finite seconds.
    Finite(f64),
    /// Unbounded.
    Indefinite,
}

impl TimeSpan {
    /// Finite value, or `None` when indefinite.
    pub fn finite(self) -> Option<f64> {
        match self {
            Self::Finite(v) => Some(v),
            Self::Indefinite => None,
        }
    }

    fn as_f64(self) -> f64 {
        self.finite().unwrap_or(f64::INFINITY)
    }

    fn from_f64(v: f64) -> Self {
        if v.is_finite() {
            Self::Finite(v)
        } else {
            Self::Indefinite
        }
    }

    fn min(self, other: Self) -> Self {
        Self::from_f64(self.as_f64().min(other.as_f64()))
    }
}

/// `repeatCount` value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RepeatCount {
    /// Number of iterations (may be fractional).
    Count(f64),
    /// Repeat forever.
    Indefinite,
}

/// `fill` behaviour after the active duration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Fill {
    /// Remove the effect.
    #[default]
    Remove,
    /// Hold the last value.
    Freeze,
}

/// Where an animation stands at a given document time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// Before its first begin, or its begin is unresolved.
    Idle,
    /// Inside the active duration.
    Active(Progress),
    /// Past the active duration with `fill="freeze"`.
    Frozen(Progress),
    /// Past the active duration with `fill="remove"`.
    Removed,
}

impl Phase {
    /// Progress when the animation contributes a value.
    pub fn progress(self) -> Option<Progress> {
        match self {
            Self::Active(p) | Self::Frozen(p) => Some(p),
            Self::Idle | Self::Removed => None,
        }
    }
}

/// Position inside the simple duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    /// Zero-based iteration of the simple duration.
    pub iteration: u64,
    /// Fraction of the simple duration, `0..=1`.
    pub fraction: f64,
    /// Begin of the interval this progress belongs to.
    pub begin: f64,
}

/// Timing attributes of one animation element.
#[derive(Clone, Debug, PartialEq)]
pub struct Timing {
    /// Resolved begin offsets, ascending. Empty means the element never begins.
    pub begins: Vec<f64>,
    /// Simple duration.
    pub dur: TimeSpan,
    /// `repeatCount`, if present and valid.
    pub repeat_count: Option<RepeatCount>,
    /// `repeatDur`, if present and valid.
    pub repeat_dur: Option<TimeSpan>,
    /// Resolved end offsets, ascending.
    pub ends: Vec<f64>,
    /// Fill behaviour.
    pub fill: Fill,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            begins: vec![0.0],
            dur: TimeSpan::Indefinite,
            repeat_count: None,
            repeat_dur: None,
            ends: Vec::new(),
            fill: Fill::Remove,
        }
    }
}

impl Timing {
    /// Read timing attributes from an element.
    pub fn from_element(tree: &Tree, id: NodeId) -> Self {
        let begins = match tree.attr(id, "begin") {
            Some(raw) => parse_offset_list(raw),
            None => vec![0.0],
        };
        let dur = match tree.attr(id, "dur").map(str::trim) {
            Some(raw) => match parse_clock_value(raw) {
                Some(v) if v > 0.0 => TimeSpan::Finite(v),
                _ => TimeSpan::Indefinite,
            },
            None => TimeSpan::Indefinite,
        };
        let repeat_count = tree.attr(id, "repeatCount").and_then(|raw| match raw.trim() {
            "indefinite" => Some(RepeatCount::Indefinite),
            v => v
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite() && *n > 0.0)
                .map(RepeatCount::Count),
        });
        let repeat_dur = tree.attr(id, "repeatDur").and_then(|raw| match raw.trim() {
            "indefinite" => Some(TimeSpan::Indefinite),
            v => parse_clock_value(v).map(TimeSpan::Finite),
        });
        let ends = tree.attr(id, "end").map(parse_offset_list).unwrap_or_default();
        let fill = match tree.attr(id, "fill").map(str::trim) {
            Some("freeze") => Fill::Freeze,
            _ => Fill::Remove,
        };

        Self {
            begins,
            dur,
            repeat_count,
            repeat_dur,
            ends,
            fill,
        }
    }

    /// Active duration of the interval starting at `begin`.
    pub fn active_duration(&self, begin: f64) -> TimeSpan {
        let d = self.dur;
        let iad = if self.repeat_count.is_none() && self.repeat_dur.is_none() {
            d
        } else {
            let by_count = self.repeat_count.map(|rc| match (rc, d) {
                (RepeatCount::Count(n), TimeSpan::Finite(d)) => TimeSpan::Finite(n * d),
                _ => TimeSpan::Indefinite,
            });
            let by_dur = self.repeat_dur;
            match (by_count, by_dur) {
                (Some(a), Some(b)) => a.min(b),
                (Some(a), None) => a,
                (None, Some(b)) => b,
                (None, None) => d,
            }
        };
        match self.end_after(begin) {
            Some(end) => iad.min(TimeSpan::Finite((end - begin).max(0.0))),
            None => iad,
        }
    }

    fn end_after(&self, begin: f64) -> Option<f64> {
        self.ends.iter().copied().find(|e| *e >= begin)
    }

    /// Begin of the interval in effect at `t` (the latest begin not after `t`).
    pub fn current_begin(&self, t: f64) -> Option<f64> {
        self.begins.iter().copied().rev().find(|b| *b <= t)
    }

    /// End of the last interval, `None` when the element never begins.
    pub fn active_end(&self) -> Option<TimeSpan> {
        let begin = *self.begins.last()?;
        Some(match self.active_duration(begin) {
            TimeSpan::Finite(ad) => TimeSpan::Finite(begin + ad),
            TimeSpan::Indefinite => TimeSpan::Indefinite,
        })
    }

    /// Phase of the element at document time `t`.
    pub fn phase_at(&self, t: f64) -> Phase {
        let Some(begin) = self.current_begin(t) else {
            return Phase::Idle;
        };
        let local = t - begin;
        match self.active_duration(begin) {
            TimeSpan::Finite(ad) if local >= ad => match self.fill {
                Fill::Freeze => Phase::Frozen(self.progress(ad, true, begin)),
                Fill::Remove => Phase::Removed,
            },
            _ => Phase::Active(self.progress(local, false, begin)),
        }
    }

    fn progress(&self, local: f64, frozen: bool, begin: f64) -> Progress {
        let TimeSpan::Finite(d) = self.dur else {
            return Progress {
                iteration: 0,
                fraction: 0.0,
                begin,
            };
        };
        let mut iteration = (local / d).floor().max(0.0);
        let mut rem = local - iteration * d;
        // Frozen exactly on an iteration boundary holds the end of the previous iteration.
        if frozen && iteration > 0.0 && rem <= d * 1e-9 {
            iteration -= 1.0;
            rem = d;
        }
        Progress {
            iteration: iteration as u64,
            fraction: (rem / d).clamp(0.0, 1.0),
            begin,
        }
    }
}

/// Parse a SMIL clock value (`"02:30"`, `"1:02:03.5"`, `"1.5s"`, `"200ms"`, `"2min"`,
/// `"1h"`, `"3"`). Returns seconds.
pub fn parse_clock_value(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let secs = if s.contains(':') {
        let parts: Vec<&str> = s.split(':').collect();
        let (h, m, sec) = match parts.as_slice() {
            [m, sec] => (0.0, parse_clock_field(m)?, sec.parse::<f64>().ok()?),
            [h, m, sec] => (
                parse_clock_field(h)?,
                parse_clock_field(m)?,
                sec.parse::<f64>().ok()?,
            ),
            _ => return None,
        };
        h * 3600.0 + m * 60.0 + sec
    } else {
        let (number, unit) = split_time_unit(s);
        if number.starts_with(['+', '-']) {
            return None;
        }
        scale_to_secs(number.trim().parse::<f64>().ok()?, unit)?
    };
    (secs.is_finite() && secs >= 0.0).then_some(secs)
}

/// Split a timecount into its number and trailing alphabetic unit.
pub(crate) fn split_time_unit(s: &str) -> (&str, &str) {
    let number = s.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    (number, &s[number.len()..])
}

/// Convert a timecount in `unit` to seconds. Unknown units yield `None`.
pub(crate) fn scale_to_secs(value: f64, unit: &str) -> Option<f64> {
    match unit {
        "" | "s" => Some(value),
        "ms" => Some(value / 1000.0),
        "min" => Some(value * 60.0),
        "h" => Some(value * 3600.0),
        _ => None,
    }
}

fn parse_clock_field(s: &str) -> Option<f64> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse a signed offset (`"+1s"`, `"-0.5s"`, `"2"`).
pub fn parse_offset(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if let Some(rest) = s.strip_prefix('-') {
        parse_clock_value(rest).map(|v| -v)
    } else if let Some(rest) = s.strip_prefix('+') {
        parse_clock_value(rest)
    } else {
        parse_clock_value(s)
    }
}

/// Parse a `begin`/`end` list, keeping offset values only (event, syncbase and
/// `indefinite` values are unresolved here). Result is sorted ascending.
pub fn parse_offset_list(raw: &str) -> Vec<f64> {
    let mut out: Vec<f64> = raw
        .split(';')
        .filter_map(|part| {
            let v = parse_offset(part);
            if v.is_none() && !part.trim().is_empty() {
                tracing::trace!(value = part.trim(), "ignoring unresolved timing value");
            }
            v
        })
        .collect();
    out.sort_by(f64::total_cmp);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timing.rs"]
mod tests;

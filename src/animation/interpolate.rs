//! `calcMode`, `keyTimes` and `keySplines`.

use crate::foundation::number::parse_number_list;

/// SMIL `calcMode`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalcMode {
    /// Jump from value to value.
    Discrete,
    /// Linear between consecutive values.
    Linear,
    /// Constant velocity across the whole list.
    Paced,
    /// Cubic Bezier timing per segment.
    Spline,
}

impl CalcMode {
    /// Interpret a `calcMode` attribute, falling back to `default`.
    pub fn parse(raw: Option<&str>, default: CalcMode) -> Self {
        match raw.map(str::trim) {
            Some("discrete") => Self::Discrete,
            Some("linear") => Self::Linear,
            Some("paced") => Self::Paced,
            Some("spline") => Self::Spline,
            _ => default,
        }
    }
}

/// One `keySplines` entry: control points of a unit cubic Bezier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeySpline {
    /// First control point x.
    pub x1: f64,
    /// First control point y.
    pub y1: f64,
    /// Second control point x.
    pub x2: f64,
    /// Second control point y.
    pub y2: f64,
}

impl KeySpline {
    /// Map a linear segment fraction through the spline.
    pub fn apply(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        let bez = |a: f64, b: f64, t: f64| {
            let mt = 1.0 - t;
            3.0 * mt * mt * t * a + 3.0 * mt * t * t * b + t * t * t
        };
        // x(t) is monotonic on [0, 1] because control x values are clamped to [0, 1].
        let (mut lo, mut hi) = (0.0f64, 1.0f64);
        let mut t = x;
        for _ in 0..64 {
            let cx = bez(self.x1, self.x2, t);
            if (cx - x).abs() < 1e-9 {
                break;
            }
            if cx < x {
                lo = t;
            } else {
                hi = t;
            }
            t = 0.5 * (lo + hi);
        }
        bez(self.y1, self.y2, t)
    }
}

/// Parse `keySplines`: semicolon-separated groups of four numbers in `[0, 1]`.
pub fn parse_key_splines(raw: &str) -> Option<Vec<KeySpline>> {
    raw.split(';')
        .filter(|g| !g.trim().is_empty())
        .map(|group| {
            let v = parse_number_list(group)?;
            let [x1, y1, x2, y2] = v.as_slice() else {
                return None;
            };
            if [x1, y1, x2, y2].iter().any(|c| !(0.0..=1.0).contains(*c)) {
                return None;
            }
            Some(KeySpline {
                x1: *x1,
                y1: *y1,
                x2: *x2,
                y2: *y2,
            })
        })
        .collect()
}

/// Parse `keyTimes`: semicolon-separated ascending fractions starting at 0.
pub fn parse_key_times(raw: &str) -> Option<Vec<f64>> {
    let times: Vec<f64> = raw
        .split(';')
        .filter(|p| !p.trim().is_empty())
        .map(|p| p.trim().parse::<f64>().ok())
        .collect::<Option<_>>()?;
    let ascending = times.windows(2).all(|w| w[0] <= w[1]);
    let in_range = times.iter().all(|t| (0.0..=1.0).contains(t));
    (ascending && in_range && times.first() == Some(&0.0)).then_some(times)
}

/// Where a simple-duration fraction lands in a list of `n` values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Index of the segment's first value.
    pub index: usize,
    /// Fraction inside the segment (always 0 for discrete).
    pub local: f64,
}

/// Keyframing attributes shared by every value-based animation.
#[derive(Clone, Debug, PartialEq)]
pub struct Keying {
    /// Interpolation mode.
    pub mode: CalcMode,
    /// Validated `keyTimes` (length matches the value count).
    pub key_times: Option<Vec<f64>>,
    /// Validated `keySplines` (one per segment).
    pub key_splines: Vec<KeySpline>,
}

impl Keying {
    /// Drop `keyTimes`/`keySplines` that do not fit `n` values and `mode`. An invalid
    /// spline set demotes the mode to linear.
    pub fn validated(
        mode: CalcMode,
        key_times: Option<Vec<f64>>,
        key_splines: Option<Vec<KeySpline>>,
        n: usize,
    ) -> Self {
        let key_times = key_times.filter(|kt| {
            let ok = kt.len() == n
                && (mode == CalcMode::Discrete || n < 2 || kt.last() == Some(&1.0));
            if !ok {
                tracing::debug!(expected = n, got = kt.len(), "ignoring invalid keyTimes");
            }
            ok
        });
        let (mode, key_splines) = match (mode, key_splines) {
            (CalcMode::Spline, Some(s)) if n >= 2 && s.len() == n - 1 => (CalcMode::Spline, s),
            (CalcMode::Spline, _) => {
                tracing::debug!("ignoring invalid keySplines, using linear");
                (CalcMode::Linear, Vec::new())
            }
            (m, _) => (m, Vec::new()),
        };
        Self {
            mode,
            key_times,
            key_splines,
        }
    }

    /// Locate `fraction` among `n` values. `distances` feeds paced mode (one per segment);
    /// without it paced falls back to linear.
    pub fn segment(&self, fraction: f64, n: usize, distances: Option<&[f64]>) -> Segment {
        let p = fraction.clamp(0.0, 1.0);
        if n <= 1 {
            return Segment {
                index: 0,
                local: 0.0,
            };
        }
        match self.mode {
            CalcMode::Discrete => {
                let index = match &self.key_times {
                    Some(kt) => kt.iter().rposition(|k| *k <= p).unwrap_or(0),
                    None => ((p * n as f64).floor() as usize).min(n - 1),
                };
                Segment { index, local: 0.0 }
            }
            CalcMode::Paced => match distances.filter(|d| d.len() == n - 1) {
                Some(d) if d.iter().sum::<f64>() > 0.0 => paced_segment(p, d),
                _ => self.linear_segment(p, n),
            },
            CalcMode::Linear => self.linear_segment(p, n),
            CalcMode::Spline => {
                let seg = self.linear_segment(p, n);
                let local = self
                    .key_splines
                    .get(seg.index)
                    .map(|s| s.apply(seg.local))
                    .unwrap_or(seg.local);
                Segment { local, ..seg }
            }
        }
    }

    fn linear_segment(&self, p: f64, n: usize) -> Segment {
        if p >= 1.0 {
            return Segment {
                index: n - 2,
                local: 1.0,
            };
        }
        match &self.key_times {
            Some(kt) => {
                let index = kt[..n - 1].iter().rposition(|k| *k <= p).unwrap_or(0);
                let span = kt[index + 1] - kt[index];
                let local = if span > 0.0 {
                    (p - kt[index]) / span
                } else {
                    1.0
                };
                Segment {
                    index,
                    local: local.clamp(0.0, 1.0),
                }
            }
            None => {
                let scaled = p * (n - 1) as f64;
                let index = (scaled.floor() as usize).min(n - 2);
                Segment {
                    index,
                    local: scaled - index as f64,
                }
            }
        }
    }
}

fn paced_segment(p: f64, distances: &[f64]) -> Segment {
    let total: f64 = distances.iter().sum();
    let target = p * total;
    let mut acc = 0.0;
    for (index, d) in distances.iter().enumerate() {
        if target <= acc + d || index == distances.len() - 1 {
            let local = if *d > 0.0 { (target - acc) / d } else { 0.0 };
            return Segment {
                index,
                local: local.clamp(0.0, 1.0),
            };
        }
        acc += d;
    }
    Segment {
        index: 0,
        local: 0.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;

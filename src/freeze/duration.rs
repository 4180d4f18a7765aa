//! Total sampling duration of an animated document.

use crate::{
    animation::timing::{TimeSpan, scale_to_secs, split_time_unit},
    document::{animated::AnimatedDocument, tree::Tree},
};

/// How [`DurationAnalyzer::analyze`] measures a document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DurationPolicy {
    /// Longest `dur` attribute anywhere in the document.
    #[default]
    DurAttribute,
    /// Latest SMIL active end over all animations (begin offsets, repeats and ends
    /// included).
    ActiveEnd,
}

/// Computes how long a document needs to be sampled.
#[derive(Clone, Copy, Debug, Default)]
pub struct DurationAnalyzer;

impl DurationAnalyzer {
    /// Longest `dur` value among all elements carrying one, in seconds. Unparsable values
    /// count as 0; a document without `dur` attributes has duration 0.
    pub fn scan_dur(tree: &Tree) -> f64 {
        tree.elements()
            .filter_map(|id| tree.attr(id, "dur"))
            .map(parse_dur_attribute)
            .fold(0.0, f64::max)
    }

    /// Latest active end over every animation of `doc`.
    ///
    /// An unbounded animation (`repeatCount="indefinite"` and the like) contributes one
    /// simple duration past its begin, so looping content is sampled for one cycle.
    pub fn active_end(doc: &AnimatedDocument) -> f64 {
        let mut end = 0.0f64;
        for spec in doc.animations().iter() {
            let timing = &spec.timing;
            for &begin in &timing.begins {
                let candidate = match timing.active_duration(begin) {
                    TimeSpan::Finite(ad) => begin + ad,
                    TimeSpan::Indefinite => begin + timing.dur.finite().unwrap_or(0.0),
                };
                end = end.max(candidate);
            }
        }
        end
    }

    /// Duration of `doc` under `policy`.
    #[tracing::instrument(skip(doc))]
    pub fn analyze(doc: &AnimatedDocument, policy: DurationPolicy) -> f64 {
        let secs = match policy {
            DurationPolicy::DurAttribute => Self::scan_dur(doc.tree()),
            DurationPolicy::ActiveEnd => Self::active_end(doc),
        };
        tracing::debug!(secs, "analyzed document duration");
        secs
    }
}

/// Read one `dur` attribute leniently: a plain number, or a number followed by a unit
/// suffix. Known time units are scaled to seconds, other suffixes are ignored.
pub fn parse_dur_attribute(raw: &str) -> f64 {
    let s = raw.trim();
    let secs = match s.parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            let (number, unit) = split_time_unit(s);
            match number.trim().parse::<f64>() {
                Ok(v) => scale_to_secs(v, unit).unwrap_or(v),
                Err(_) => {
                    tracing::trace!(value = s, "unparsable dur counts as 0");
                    0.0
                }
            }
        }
    };
    if secs.is_finite() { secs.max(0.0) } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/freeze/duration.rs"]
mod tests;

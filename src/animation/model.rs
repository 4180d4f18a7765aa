use std::collections::HashMap;

use crate::{
    animation::{
        directive::{DirectiveFamily, DirectiveIndex, DirectiveKind, Namespace},
        interpolate::{CalcMode, KeySpline, Keying, parse_key_splines, parse_key_times},
        timing::Timing,
        transform::{TransformItem, TransformKind},
        value::AnimValue,
    },
    document::tree::{NodeId, Tree},
    foundation::number::parse_number_list,
};

/// Where an animation takes its keyframe values from.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueSpec {
    /// `values="a; b; c"`
    List(Vec<String>),
    /// `from` + `to`
    FromTo(String, String),
    /// `from` + `by`
    FromBy(String, String),
    /// `by` only (implicitly additive)
    By(String),
    /// `to` only (interpolates from the underlying value)
    To(String),
    /// `<set to="...">`
    Set(String),
    /// Nothing usable; the animation has no effect.
    Empty,
}

impl ValueSpec {
    fn from_element(tree: &Tree, id: NodeId, kind: DirectiveKind) -> Self {
        let get = |name: &str| tree.attr(id, name).map(str::to_string);
        if kind == DirectiveKind::Set {
            return get("to").map(Self::Set).unwrap_or(Self::Empty);
        }
        if let Some(values) = get("values") {
            let list: Vec<String> = values
                .split(';')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect();
            if !list.is_empty() {
                return Self::List(list);
            }
        }
        match (get("from"), get("to"), get("by")) {
            (Some(from), Some(to), _) => Self::FromTo(from, to),
            (Some(from), None, Some(by)) => Self::FromBy(from, by),
            (None, Some(to), _) => Self::To(to),
            (None, None, Some(by)) => Self::By(by),
            _ => Self::Empty,
        }
    }
}

/// One sampled contribution to an animation sandwich.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample<T> {
    /// The animation's value at the sample time.
    pub value: T,
    /// Whether it adds to (rather than replaces) the value beneath it.
    pub additive: bool,
    /// Begin of the interval in effect, used for sandwich priority.
    pub begin: f64,
}

struct Resolved {
    values: Vec<AnimValue>,
    additive: bool,
    to_animation: bool,
}

/// Parsed form of one animation directive element.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationSpec {
    /// Directive element id.
    pub id: NodeId,
    /// Directive kind.
    pub kind: DirectiveKind,
    /// Parent element the directive animates.
    pub target: Option<NodeId>,
    /// `attributeName`, if present and non-empty.
    pub attribute: Option<String>,
    /// `attributeType`.
    pub namespace: Namespace,
    /// Timing attributes.
    pub timing: Timing,
    /// Value source.
    pub values: ValueSpec,
    /// Requested `calcMode`.
    pub calc_mode: CalcMode,
    /// Parsed `keyTimes`, before validation against the value count.
    pub key_times: Option<Vec<f64>>,
    /// Parsed `keySplines`, before validation against the value count.
    pub key_splines: Option<Vec<KeySpline>>,
    /// `additive="sum"`.
    pub additive: bool,
    /// `accumulate="sum"`.
    pub accumulate: bool,
    /// `type` of an `<animateTransform>`.
    pub transform_kind: Option<TransformKind>,
}

impl AnimationSpec {
    /// Read a directive element.
    pub fn from_element(tree: &Tree, id: NodeId, kind: DirectiveKind) -> Self {
        let attr = |name: &str| tree.attr(id, name);
        let default_mode = match kind {
            DirectiveKind::Set => CalcMode::Discrete,
            DirectiveKind::AnimateMotion => CalcMode::Paced,
            _ => CalcMode::Linear,
        };
        Self {
            id,
            kind,
            target: tree.parent_element(id),
            attribute: attr("attributeName")
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string),
            namespace: Namespace::from_attribute_type(attr("attributeType")),
            timing: Timing::from_element(tree, id),
            values: ValueSpec::from_element(tree, id, kind),
            calc_mode: CalcMode::parse(attr("calcMode"), default_mode),
            key_times: attr("keyTimes").and_then(parse_key_times),
            key_splines: attr("keySplines").and_then(parse_key_splines),
            additive: attr("additive").map(str::trim) == Some("sum"),
            accumulate: attr("accumulate").map(str::trim) == Some("sum"),
            transform_kind: match kind {
                DirectiveKind::AnimateTransform => TransformKind::from_type_attr(attr("type")),
                _ => None,
            },
        }
    }

    /// Attribute value at time `t`, on top of `underlying`. `None` when the animation has
    /// no effect at `t`.
    pub fn sample_value(&self, t: f64, underlying: &AnimValue) -> Option<Sample<AnimValue>> {
        let attr = self.attribute.as_deref()?;
        let parse = |s: &str| Some(AnimValue::parse(attr, s));
        let s = self.animate(t, &parse, underlying)?;
        let value = if s.additive {
            underlying.add(&s.value).unwrap_or(s.value)
        } else {
            s.value
        };
        Some(Sample { value, ..s })
    }

    /// Transform item at time `t` for an `<animateTransform>`.
    pub fn sample_transform(&self, t: f64) -> Option<Sample<TransformItem>> {
        let kind = self.transform_kind?;
        let parse = |s: &str| {
            parse_number_list(s)
                .and_then(|v| kind.normalize_params(&v))
                .map(AnimValue::List)
        };
        let identity = AnimValue::List(kind.identity_params());
        let s = self.animate(t, &parse, &identity)?;
        let AnimValue::List(params) = &s.value else {
            return None;
        };
        Some(Sample {
            value: TransformItem::from_params(kind, params)?,
            additive: s.additive,
            begin: s.begin,
        })
    }

    fn animate(
        &self,
        t: f64,
        parse: &dyn Fn(&str) -> Option<AnimValue>,
        underlying: &AnimValue,
    ) -> Option<Sample<AnimValue>> {
        let progress = self.timing.phase_at(t).progress()?;
        let Some(r) = self.resolve(parse, underlying) else {
            if self.values != ValueSpec::Empty {
                tracing::debug!(
                    attribute = self.attribute.as_deref(),
                    "animation values do not parse, skipping"
                );
            }
            return None;
        };
        let mut value = self.pick(&r.values, progress.fraction)?;
        if self.accumulate && !r.to_animation && progress.iteration > 0 {
            let accumulated = r
                .values
                .last()
                .and_then(|last| last.scale(progress.iteration as f64))
                .and_then(|acc| value.add(&acc));
            if let Some(v) = accumulated {
                value = v;
            }
        }
        Some(Sample {
            value,
            additive: r.additive && !r.to_animation,
            begin: progress.begin,
        })
    }

    fn resolve(
        &self,
        parse: &dyn Fn(&str) -> Option<AnimValue>,
        underlying: &AnimValue,
    ) -> Option<Resolved> {
        let (values, additive, to_animation) = match &self.values {
            ValueSpec::List(list) => (
                list.iter()
                    .map(|s| parse(s))
                    .collect::<Option<Vec<_>>>()?,
                self.additive,
                false,
            ),
            ValueSpec::FromTo(from, to) => (vec![parse(from)?, parse(to)?], self.additive, false),
            ValueSpec::FromBy(from, by) => {
                let from = parse(from)?;
                let by = parse(by)?;
                let to = from.add(&by).unwrap_or(by);
                (vec![from, to], self.additive, false)
            }
            ValueSpec::By(by) => {
                let by = parse(by)?;
                (vec![by.zero_like(), by], true, false)
            }
            ValueSpec::To(to) => (vec![underlying.clone(), parse(to)?], false, true),
            ValueSpec::Set(to) => (vec![parse(to)?], false, false),
            ValueSpec::Empty => return None,
        };
        Some(Resolved {
            values,
            additive,
            to_animation,
        })
    }

    fn pick(&self, values: &[AnimValue], fraction: f64) -> Option<AnimValue> {
        let n = values.len();
        if n == 0 {
            return None;
        }
        let interpolable = values
            .windows(2)
            .all(|w| w[0].interpolate(&w[1], 0.0).is_some());
        let mode = if interpolable {
            self.calc_mode
        } else {
            CalcMode::Discrete
        };
        let keying = Keying::validated(mode, self.key_times.clone(), self.key_splines.clone(), n);
        let distances = if keying.mode == CalcMode::Paced {
            values
                .windows(2)
                .map(|w| w[0].distance(&w[1]))
                .collect::<Option<Vec<_>>>()
        } else {
            None
        };
        let seg = keying.segment(fraction, n, distances.as_deref());
        if keying.mode == CalcMode::Discrete || n == 1 {
            return values.get(seg.index).cloned();
        }
        values[seg.index].interpolate(&values[seg.index + 1], seg.local)
    }
}

/// Every animation spec of a document, indexed by target element.
#[derive(Clone, Debug, Default)]
pub struct AnimationModel {
    specs: Vec<AnimationSpec>,
    by_target: HashMap<NodeId, Vec<usize>>,
}

impl AnimationModel {
    /// Parse every indexed directive.
    pub fn build(tree: &Tree, directives: &DirectiveIndex) -> Self {
        let mut specs = Vec::with_capacity(directives.len());
        let mut by_target: HashMap<NodeId, Vec<usize>> = HashMap::new();
        for d in directives.iter() {
            let spec = AnimationSpec::from_element(tree, d.id, d.kind);
            if let Some(target) = spec.target {
                by_target.entry(target).or_default().push(specs.len());
            }
            specs.push(spec);
        }
        Self { specs, by_target }
    }

    /// Number of parsed specs.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// True when the document has no animations.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// All specs in document order.
    pub fn iter(&self) -> impl Iterator<Item = &AnimationSpec> + '_ {
        self.specs.iter()
    }

    /// Specs whose parent element is `target`, in document order.
    pub fn on_target(&self, target: NodeId) -> impl Iterator<Item = &AnimationSpec> + '_ {
        self.by_target
            .get(&target)
            .into_iter()
            .flatten()
            .map(|&i| &self.specs[i])
    }

    /// Attribute-family specs animating `attribute` in `namespace` on `target`.
    pub fn attribute_animations<'a>(
        &'a self,
        target: NodeId,
        attribute: &'a str,
        namespace: Namespace,
    ) -> impl Iterator<Item = &'a AnimationSpec> + 'a {
        self.on_target(target).filter(move |s| {
            s.kind.family() == DirectiveFamily::Attribute
                && s.namespace == namespace
                && s.attribute.as_deref() == Some(attribute)
        })
    }

    /// `<animateTransform attributeName="transform">` specs on `target`.
    pub fn transform_animations(
        &self,
        target: NodeId,
    ) -> impl Iterator<Item = &AnimationSpec> + '_ {
        self.on_target(target).filter(|s| {
            s.kind.family() == DirectiveFamily::Transform
                && s.attribute.as_deref() == Some("transform")
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/model.rs"]
mod tests;

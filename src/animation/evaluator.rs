//! Live values of a document at one instant.
//!
//! The evaluator answers the questions the freezer asks of a paused document: the animated
//! value of an XML attribute, the animated transform list of an element and the computed
//! value of a CSS property. Contributions of simultaneously active animations are layered
//! in sandwich order: earlier interval begin first, document order among equal begins.

use crate::{
    animation::{
        directive::Namespace,
        model::{AnimationModel, AnimationSpec, Sample},
        transform::{TransformItem, parse_transform_list},
        value::AnimValue,
    },
    document::tree::{NodeId, Tree},
};

/// Properties inherited from the parent element when not specified.
const INHERITED_PROPERTIES: &[&str] = &[
    "clip-rule",
    "color",
    "fill",
    "fill-opacity",
    "fill-rule",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "visibility",
];

/// Value of a property (or attribute) nobody specified.
pub fn initial_value(property: &str) -> &'static str {
    match property {
        "opacity" | "fill-opacity" | "stroke-opacity" | "stop-opacity" | "flood-opacity" => "1",
        "fill" | "stop-color" | "flood-color" => "black",
        "stroke" => "none",
        "stroke-width" | "stroke-miterlimit" => "1",
        "visibility" => "visible",
        "display" => "inline",
        "font-size" => "medium",
        _ => "0",
    }
}

/// Read-only view of a document's animated state at `time`.
#[derive(Clone, Copy, Debug)]
pub struct Evaluator<'a> {
    tree: &'a Tree,
    model: &'a AnimationModel,
    time: f64,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(tree: &'a Tree, model: &'a AnimationModel, time: f64) -> Self {
        Self { tree, model, time }
    }

    /// Document time being evaluated, in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Animated value of XML attribute `attr` on `node`, or `None` when no animation of
    /// that attribute is in effect.
    pub fn animated_attribute(&self, node: NodeId, attr: &str) -> Option<String> {
        let raw = self
            .tree
            .attr(node, attr)
            .unwrap_or_else(|| initial_value(attr));
        let base = AnimValue::parse(attr, raw);
        self.sandwich(
            self.model.attribute_animations(node, attr, Namespace::Xml),
            base,
        )
        .map(|v| v.to_markup())
    }

    /// The element's transform list with every active `animateTransform` applied.
    pub fn animated_transform(&self, node: NodeId) -> Vec<TransformItem> {
        let mut list = self
            .tree
            .attr(node, "transform")
            .map(parse_transform_list)
            .unwrap_or_default();
        let mut active: Vec<(&AnimationSpec, Sample<TransformItem>)> = self
            .model
            .transform_animations(node)
            .filter_map(|spec| spec.sample_transform(self.time).map(|s| (spec, s)))
            .collect();
        sort_sandwich(&mut active);
        for (_, sample) in active {
            if sample.additive {
                list.push(sample.value);
            } else {
                list = vec![sample.value];
            }
        }
        list
    }

    /// Computed value of CSS property `property` on `node`, animations included.
    pub fn computed_style(&self, node: NodeId, property: &str) -> String {
        let base = self.static_cascade(node, property);
        let animated = self.sandwich(
            self.model
                .attribute_animations(node, property, Namespace::Css),
            AnimValue::parse(property, &base),
        );
        match animated {
            Some(v) => v.to_markup(),
            None => base,
        }
    }

    fn static_cascade(&self, node: NodeId, property: &str) -> String {
        let specified = self
            .tree
            .style_property(node, property)
            .or_else(|| self.animated_attribute(node, property))
            .or_else(|| self.tree.attr(node, property).map(|v| v.trim().to_string()));
        match specified {
            Some(v) if v != "inherit" => v,
            Some(_) => self.inherited(node, property),
            None if INHERITED_PROPERTIES.contains(&property) => self.inherited(node, property),
            None => initial_value(property).to_string(),
        }
    }

    fn inherited(&self, node: NodeId, property: &str) -> String {
        match self.tree.parent_element(node) {
            Some(parent) => self.computed_style(parent, property),
            None => initial_value(property).to_string(),
        }
    }

    fn sandwich<'s>(
        &self,
        specs: impl Iterator<Item = &'s AnimationSpec>,
        base: AnimValue,
    ) -> Option<AnimValue> {
        let mut active: Vec<(&AnimationSpec, f64)> = specs
            .filter_map(|spec| {
                let begin = spec.timing.phase_at(self.time).progress()?.begin;
                Some((spec, begin))
            })
            .collect();
        if active.is_empty() {
            return None;
        }
        active.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.id.cmp(&b.0.id)));

        // Each layer sees the result of the layers beneath it as its underlying value.
        let mut value = base;
        let mut any = false;
        for (spec, _) in active {
            if let Some(sample) = spec.sample_value(self.time, &value) {
                value = sample.value;
                any = true;
            }
        }
        any.then_some(value)
    }
}

fn sort_sandwich<T>(active: &mut [(&AnimationSpec, Sample<T>)]) {
    active.sort_by(|a, b| a.1.begin.total_cmp(&b.1.begin).then(a.0.id.cmp(&b.0.id)));
}

#[cfg(test)]
#[path = "../../tests/unit/animation/evaluator.rs"]
mod tests;

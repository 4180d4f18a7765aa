//! Baking live animation state into a static snapshot.

use crate::{
    animation::{
        directive::{Directive, DirectiveFamily, DirectiveIndex, DirectiveKind, Namespace},
        evaluator::Evaluator,
        transform::bake_transform_list,
    },
    document::{
        animated::AnimatedDocument,
        tree::{NodeId, Tree},
    },
    foundation::error::{FramesError, FramesResult},
};

/// How a directive in the source document is matched to its copy in the snapshot clone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Correspondence {
    /// Same node id. Ids survive cloning, so this is exact.
    #[default]
    ById,
    /// The Nth directive of a kind in the source maps to the Nth of that kind in the clone.
    Positional,
}

/// Knobs for [`AnimationFreezer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FreezeOptions {
    /// Directive matching strategy.
    pub correspondence: Correspondence,
}

/// A static clone of a document at one instant.
///
/// Directive elements are still present in the tree; they are neutralized when the
/// snapshot is encoded.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    tree: Tree,
    time: f64,
}

impl Snapshot {
    /// The baked tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Document time the snapshot was taken at, in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Take the baked tree.
    pub fn into_tree(self) -> Tree {
        self.tree
    }
}

/// Evaluates every attribute and transform animation at one instant and writes the
/// results into a deep clone of the document.
#[derive(Clone, Debug, Default)]
pub struct AnimationFreezer {
    options: FreezeOptions,
}

impl AnimationFreezer {
    /// Create a freezer.
    pub fn new(options: FreezeOptions) -> Self {
        Self { options }
    }

    /// Configured options.
    pub fn options(&self) -> &FreezeOptions {
        &self.options
    }

    /// Seek the document timeline to `t`, pause it and bake a snapshot. The previous
    /// timeline state is restored before returning, on success and on error alike.
    #[tracing::instrument(skip(self, doc))]
    pub fn freeze(&self, doc: &mut AnimatedDocument, t: f64) -> FramesResult<Snapshot> {
        let seek = doc.seek(t);
        let now = seek.current_time();
        self.freeze_at(&seek, now)
    }

    /// Bake a snapshot at `t` without touching the document timeline.
    pub fn freeze_at(&self, doc: &AnimatedDocument, t: f64) -> FramesResult<Snapshot> {
        self.bake(doc, t, None)
    }

    /// Like [`freeze`](Self::freeze), but a failing directive is skipped instead of
    /// failing the whole snapshot. Skipped directives are reported alongside it.
    #[tracing::instrument(skip(self, doc))]
    pub fn freeze_lenient(
        &self,
        doc: &mut AnimatedDocument,
        t: f64,
    ) -> (Snapshot, Vec<FramesError>) {
        let seek = doc.seek(t);
        let now = seek.current_time();
        let mut errors = Vec::new();
        let snapshot = match self.bake(&seek, now, Some(&mut errors)) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                errors.push(e);
                Snapshot {
                    tree: seek.tree().clone(),
                    time: now,
                }
            }
        };
        (snapshot, errors)
    }

    fn bake(
        &self,
        doc: &AnimatedDocument,
        t: f64,
        mut skipped: Option<&mut Vec<FramesError>>,
    ) -> FramesResult<Snapshot> {
        let time = if t.is_finite() { t.max(0.0) } else { 0.0 };
        let mut clone = doc.tree().clone();
        let eval = doc.evaluator_at(time);
        let clone_index = match self.options.correspondence {
            Correspondence::ById => None,
            Correspondence::Positional => Some(DirectiveIndex::build(&clone)),
        };

        for family in [DirectiveFamily::Transform, DirectiveFamily::Attribute] {
            for directive in doc.directives().iter().filter(|d| d.kind.family() == family) {
                let result =
                    self.bake_directive(doc, &eval, &mut clone, clone_index.as_ref(), directive);
                match (result, skipped.as_deref_mut()) {
                    (Ok(()), _) => {}
                    (Err(e), Some(errors)) => {
                        tracing::debug!(error = %e, "skipping directive");
                        errors.push(e);
                    }
                    (Err(e), None) => return Err(e),
                }
            }
        }

        Ok(Snapshot { tree: clone, time })
    }

    fn bake_directive(
        &self,
        doc: &AnimatedDocument,
        eval: &Evaluator<'_>,
        clone: &mut Tree,
        clone_index: Option<&DirectiveIndex>,
        directive: &Directive,
    ) -> FramesResult<()> {
        let src = doc.tree();
        let tag = directive.kind.tag();
        let attr = src
            .attr(directive.id, "attributeName")
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| FramesError::missing_attribute_name(tag))?;
        let target = src
            .parent_element(directive.id)
            .ok_or_else(|| FramesError::unresolvable_target(tag, "has no parent element"))?;
        let counterpart = self.counterpart(clone, clone_index, directive)?;
        let clone_target = clone.parent_element(counterpart).ok_or_else(|| {
            FramesError::unresolvable_target(tag, "copy in the snapshot has no parent element")
        })?;

        match (Namespace::from_attribute_type(src.attr(directive.id, "attributeType")), attr) {
            (Namespace::Css, property) => {
                let value = eval.computed_style(target, property);
                clone.set_style_property(clone_target, property, &value);
            }
            (Namespace::Xml, "transform") => {
                let baked = bake_transform_list(&eval.animated_transform(target));
                if !baked.is_empty() || clone.attr(clone_target, "transform").is_some() {
                    clone.set_attr(clone_target, "transform", baked);
                }
            }
            (Namespace::Xml, name) => {
                let value = eval
                    .animated_attribute(target, name)
                    .or_else(|| src.attr(target, name).map(str::to_string));
                match value {
                    Some(v) => clone.set_attr(clone_target, name, v),
                    None => tracing::trace!(attribute = name, "no animated or static value"),
                }
            }
        }
        Ok(())
    }

    fn counterpart(
        &self,
        clone: &Tree,
        clone_index: Option<&DirectiveIndex>,
        directive: &Directive,
    ) -> FramesResult<NodeId> {
        let found = match clone_index {
            Some(index) => index
                .nth_of_kind(directive.kind, directive.ordinal)
                .map(|d| d.id),
            None => Some(directive.id).filter(|id| {
                clone.local_name(*id).and_then(DirectiveKind::from_local_name)
                    == Some(directive.kind)
            }),
        };
        found.ok_or_else(|| {
            FramesError::unresolvable_target(
                directive.kind.tag(),
                format!(
                    "#{} of its kind has no copy in the snapshot",
                    directive.ordinal
                ),
            )
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/freeze/freezer.rs"]
mod tests;

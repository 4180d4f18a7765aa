use std::{ops::Deref, path::Path};

use anyhow::Context;

use crate::{
    animation::{directive::DirectiveIndex, evaluator::Evaluator, model::AnimationModel},
    document::{parse::parse_tree, timeline::Timeline, tree::Tree},
    foundation::error::{FramesError, FramesResult},
};

/// A parsed SVG document with its animation directives and one shared playback clock.
///
/// The tree is immutable after loading; the only mutable state is the [`Timeline`].
#[derive(Clone, Debug)]
pub struct AnimatedDocument {
    tree: Tree,
    timeline: Timeline,
    directives: DirectiveIndex,
    model: AnimationModel,
}

impl AnimatedDocument {
    /// Parse SVG markup. The root element must be `<svg>`.
    #[tracing::instrument(skip(text), fields(bytes = text.len()))]
    pub fn parse_str(text: &str) -> FramesResult<Self> {
        let tree = parse_tree(text)?;
        let root_name = tree.local_name(tree.root()).unwrap_or_default();
        if root_name != "svg" {
            return Err(FramesError::parse(format!(
                "root element must be <svg>, found <{root_name}>"
            )));
        }
        Ok(Self::from_tree(tree))
    }

    /// Parse SVG bytes (must be UTF-8).
    pub fn parse_bytes(bytes: &[u8]) -> FramesResult<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| FramesError::parse(format!("document is not utf-8: {e}")))?;
        Self::parse_str(text)
    }

    /// Read and parse an SVG file.
    pub fn from_path(path: &Path) -> FramesResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read svg '{}'", path.display()))?;
        Self::parse_bytes(&bytes)
    }

    /// Wrap an already built tree.
    pub fn from_tree(tree: Tree) -> Self {
        let directives = DirectiveIndex::build(&tree);
        let model = AnimationModel::build(&tree, &directives);
        tracing::debug!(
            directives = directives.len(),
            animations = model.len(),
            "indexed animation directives"
        );
        Self {
            tree,
            timeline: Timeline::default(),
            directives,
            model,
        }
    }

    /// The document tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// All animation directives in document order.
    pub fn directives(&self) -> &DirectiveIndex {
        &self.directives
    }

    /// Parsed animation specs backing the evaluator.
    pub fn animations(&self) -> &AnimationModel {
        &self.model
    }

    /// The shared playback clock.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Current timeline position in seconds.
    pub fn current_time(&self) -> f64 {
        self.timeline.current_time()
    }

    /// Reposition the shared clock.
    pub fn set_current_time(&mut self, secs: f64) {
        self.timeline.set_current_time(secs);
    }

    /// Pause automatic progression of the shared clock.
    pub fn pause_animations(&mut self) {
        self.timeline.pause();
    }

    /// Resume automatic progression of the shared clock.
    pub fn unpause_animations(&mut self) {
        self.timeline.unpause();
    }

    /// Seek the shared clock to `secs` and pause it until the returned guard drops, at
    /// which point the previous clock state is restored (also on early return or panic).
    pub fn seek(&mut self, secs: f64) -> DocumentSeek<'_> {
        let restore = self.timeline;
        self.timeline.set_current_time(secs);
        self.timeline.pause();
        DocumentSeek { doc: self, restore }
    }

    /// Evaluator at the current timeline position.
    pub fn evaluator(&self) -> Evaluator<'_> {
        self.evaluator_at(self.timeline.current_time())
    }

    /// Evaluator at an arbitrary time; does not touch the timeline.
    pub fn evaluator_at(&self, secs: f64) -> Evaluator<'_> {
        Evaluator::new(&self.tree, &self.model, secs)
    }
}

/// Scoped timeline position returned by [`AnimatedDocument::seek`].
pub struct DocumentSeek<'a> {
    doc: &'a mut AnimatedDocument,
    restore: Timeline,
}

impl Deref for DocumentSeek<'_> {
    type Target = AnimatedDocument;

    fn deref(&self) -> &AnimatedDocument {
        self.doc
    }
}

impl Drop for DocumentSeek<'_> {
    fn drop(&mut self) {
        self.doc.timeline = self.restore;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/animated.rs"]
mod tests;

use std::collections::HashMap;

use crate::document::tree::{NodeId, Tree};

/// SMIL animation element kinds recognized in a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum DirectiveKind {
    /// `<animate>`
    Animate,
    /// `<set>`
    Set,
    /// `<animateColor>` (deprecated but still found in the wild)
    AnimateColor,
    /// `<animateTransform>`
    AnimateTransform,
    /// `<animateMotion>`
    AnimateMotion,
}

/// The three directive families the freezer distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum DirectiveFamily {
    /// Animates one attribute or CSS property.
    Attribute,
    /// Animates the transform list.
    Transform,
    /// Moves the element along a path. Recognized, never baked.
    Motion,
}

impl DirectiveKind {
    /// Every kind, in the order the freezer processes them.
    pub const ALL: [DirectiveKind; 5] = [
        DirectiveKind::AnimateTransform,
        DirectiveKind::Animate,
        DirectiveKind::Set,
        DirectiveKind::AnimateColor,
        DirectiveKind::AnimateMotion,
    ];

    /// Classify an element by its local tag name.
    pub fn from_local_name(name: &str) -> Option<Self> {
        match name {
            "animate" => Some(Self::Animate),
            "set" => Some(Self::Set),
            "animateColor" => Some(Self::AnimateColor),
            "animateTransform" => Some(Self::AnimateTransform),
            "animateMotion" => Some(Self::AnimateMotion),
            _ => None,
        }
    }

    /// Tag name as written in markup.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Animate => "animate",
            Self::Set => "set",
            Self::AnimateColor => "animateColor",
            Self::AnimateTransform => "animateTransform",
            Self::AnimateMotion => "animateMotion",
        }
    }

    /// Replacement tag that no SVG consumer interprets as animation.
    pub fn neutralized_tag(self) -> &'static str {
        match self {
            Self::Animate => "not_anim",
            Self::Set => "not_set",
            Self::AnimateColor => "not_animColor",
            Self::AnimateTransform => "not_animTransform",
            Self::AnimateMotion => "not_animMotion",
        }
    }

    /// Family this kind belongs to.
    pub fn family(self) -> DirectiveFamily {
        match self {
            Self::Animate | Self::Set | Self::AnimateColor => DirectiveFamily::Attribute,
            Self::AnimateTransform => DirectiveFamily::Transform,
            Self::AnimateMotion => DirectiveFamily::Motion,
        }
    }
}

/// Whether an attribute is read from the element's attributes or from computed style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Namespace {
    /// Presentation/XML attribute (also the default for `auto` and missing values).
    #[default]
    Xml,
    /// CSS property (`attributeType="CSS"`).
    Css,
}

impl Namespace {
    /// Interpret an `attributeType` value.
    pub fn from_attribute_type(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("CSS") => Self::Css,
            _ => Self::Xml,
        }
    }
}

/// One directive element and its position among directives of the same kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Directive {
    /// Directive element id.
    pub id: NodeId,
    /// Directive kind.
    pub kind: DirectiveKind,
    /// Zero-based position among directives of the same kind, in document order.
    pub ordinal: usize,
}

/// Index of every directive element in a tree, in document order.
#[derive(Clone, Debug, Default)]
pub struct DirectiveIndex {
    directives: Vec<Directive>,
    by_id: HashMap<NodeId, usize>,
}

impl DirectiveIndex {
    /// Scan `tree` for directive elements.
    pub fn build(tree: &Tree) -> Self {
        let mut directives = Vec::new();
        let mut by_id = HashMap::new();
        let mut counts: HashMap<DirectiveKind, usize> = HashMap::new();

        for id in tree.elements() {
            let Some(kind) = tree.local_name(id).and_then(DirectiveKind::from_local_name) else {
                continue;
            };
            let ordinal = counts.entry(kind).or_default();
            by_id.insert(id, directives.len());
            directives.push(Directive {
                id,
                kind,
                ordinal: *ordinal,
            });
            *ordinal += 1;
        }

        Self { directives, by_id }
    }

    /// Number of directives.
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// True when the document has no directives.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// All directives in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Directive> + '_ {
        self.directives.iter()
    }

    /// Directives of one kind in document order.
    pub fn of_kind(&self, kind: DirectiveKind) -> impl Iterator<Item = &Directive> + '_ {
        self.directives.iter().filter(move |d| d.kind == kind)
    }

    /// Count of directives of one kind.
    pub fn count(&self, kind: DirectiveKind) -> usize {
        self.of_kind(kind).count()
    }

    /// Directive by element id.
    pub fn get(&self, id: NodeId) -> Option<&Directive> {
        self.by_id.get(&id).map(|&i| &self.directives[i])
    }

    /// The `ordinal`-th directive of `kind`.
    pub fn nth_of_kind(&self, kind: DirectiveKind, ordinal: usize) -> Option<&Directive> {
        self.of_kind(kind).nth(ordinal)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/directive.rs"]
mod tests;

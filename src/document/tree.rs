use crate::document::style;

/// Stable identifier of a node inside a [`Tree`].
///
/// Ids are assigned in document order at parse time and survive cloning, so the same id
/// addresses structurally corresponding nodes in a tree and in any of its clones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single `name="value"` pair on an element. Names keep their prefix (`xlink:href`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified attribute name.
    pub name: String,
    /// Unescaped attribute value.
    pub value: String,
}

/// Element payload: qualified tag name plus attributes in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Qualified tag name.
    pub name: String,
    /// Attributes in source order.
    pub attrs: Vec<Attribute>,
}

impl Element {
    /// Tag name without namespace prefix.
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Look up an attribute value by qualified name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// Node payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// An element with attributes and children.
    Element(Element),
    /// Character data (already unescaped).
    Text(String),
    /// A CDATA section.
    CData(String),
    /// A comment.
    Comment(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed mutable XML tree. `Clone` is a deep clone that preserves node ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Tree {
    /// Create a tree holding only a root element.
    pub fn new(root_name: impl Into<String>, attrs: Vec<Attribute>) -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Element(Element {
                    name: root_name.into(),
                    attrs,
                }),
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
        }
    }

    /// Root element id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes (elements, text, comments) in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root element.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` addresses a node of this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append an element as last child of `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        attrs: Vec<Attribute>,
    ) -> NodeId {
        self.push(
            parent,
            NodeKind::Element(Element {
                name: name.into(),
                attrs,
            }),
        )
    }

    /// Append character data as last child of `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.push(parent, NodeKind::Text(text.into()))
    }

    /// Append a CDATA section as last child of `parent`.
    pub fn append_cdata(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.push(parent, NodeKind::CData(text.into()))
    }

    /// Append a comment as last child of `parent`.
    pub fn append_comment(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.push(parent, NodeKind::Comment(text.into()))
    }

    /// Node payload, `None` for foreign ids.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.0).map(|n| &n.kind)
    }

    /// Element payload when `id` is an element.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.kind(id)? {
            NodeKind::Element(e) => Some(e),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(id.0)?.kind {
            NodeKind::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Qualified tag name of an element.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.name.as_str())
    }

    /// Tag name without namespace prefix.
    pub fn local_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::local_name)
    }

    /// Attribute value on an element.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    /// Set (or add) an attribute. No-op on non-elements.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        let value = value.into();
        match el.attrs.iter_mut().find(|a| a.name == name) {
            Some(a) => a.value = value,
            None => el.attrs.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        let el = self.element_mut(id)?;
        let pos = el.attrs.iter().position(|a| a.name == name)?;
        Some(el.attrs.remove(pos).value)
    }

    /// Rename an element in place. No-op on non-elements.
    pub fn rename(&mut self, id: NodeId, name: impl Into<String>) {
        if let Some(el) = self.element_mut(id) {
            el.name = name.into();
        }
    }

    /// Value of one property from the element's inline `style` attribute.
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        style::property(self.attr(id, "style")?, property)
    }

    /// Set one property inside the element's inline `style` attribute.
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str) {
        let current = self.attr(id, "style").unwrap_or_default();
        let updated = style::with_property(current, property, value);
        self.set_attr(id, "style", updated);
    }

    /// Parent node id (`None` for the root).
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    /// Parent when it is an element.
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        self.element(parent).map(|_| parent)
    }

    /// Child ids in order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Pre-order traversal of `id` and everything below it.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: if self.contains(id) { vec![id] } else { vec![] },
        }
    }

    /// All element ids in document order.
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(self.root)
            .filter(|id| self.element(*id).is_some())
    }

    /// Concatenated text of all text/CDATA descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for n in self.descendants(id) {
            match self.kind(n) {
                Some(NodeKind::Text(t)) | Some(NodeKind::CData(t)) => out.push_str(t),
                _ => {}
            }
        }
        out
    }
}

/// Iterator returned by [`Tree::descendants`].
pub struct Descendants<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Strip a namespace prefix from a qualified name.
pub fn local_name(qualified: &str) -> &str {
    qualified
        .rsplit_once(':')
        .map(|(_, local)| local)
        .unwrap_or(qualified)
}

#[cfg(test)]
#[path = "../../tests/unit/document/tree.rs"]
mod tests;

use quick_xml::escape::{escape, partial_escape};

use crate::document::tree::{NodeId, NodeKind, Tree};

pub(crate) const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub(crate) const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Serialize `tree` to markup. `rename` may substitute element names on the way out
/// (the tree itself is not touched).
///
/// The root gets the SVG and xlink namespace declarations when missing, so the output is
/// loadable on its own by any SVG consumer.
pub(crate) fn write_tree(tree: &Tree, rename: &dyn Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(tree.len() * 32);
    write_node(tree, tree.root(), rename, true, &mut out);
    out
}

fn write_node(
    tree: &Tree,
    id: NodeId,
    rename: &dyn Fn(&str) -> Option<String>,
    is_root: bool,
    out: &mut String,
) {
    let Some(kind) = tree.kind(id) else {
        return;
    };
    match kind {
        NodeKind::Text(t) => out.push_str(&partial_escape(t.as_str())),
        NodeKind::CData(t) => {
            out.push_str("<![CDATA[");
            out.push_str(t);
            out.push_str("]]>");
        }
        NodeKind::Comment(t) => {
            out.push_str("<!--");
            out.push_str(t);
            out.push_str("-->");
        }
        NodeKind::Element(el) => {
            let name = rename(&el.name).unwrap_or_else(|| el.name.clone());
            out.push('<');
            out.push_str(&name);
            if is_root {
                if el.attr("xmlns").is_none() {
                    push_attr(out, "xmlns", SVG_NAMESPACE);
                }
                let uses_xlink = tree
                    .elements()
                    .filter_map(|n| tree.element(n))
                    .any(|e| e.attrs.iter().any(|a| a.name.starts_with("xlink:")));
                if uses_xlink && el.attr("xmlns:xlink").is_none() {
                    push_attr(out, "xmlns:xlink", XLINK_NAMESPACE);
                }
            }
            for attr in &el.attrs {
                push_attr(out, &attr.name, &attr.value);
            }

            let children = tree.children(id);
            if children.is_empty() {
                out.push_str("/>");
                return;
            }
            out.push('>');
            for &child in children {
                write_node(tree, child, rename, false, out);
            }
            out.push_str("</");
            out.push_str(&name);
            out.push('>');
        }
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

#[cfg(test)]
#[path = "../../tests/unit/document/serialize.rs"]
mod tests;

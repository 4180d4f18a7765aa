use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{
    document::tree::{Attribute, NodeId, Tree},
    foundation::error::{FramesError, FramesResult},
};

/// Parse XML text into a [`Tree`]. Declarations, processing instructions and doctypes are
/// dropped; whitespace text is kept so snapshots serialize close to the source.
pub(crate) fn parse_tree(text: &str) -> FramesResult<Tree> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(false);

    let mut tree: Option<Tree> = None;
    let mut stack: Vec<NodeId> = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            FramesError::parse(format!(
                "malformed xml near byte {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(e) => {
                let (name, attrs) = read_start(&e)?;
                let id = open_element(&mut tree, &stack, name, attrs)?;
                stack.push(id);
            }
            Event::Empty(e) => {
                let (name, attrs) = read_start(&e)?;
                open_element(&mut tree, &stack, name, attrs)?;
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(t) => {
                if let (Some(tree), Some(&parent)) = (tree.as_mut(), stack.last()) {
                    let text = t
                        .unescape()
                        .map_err(|e| FramesError::parse(format!("bad text content: {e}")))?;
                    tree.append_text(parent, text.into_owned());
                }
            }
            Event::CData(c) => {
                if let (Some(tree), Some(&parent)) = (tree.as_mut(), stack.last()) {
                    let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                    tree.append_cdata(parent, text);
                }
            }
            Event::Comment(c) => {
                if let (Some(tree), Some(&parent)) = (tree.as_mut(), stack.last()) {
                    tree.append_comment(parent, String::from_utf8_lossy(&c).into_owned());
                }
            }
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if !stack.is_empty() {
        return Err(FramesError::parse("unexpected end of document"));
    }
    tree.ok_or_else(|| FramesError::parse("document has no root element"))
}

fn read_start(e: &BytesStart<'_>) -> FramesResult<(String, Vec<Attribute>)> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|err| FramesError::parse(format!("element name is not utf-8: {err}")))?
        .to_string();

    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr =
            attr.map_err(|err| FramesError::parse(format!("bad attribute on <{name}>: {err}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| FramesError::parse(format!("attribute name is not utf-8: {err}")))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| FramesError::parse(format!("bad value for '{key}' on <{name}>: {err}")))?
            .into_owned();
        attrs.push(Attribute { name: key, value });
    }
    Ok((name, attrs))
}

fn open_element(
    tree: &mut Option<Tree>,
    stack: &[NodeId],
    name: String,
    attrs: Vec<Attribute>,
) -> FramesResult<NodeId> {
    match (tree.as_mut(), stack.last()) {
        (None, _) => {
            let t = Tree::new(name, attrs);
            let root = t.root();
            *tree = Some(t);
            Ok(root)
        }
        (Some(t), Some(&parent)) => Ok(t.append_element(parent, name, attrs)),
        (Some(_), None) => Err(FramesError::parse(format!(
            "document has more than one root element (found <{name}>)"
        ))),
    }
}

use super::*;

fn sample() -> (Tree, NodeId, NodeId) {
    let mut tree = Tree::new(
        "svg",
        vec![Attribute {
            name: "width".into(),
            value: "10".into(),
        }],
    );
    let g = tree.append_element(tree.root(), "g", Vec::new());
    let rect = tree.append_element(g, "rect", Vec::new());
    tree.append_text(g, "hi ");
    tree.append_cdata(g, "there");
    tree.append_comment(tree.root(), "note");
    (tree, g, rect)
}

#[test]
fn ids_follow_document_order() {
    let (tree, g, rect) = sample();
    assert_eq!(tree.len(), 6);
    assert_eq!(tree.root().index(), 0);
    assert_eq!((g.index(), rect.index()), (1, 2));
    let names: Vec<&str> = tree.elements().filter_map(|n| tree.name(n)).collect();
    assert_eq!(names, vec!["svg", "g", "rect"]);
    assert_eq!(tree.parent_element(rect), Some(g));
    assert_eq!(tree.parent(tree.root()), None);
    assert_eq!(tree.text_content(g), "hi there");
}

#[test]
fn attribute_editing() {
    let (mut tree, _, rect) = sample();
    tree.set_attr(rect, "x", "1");
    tree.set_attr(rect, "x", "2");
    tree.set_attr(rect, "xlink:href", "#a");
    assert_eq!(tree.attr(rect, "x"), Some("2"));
    assert_eq!(tree.element(rect).unwrap().attrs.len(), 2);
    assert_eq!(tree.remove_attr(rect, "x").as_deref(), Some("2"));
    assert_eq!(tree.attr(rect, "x"), None);
    assert_eq!(tree.remove_attr(rect, "x"), None);

    tree.rename(rect, "svg:circle");
    assert_eq!(tree.local_name(rect), Some("circle"));
}

#[test]
fn non_elements_ignore_edits() {
    let (mut tree, g, _) = sample();
    let text = tree.children(g)[1];
    tree.set_attr(text, "x", "1");
    assert!(tree.element(text).is_none());
    assert_eq!(tree.attr(text, "x"), None);
    assert!(tree.children(NodeId(999)).is_empty());
    assert_eq!(tree.descendants(NodeId(999)).count(), 0);
}

#[test]
fn clone_keeps_ids() {
    let (tree, _, rect) = sample();
    let mut copy = tree.clone();
    assert_eq!(copy, tree);
    copy.set_style_property(rect, "fill", "red");
    assert_eq!(copy.style_property(rect, "fill").as_deref(), Some("red"));
    assert_eq!(tree.style_property(rect, "fill"), None);
    assert_ne!(copy, tree);
}

#[test]
fn local_name_strips_prefix() {
    assert_eq!(local_name("svg:rect"), "rect");
    assert_eq!(local_name("rect"), "rect");
}

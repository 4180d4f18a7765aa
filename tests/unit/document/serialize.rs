use super::*;
use crate::document::parse::parse_tree;

fn keep(_: &str) -> Option<String> {
    None
}

#[test]
fn adds_namespaces_to_root() {
    let tree = parse_tree(r##"<svg><use xlink:href="#a"/></svg>"##).unwrap();
    assert_eq!(
        write_tree(&tree, &keep),
        r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"><use xlink:href="#a"/></svg>"##
    );

    let plain = parse_tree(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect/></svg>"#).unwrap();
    assert_eq!(
        write_tree(&plain, &keep),
        r#"<svg xmlns="http://www.w3.org/2000/svg"><rect/></svg>"#
    );
}

#[test]
fn escapes_text_and_attributes() {
    let tree = parse_tree(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><text title="a &quot;b&quot; &amp; c">1 &lt; 2</text><!--x--><style><![CDATA[a>b]]></style></svg>"#,
    )
    .unwrap();
    assert_eq!(
        write_tree(&tree, &keep),
        r#"<svg xmlns="http://www.w3.org/2000/svg"><text title="a &quot;b&quot; &amp; c">1 &lt; 2</text><!--x--><style><![CDATA[a>b]]></style></svg>"#
    );
}

#[test]
fn rename_only_touches_output() {
    let tree = parse_tree(r#"<svg xmlns="http://www.w3.org/2000/svg"><set to="1"></set></svg>"#)
        .unwrap();
    let out = write_tree(&tree, &|name| (name == "set").then(|| "not_set".to_string()));
    assert_eq!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><not_set to="1"/></svg>"#
    );
    assert_eq!(tree.name(NodeId(1)), Some("set"));
}

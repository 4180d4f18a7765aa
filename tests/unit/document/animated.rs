use super::*;

const DOC: &str = r#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg">
  <rect id="r" x="0"><animate attributeName="x" from="0" to="10" dur="1s"/></rect>
</svg>"#;

#[test]
fn root_must_be_svg() {
    assert!(matches!(
        AnimatedDocument::parse_str("<html/>"),
        Err(FramesError::Parse(_))
    ));
    assert!(matches!(
        AnimatedDocument::parse_str("<svg><rect></svg>"),
        Err(FramesError::Parse(_))
    ));
    assert!(matches!(
        AnimatedDocument::parse_bytes(&[0xff, 0xfe]),
        Err(FramesError::Parse(_))
    ));
    assert!(AnimatedDocument::parse_str("<svg:svg xmlns:svg=\"http://www.w3.org/2000/svg\"/>").is_ok());
}

#[test]
fn indexes_directives_on_load() {
    let doc = AnimatedDocument::parse_str(DOC).unwrap();
    assert_eq!(doc.directives().len(), 1);
    assert_eq!(doc.animations().len(), 1);
    assert_eq!(doc.current_time(), 0.0);
    assert!(!doc.timeline().is_paused());
}

#[test]
fn seek_guard_restores_clock() {
    let mut doc = AnimatedDocument::parse_str(DOC).unwrap();
    doc.set_current_time(0.2);
    {
        let seek = doc.seek(0.5);
        assert_eq!(seek.current_time(), 0.5);
        assert!(seek.timeline().is_paused());
    }
    assert_eq!(doc.current_time(), 0.2);
    assert!(!doc.timeline().is_paused());

    doc.pause_animations();
    drop(doc.seek(9.0));
    assert!(doc.timeline().is_paused());
    doc.unpause_animations();
    assert!(!doc.timeline().is_paused());
}

#[test]
fn evaluator_at_leaves_clock_alone() {
    let mut doc = AnimatedDocument::parse_str(DOC).unwrap();
    doc.set_current_time(-4.0);
    assert_eq!(doc.current_time(), 0.0);
    let rect = by_id(&doc, "r");
    assert_eq!(
        doc.evaluator_at(0.5).animated_attribute(rect, "x").as_deref(),
        Some("5")
    );
    assert_eq!(doc.evaluator().time(), 0.0);
    assert_eq!(doc.current_time(), 0.0);
}

#[test]
fn from_path_reports_missing_file() {
    let err = AnimatedDocument::from_path(Path::new("target/no-such-dir/a.svg")).unwrap_err();
    assert!(matches!(err, FramesError::Other(_)));
    assert!(err.to_string().contains("read svg"));
}

fn by_id(doc: &AnimatedDocument, id: &str) -> crate::document::tree::NodeId {
    let tree = doc.tree();
    tree.elements()
        .find(|n| tree.attr(*n, "id") == Some(id))
        .unwrap()
}

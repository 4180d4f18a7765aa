use super::*;

fn doc(body: &str) -> AnimatedDocument {
    AnimatedDocument::parse_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg">{body}</svg>"#
    ))
    .unwrap()
}

fn by_id(tree: &Tree, id: &str) -> NodeId {
    tree.elements()
        .find(|n| tree.attr(*n, "id") == Some(id))
        .unwrap()
}

fn attr_at(snapshot: &Snapshot, id: &str, name: &str) -> Option<String> {
    let tree = snapshot.tree();
    tree.attr(by_id(tree, id), name).map(str::to_string)
}

const LINEAR: &str =
    r#"<rect id="r" x="0"><animate attributeName="x" from="0" to="100" dur="2s"/></rect>"#;

#[test]
fn bakes_linear_attribute_animation() {
    let mut d = doc(LINEAR);
    let freezer = AnimationFreezer::default();
    let s0 = freezer.freeze(&mut d, 0.0).unwrap();
    let s1 = freezer.freeze(&mut d, 1.0).unwrap();
    assert_eq!(attr_at(&s0, "r", "x").as_deref(), Some("0"));
    assert_eq!(attr_at(&s1, "r", "x").as_deref(), Some("50"));
    assert_eq!(s1.time(), 1.0);
    // The source tree is never written to.
    assert_eq!(d.tree().attr(by_id(d.tree(), "r"), "x"), Some("0"));
}

#[test]
fn freezing_is_deterministic() {
    let mut d = doc(LINEAR);
    let freezer = AnimationFreezer::default();
    let a = freezer.freeze(&mut d, 0.7).unwrap();
    let b = freezer.freeze(&mut d, 0.7).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, freezer.freeze_at(&d, 0.7).unwrap());
}

#[test]
fn timeline_is_restored_after_freeze() {
    let mut d = doc(LINEAR);
    d.set_current_time(3.0);
    AnimationFreezer::default().freeze(&mut d, 1.0).unwrap();
    assert_eq!(d.current_time(), 3.0);
    assert!(!d.timeline().is_paused());
}

#[test]
fn missing_attribute_name_fails_and_restores_timeline() {
    let mut d = doc(r#"<rect><animate from="0" to="1" dur="1s"/></rect>"#);
    d.set_current_time(0.25);
    let err = AnimationFreezer::default().freeze(&mut d, 0.5).unwrap_err();
    assert!(matches!(
        err,
        FramesError::MissingAttributeName { ref element } if element == "animate"
    ));
    assert_eq!(d.current_time(), 0.25);

    let empty = doc(r#"<rect><set attributeName=" " to="1"/></rect>"#);
    assert!(matches!(
        AnimationFreezer::default().freeze_at(&empty, 0.0),
        Err(FramesError::MissingAttributeName { .. })
    ));
}

#[test]
fn css_directive_writes_computed_style_inline() {
    let mut d = doc(
        r#"<rect id="r" style="fill: red">
            <animate attributeName="opacity" attributeType="CSS" from="0" to="1" dur="4s"/>
        </rect>"#,
    );
    let snapshot = AnimationFreezer::default().freeze(&mut d, 1.0).unwrap();
    let r = by_id(d.tree(), "r");
    let live = d.evaluator_at(1.0).computed_style(r, "opacity");
    assert_eq!(live, "0.25");
    assert_eq!(
        snapshot.tree().style_property(r, "opacity").as_deref(),
        Some(live.as_str())
    );
    assert_eq!(
        attr_at(&snapshot, "r", "style").as_deref(),
        Some("fill: red; opacity: 0.25;")
    );
}

#[test]
fn transform_keeps_rotation_and_drops_skew() {
    let mut d = doc(
        r#"<rect id="r" transform="rotate(10) skewX(20)">
            <animateTransform attributeName="transform" type="rotate" from="0" to="90" dur="1s" additive="sum"/>
        </rect>"#,
    );
    let snapshot = AnimationFreezer::default().freeze(&mut d, 0.5).unwrap();
    assert_eq!(
        attr_at(&snapshot, "r", "transform").as_deref(),
        Some("rotate(10) rotate(45)")
    );
}

#[test]
fn translate_is_baked_as_matrix() {
    let mut d = doc(
        r#"<rect id="r"><animateTransform attributeName="transform" type="translate" from="0 0" to="10 20" dur="2s"/></rect>"#,
    );
    let snapshot = AnimationFreezer::default().freeze(&mut d, 1.0).unwrap();
    assert_eq!(
        attr_at(&snapshot, "r", "transform").as_deref(),
        Some("matrix(1 0 0 1 5 10)")
    );
}

#[test]
fn inactive_xml_animation_falls_back_to_static_value() {
    let mut d = doc(
        r#"<rect id="r" width="7"><animate attributeName="width" to="1" begin="10s" dur="1s"/></rect>
        <rect id="bare"><animate attributeName="height" to="1" begin="10s" dur="1s"/></rect>"#,
    );
    let snapshot = AnimationFreezer::default().freeze(&mut d, 1.0).unwrap();
    assert_eq!(attr_at(&snapshot, "r", "width").as_deref(), Some("7"));
    assert_eq!(attr_at(&snapshot, "bare", "height"), None);
}

#[test]
fn motion_directives_are_not_baked() {
    let mut d = doc(
        r#"<rect id="r" x="1"><animateMotion path="M0 0 L10 10" dur="1s"/></rect>"#,
    );
    let snapshot = AnimationFreezer::default().freeze(&mut d, 0.5).unwrap();
    assert_eq!(snapshot.tree(), d.tree());
}

#[test]
fn positional_and_id_correspondence_agree() {
    let markup = r#"<g id="g">
            <rect id="a"><animate attributeName="x" from="0" to="10" dur="1s"/></rect>
            <rect id="b"><set attributeName="fill" to="blue"/></rect>
            <rect id="c"><animateTransform attributeName="transform" type="rotate" from="0" to="90" dur="1s"/></rect>
        </g>"#;
    let mut d = doc(markup);
    let by_id = AnimationFreezer::default().freeze(&mut d, 0.5).unwrap();
    let positional = AnimationFreezer::new(FreezeOptions {
        correspondence: Correspondence::Positional,
    })
    .freeze(&mut d, 0.5)
    .unwrap();
    assert_eq!(by_id, positional);
    assert_eq!(attr_at(&by_id, "a", "x").as_deref(), Some("5"));
    assert_eq!(attr_at(&by_id, "b", "fill").as_deref(), Some("rgb(0, 0, 255)"));
    assert_eq!(attr_at(&by_id, "c", "transform").as_deref(), Some("rotate(45)"));
}

#[test]
fn lenient_freeze_skips_bad_directives() {
    let mut d = doc(
        r#"<rect id="r" x="0">
            <animate from="0" to="1" dur="1s"/>
            <animate attributeName="x" from="0" to="10" dur="1s"/>
        </rect>"#,
    );
    let (snapshot, errors) = AnimationFreezer::default().freeze_lenient(&mut d, 0.5);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], FramesError::MissingAttributeName { .. }));
    assert_eq!(attr_at(&snapshot, "r", "x").as_deref(), Some("5"));
}

#[test]
fn negative_time_clamps_to_zero() {
    let d = doc(LINEAR);
    let snapshot = AnimationFreezer::default().freeze_at(&d, -3.0).unwrap();
    assert_eq!(snapshot.time(), 0.0);
    assert_eq!(attr_at(&snapshot, "r", "x").as_deref(), Some("0"));
}

#[test]
fn compact_number_syntax_is_baked() {
    let mut d = doc(
        r#"<rect id="r" transform="translate(10-5)">
            <animateTransform attributeName="transform" type="rotate" from="0" to="90" dur="1s" additive="sum"/>
        </rect>
        <rect id="v"><animateTransform attributeName="transform" type="translate" values="0,0;10-10" dur="1s"/></rect>"#,
    );
    let snapshot = AnimationFreezer::default().freeze(&mut d, 0.5).unwrap();
    assert_eq!(
        attr_at(&snapshot, "r", "transform").as_deref(),
        Some("matrix(1 0 0 1 10 -5) rotate(45)")
    );
    assert_eq!(
        attr_at(&snapshot, "v", "transform").as_deref(),
        Some("matrix(1 0 0 1 5 -5)")
    );
}

#[test]
fn css_freeze_keeps_existing_url_declarations() {
    let mut d = doc(
        r#"<rect id="r" style="fill: url('data:image/png;base64,AAAA'); stroke: red">
            <animate attributeName="opacity" attributeType="CSS" from="0" to="1" dur="2s"/>
        </rect>"#,
    );
    let snapshot = AnimationFreezer::default().freeze(&mut d, 1.0).unwrap();
    assert_eq!(
        attr_at(&snapshot, "r", "style").as_deref(),
        Some("fill: url('data:image/png;base64,AAAA'); stroke: red; opacity: 0.5;")
    );
}

#[test]
fn directive_without_parent_is_unresolvable() {
    use crate::{
        document::tree::Attribute,
        freeze::sampler::{FrameSampler, SampleOptions},
    };

    let attr = |name: &str, value: &str| Attribute {
        name: name.into(),
        value: value.into(),
    };
    let mut d = AnimatedDocument::from_tree(Tree::new(
        "animate",
        vec![attr("attributeName", "x"), attr("to", "5"), attr("dur", "1s")],
    ));

    let err = AnimationFreezer::default().freeze(&mut d, 0.5).unwrap_err();
    assert!(matches!(
        err,
        FramesError::UnresolvableTarget { ref element, .. } if element == "animate"
    ));

    let sampled = FrameSampler::new(SampleOptions::with_frame_rate(4.0))
        .unwrap()
        .sample(&mut d);
    assert!(matches!(
        sampled,
        Err(FramesError::UnresolvableTarget { .. })
    ));
}

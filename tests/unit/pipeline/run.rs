use super::*;
use crate::foundation::error::FramesError;

const SPIN: &str = r#"<svg viewBox="0 0 10 10">
  <rect width="4" height="4">
    <animateTransform attributeName="transform" type="rotate" from="0 5 5" to="360 5 5" dur="1s"/>
  </rect>
</svg>"#;

#[test]
fn source_kinds() {
    assert_eq!(
        SvgSource::parse("  <svg/>"),
        SvgSource::Inline("  <svg/>".into())
    );
    assert_eq!(
        SvgSource::parse("art/anim.svg"),
        SvgSource::File(PathBuf::from("art/anim.svg"))
    );
    assert_eq!(
        SvgSource::parse("art/anim.svg").resources_dir(),
        Some(PathBuf::from("art"))
    );
    assert_eq!(SvgSource::parse("<svg/>").resources_dir(), None);
}

#[test]
fn generates_inline_frames() {
    let generation = generate_frames(&FramesConfig::new(SPIN, 4.0)).unwrap();
    assert_eq!(generation.duration, 1.0);
    assert_eq!(generation.sequence.len(), 4);
    assert!(generation.errors.is_empty());
    assert!(!generation.cancelled);
    let third = String::from_utf8(generation.sequence.get(2).unwrap().payload().unwrap()).unwrap();
    assert!(third.contains(r#"transform="rotate(180 5 5)""#), "{third}");
}

#[test]
fn missing_file_is_an_error() {
    let err = generate_frames(&FramesConfig::new("target/nope/missing.svg", 4.0)).unwrap_err();
    assert!(matches!(err, FramesError::Other(_)));
}

#[test]
fn isolate_policy_returns_partial_results() {
    let config = FramesConfig {
        failure_policy: FailurePolicy::Isolate,
        ..FramesConfig::new(
            r#"<svg><rect><animate to="1" dur="1s"/><animate attributeName="x" to="4" dur="1s"/></rect></svg>"#,
            2.0,
        )
    };
    let generation = generate_frames(&config).unwrap();
    assert_eq!(generation.sequence.len(), 2);
    assert_eq!(generation.errors.len(), 2);

    let strict = FramesConfig {
        failure_policy: FailurePolicy::AbortAll,
        ..config
    };
    assert!(matches!(
        generate_frames(&strict),
        Err(FramesError::MissingAttributeName { .. })
    ));
}

#[test]
fn one_call_conversion() {
    let seq = svg_to_frames(SPIN, 2.0).unwrap();
    assert_eq!(seq.len(), 2);
    assert!(matches!(
        svg_to_frames(SPIN, 0.0),
        Err(FramesError::InvalidFrameRate(_))
    ));
}

use super::*;

#[test]
fn frame_rate_rejects_non_positive_and_non_finite() {
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            FrameRate::new(bad),
            Err(FramesError::InvalidFrameRate(_))
        ));
    }
    assert_eq!(FrameRate::new(4.0).unwrap().step_secs(), 0.25);
}

#[test]
fn ideal_sample_count_rounds_up() {
    let rate = FrameRate::new(10.0).unwrap();
    assert_eq!(rate.ideal_sample_count(0.0), 0);
    assert_eq!(rate.ideal_sample_count(1.0), 10);
    assert_eq!(rate.ideal_sample_count(1.05), 11);
}

#[test]
fn frame_rate_deserializes_through_validation() {
    let ok: FrameRate = serde_json::from_str("24").unwrap();
    assert_eq!(ok.as_f64(), 24.0);
    assert!(serde_json::from_str::<FrameRate>("0").is_err());
}

#[test]
fn duration_validation() {
    assert_eq!(validate_duration(2.5).unwrap(), 2.5);
    assert!(validate_duration(-0.1).is_err());
    assert!(validate_duration(f64::NAN).is_err());
}

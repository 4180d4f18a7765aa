use super::*;
use crate::document::parse::parse_tree;

fn timing_of(markup: &str) -> Timing {
    let svg = format!(r#"<svg xmlns="http://www.w3.org/2000/svg">{markup}</svg>"#);
    let tree = parse_tree(&svg).unwrap();
    let id = tree.elements().nth(1).unwrap();
    Timing::from_element(&tree, id)
}

#[test]
fn clock_values() {
    assert_eq!(parse_clock_value("3"), Some(3.0));
    assert_eq!(parse_clock_value("1.5s"), Some(1.5));
    assert_eq!(parse_clock_value("200ms"), Some(0.2));
    assert_eq!(parse_clock_value("2min"), Some(120.0));
    assert_eq!(parse_clock_value("1h"), Some(3600.0));
    assert_eq!(parse_clock_value("02:30"), Some(150.0));
    assert_eq!(parse_clock_value("1:00:01.5"), Some(3601.5));
    assert_eq!(parse_clock_value("indefinite"), None);
    assert_eq!(parse_clock_value("-1s"), None);
    assert_eq!(parse_clock_value(""), None);
}

#[test]
fn offsets_and_lists() {
    assert_eq!(parse_offset("-0.5s"), Some(-0.5));
    assert_eq!(parse_offset("+2s"), Some(2.0));
    assert_eq!(parse_offset_list("3s; click; 1s"), vec![1.0, 3.0]);
    assert!(parse_offset_list("indefinite").is_empty());
}

#[test]
fn defaults_when_attributes_absent() {
    let t = timing_of(r#"<animate attributeName="x"/>"#);
    assert_eq!(t.begins, vec![0.0]);
    assert_eq!(t.dur, TimeSpan::Indefinite);
    assert_eq!(t.fill, Fill::Remove);
    assert_eq!(t.active_end(), Some(TimeSpan::Indefinite));
}

#[test]
fn repeat_count_and_repeat_dur_take_the_minimum() {
    let t = timing_of(r#"<animate dur="2s" repeatCount="3" repeatDur="5s"/>"#);
    assert_eq!(t.active_duration(0.0), TimeSpan::Finite(5.0));
    let t = timing_of(r#"<animate dur="2s" repeatCount="1.5"/>"#);
    assert_eq!(t.active_duration(0.0), TimeSpan::Finite(3.0));
    let t = timing_of(r#"<animate dur="2s" repeatCount="indefinite"/>"#);
    assert_eq!(t.active_duration(0.0), TimeSpan::Indefinite);
}

#[test]
fn end_clips_the_active_duration() {
    let t = timing_of(r#"<animate begin="1s" dur="10s" end="4s"/>"#);
    assert_eq!(t.active_duration(1.0), TimeSpan::Finite(3.0));
    assert_eq!(t.active_end(), Some(TimeSpan::Finite(4.0)));
}

#[test]
fn phases_follow_begin_and_fill() {
    let t = timing_of(r#"<animate begin="1s" dur="2s"/>"#);
    assert_eq!(t.phase_at(0.5), Phase::Idle);
    let Phase::Active(p) = t.phase_at(2.0) else {
        panic!("expected active phase");
    };
    assert_eq!(p.iteration, 0);
    assert!((p.fraction - 0.5).abs() < 1e-12);
    assert_eq!(t.phase_at(3.0), Phase::Removed);

    let frozen = timing_of(r#"<animate begin="1s" dur="2s" fill="freeze"/>"#);
    let Phase::Frozen(p) = frozen.phase_at(10.0) else {
        panic!("expected frozen phase");
    };
    assert_eq!(p.iteration, 0);
    assert_eq!(p.fraction, 1.0);
}

#[test]
fn frozen_mid_iteration_keeps_fraction() {
    let t = timing_of(r#"<animate dur="2s" repeatCount="2.5" fill="freeze"/>"#);
    let p = t.phase_at(100.0).progress().unwrap();
    assert_eq!(p.iteration, 2);
    assert!((p.fraction - 0.5).abs() < 1e-12);
}

#[test]
fn repeating_iterations() {
    let t = timing_of(r#"<animate dur="1s" repeatCount="3"/>"#);
    let p = t.phase_at(2.25).progress().unwrap();
    assert_eq!(p.iteration, 2);
    assert!((p.fraction - 0.25).abs() < 1e-12);
}

#[test]
fn unresolved_begin_never_starts() {
    let t = timing_of(r#"<animate begin="click" dur="1s"/>"#);
    assert_eq!(t.phase_at(0.5), Phase::Idle);
    assert_eq!(t.active_end(), None);
}

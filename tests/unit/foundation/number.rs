use super::*;

#[test]
fn fmt_number_trims_and_normalizes() {
    assert_eq!(fmt_number(50.0), "50");
    assert_eq!(fmt_number(0.5), "0.5");
    assert_eq!(fmt_number(-12.25), "-12.25");
    assert_eq!(fmt_number(1.0 / 3.0), "0.333333");
    assert_eq!(fmt_number(-0.0000001), "0");
    assert_eq!(fmt_number(f64::NAN), "0");
}

#[test]
fn number_lists_accept_commas_and_spaces() {
    assert_eq!(
        parse_number_list("0 0, 10,20  -5").unwrap(),
        vec![0.0, 0.0, 10.0, 20.0, -5.0]
    );
    assert!(parse_number_list("").is_none());
    assert!(parse_number_list("1 two").is_none());
}

#[test]
fn number_unit_split() {
    assert_eq!(split_number_unit("12.5px"), Some((12.5, "px")));
    assert_eq!(split_number_unit(" 40% "), Some((40.0, "%")));
    assert_eq!(split_number_unit("-3"), Some((-3.0, "")));
    assert_eq!(split_number_unit("2em"), Some((2.0, "em")));
    assert_eq!(split_number_unit("1e2"), Some((100.0, "")));
    assert_eq!(split_number_unit(".5"), Some((0.5, "")));
    assert!(split_number_unit("red").is_none());
    assert!(split_number_unit("10 20").is_none());
    assert!(split_number_unit(".").is_none());
}

#[test]
fn number_lists_without_separators() {
    assert_eq!(parse_number_list("10-5").unwrap(), vec![10.0, -5.0]);
    assert_eq!(parse_number_list(".5.5").unwrap(), vec![0.5, 0.5]);
    assert_eq!(parse_number_list("1e2-3").unwrap(), vec![100.0, -3.0]);
}

use super::*;

#[test]
fn parses_every_function_with_defaults() {
    let items = parse_transform_list(
        "translate(10) scale(2), rotate(45 5 5) skewX(30) skewY(-10) matrix(1,0,0,1,3,4)",
    );
    let kinds: Vec<_> = items.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TransformKind::Translate,
            TransformKind::Scale,
            TransformKind::Rotate,
            TransformKind::SkewX,
            TransformKind::SkewY,
            TransformKind::Matrix,
        ]
    );
    assert_eq!(items[0].matrix, Affine::translate((10.0, 0.0)));
    assert_eq!(items[1].matrix, Affine::scale_non_uniform(2.0, 2.0));
    assert_eq!(items[2].angle, 45.0);
    assert_eq!(items[2].center, Point::new(5.0, 5.0));
}

#[test]
fn malformed_lists_are_empty() {
    assert!(parse_transform_list("rotate(").is_empty());
    assert!(parse_transform_list("wobble(3)").is_empty());
    assert!(parse_transform_list("rotate(1 2)").is_empty());
    assert!(parse_transform_list("").is_empty());
}

#[test]
fn bake_keeps_matrix_translate_and_rotate_in_order() {
    let items = parse_transform_list("rotate(30) translate(5 6) scale(3) matrix(1 2 3 4 5 6)");
    assert_eq!(
        bake_transform_list(&items),
        "rotate(30) matrix(1 0 0 1 5 6) matrix(1 2 3 4 5 6)"
    );
}

#[test]
fn bake_drops_skew_without_error() {
    let items = parse_transform_list("skewX(10) rotate(90)");
    assert_eq!(bake_transform_list(&items), "rotate(90)");
    let only_skew = parse_transform_list("skewY(20)");
    assert_eq!(bake_transform_list(&only_skew), "");
}

#[test]
fn bake_keeps_rotation_centre() {
    let items = parse_transform_list("rotate(45 10 20)");
    assert_eq!(bake_transform_list(&items), "rotate(45 10 20)");
}

#[test]
fn animate_transform_type_and_params() {
    assert_eq!(
        TransformKind::from_type_attr(None),
        Some(TransformKind::Translate)
    );
    assert_eq!(
        TransformKind::from_type_attr(Some("skewY")),
        Some(TransformKind::SkewY)
    );
    assert_eq!(TransformKind::from_type_attr(Some("matrix")), None);
    assert_eq!(
        TransformKind::Scale.normalize_params(&[3.0]),
        Some(vec![3.0, 3.0])
    );
    assert_eq!(TransformKind::Rotate.normalize_params(&[1.0, 2.0]), None);
    assert_eq!(TransformKind::Scale.identity_params(), vec![1.0, 1.0]);
}

#[test]
fn compact_arguments_parse() {
    let items = parse_transform_list("translate(10-5)rotate(30.5.5.5)");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].matrix, Affine::translate((10.0, -5.0)));
    assert_eq!(items[1].angle, 30.5);
    assert_eq!(items[1].center, Point::new(0.5, 0.5));
    assert_eq!(bake_transform_list(&items[..1]), "matrix(1 0 0 1 10 -5)");
}

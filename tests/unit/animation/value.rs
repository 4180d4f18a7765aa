use super::*;

#[test]
fn parse_picks_the_narrowest_shape() {
    assert_eq!(
        AnimValue::parse("width", "10px"),
        AnimValue::Number {
            value: 10.0,
            unit: "px".to_string()
        }
    );
    assert_eq!(
        AnimValue::parse("viewBox", "0 0 100 50"),
        AnimValue::List(vec![0.0, 0.0, 100.0, 50.0])
    );
    assert_eq!(
        AnimValue::parse("fill", "#ff0000"),
        AnimValue::Color(Rgba {
            r: 255.0,
            g: 0.0,
            b: 0.0,
            a: 1.0
        })
    );
    assert_eq!(
        AnimValue::parse("visibility", "hidden"),
        AnimValue::Text("hidden".to_string())
    );
    // Not a color property: stays text.
    assert_eq!(
        AnimValue::parse("class", "red"),
        AnimValue::Text("red".to_string())
    );
}

#[test]
fn numbers_interpolate_and_keep_units() {
    let a = AnimValue::parse("x", "0");
    let b = AnimValue::parse("x", "100px");
    assert_eq!(a.interpolate(&b, 0.5).unwrap().to_markup(), "50px");
    let c = AnimValue::parse("x", "10%");
    assert!(b.interpolate(&c, 0.5).is_none());
}

#[test]
fn colors_interpolate_per_channel() {
    let a = AnimValue::parse("fill", "black");
    let b = AnimValue::parse("fill", "rgb(200, 100, 50)");
    assert_eq!(
        a.interpolate(&b, 0.5).unwrap().to_markup(),
        "rgb(100, 50, 25)"
    );
}

#[test]
fn lists_require_matching_lengths() {
    let a = AnimValue::parse("points", "0 0 10 10");
    let b = AnimValue::parse("points", "10 10 20 20");
    assert_eq!(a.interpolate(&b, 0.5).unwrap().to_markup(), "5 5 15 15");
    let c = AnimValue::parse("points", "1 2");
    assert!(a.interpolate(&c, 0.5).is_none());
}

#[test]
fn add_scale_and_distance() {
    let a = AnimValue::parse("r", "3");
    let b = AnimValue::parse("r", "4");
    assert_eq!(a.add(&b).unwrap().to_markup(), "7");
    assert_eq!(b.scale(2.0).unwrap().to_markup(), "8");
    assert_eq!(a.distance(&b), Some(1.0));
    assert_eq!(
        AnimValue::parse("d", "M0 0")
            .distance(&AnimValue::parse("d", "M1 1")),
        None
    );
}

#[test]
fn zero_like_matches_shape() {
    assert_eq!(
        AnimValue::parse("x", "5px").zero_like().to_markup(),
        "0px"
    );
    assert_eq!(
        AnimValue::parse("viewBox", "1 2 3").zero_like(),
        AnimValue::List(vec![0.0; 3])
    );
}

#[test]
fn translucent_colors_serialize_as_rgba() {
    let c = AnimValue::Color(Rgba {
        r: 10.0,
        g: 20.0,
        b: 30.0,
        a: 0.5,
    });
    assert_eq!(c.to_markup(), "rgba(10, 20, 30, 0.5)");
}

#![cfg(feature = "serde")]

use geode::prelude::*;

#[test]
fn shapes_survive_json() {
    let shapes: Vec<Shape> = vec![
        Circle::new((1., 2.), 3.).into(),
        Rect::new(0., 0., 4., 2.).into(),
        Polygon::new(vec![
            Point::new(0., 0.),
            Point::new(2., 0.),
            Point::new(1., 2.),
        ])
        .into(),
        Segment::new((0., 0.), (1., 1.)).with_flipped_normals(true).into(),
    ];

    let json = serde_json::to_string(&shapes).unwrap();
    let back: Vec<Shape> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, shapes);
}

#[test]
fn configs_survive_json() {
    let context: Context = ContextBuilder::new()
        .update_parallax(false)
        .clear_area_default_mask(LayerMask::from_layers([1, 5]))
        .into();
    let json = serde_json::to_string(&context).unwrap();
    assert_eq!(serde_json::from_str::<Context>(&json).unwrap(), context);

    let subdivision: SubdivisionConfig = SubdivisionConfigBuilder::new()
        .max_area(12.5_f32)
        .max_depth(3_usize)
        .into();
    let value = serde_json::to_value(&subdivision).unwrap();
    assert_eq!(value["max_depth"], 3);

    let back: SubdivisionConfig = serde_json::from_value(value).unwrap();
    assert_eq!(back.max_area(), 12.5);
    assert_eq!(back.max_depth(), 3);
    assert_eq!(back.keep_chance(), 0.5);
}

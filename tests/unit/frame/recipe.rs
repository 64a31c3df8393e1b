use kurbo::Shape;

use super::*;

#[test]
fn rect_scales_to_canvas() {
    let path = build_path(
        &[PathCmd::Rect {
            x: 0.25,
            y: 0.5,
            w: 0.5,
            h: 0.25,
        }],
        200.0,
        100.0,
    );
    let bbox = path.bounding_box();
    assert_eq!((bbox.x0, bbox.y0, bbox.x1, bbox.y1), (50.0, 50.0, 150.0, 75.0));
}

#[test]
fn circle_radius_uses_the_shorter_side() {
    let path = build_path(
        &[PathCmd::Circle {
            cx: 0.5,
            cy: 0.5,
            radius: 0.1,
        }],
        200.0,
        100.0,
    );
    let bbox = path.bounding_box();
    // Radius = 0.1 × min(200, 100) = 10.
    assert!((bbox.width() - 20.0).abs() < 0.5);
    assert!((bbox.height() - 20.0).abs() < 0.5);
}

#[test]
fn polygon_closes_through_all_points() {
    let path = build_path(
        &[PathCmd::Polygon {
            points: vec![[0.0, 0.0], [0.5, 0.4], [1.0, 0.0]],
        }],
        100.0,
        100.0,
    );
    let bbox = path.bounding_box();
    assert_eq!((bbox.x0, bbox.y0, bbox.x1, bbox.y1), (0.0, 0.0, 100.0, 40.0));
}

#[test]
fn empty_recipe_builds_an_empty_path() {
    assert!(build_path(&[], 100.0, 100.0).elements().is_empty());
}

#[test]
fn commands_round_trip_through_serde() {
    let cmds = vec![
        PathCmd::RoundRect {
            x: 0.0,
            y: 0.0,
            w: 1.0,
            h: 1.0,
            radius: 0.1,
        },
        PathCmd::Arc {
            from: [0.0, 1.0],
            via: [0.5, 0.8],
            to: [1.0, 1.0],
        },
    ];
    let json = serde_json::to_string(&cmds).unwrap();
    let back: Vec<PathCmd> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cmds);
}

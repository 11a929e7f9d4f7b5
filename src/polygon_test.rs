#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn triangle() -> Polygon {
    Polygon::from_points(PolygonMode::Click, vec![pt(0.0, 0.0), pt(40.0, 0.0), pt(40.0, 30.0)])
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_polygon_is_empty_and_invalid() {
    let p = Polygon::new(PolygonMode::Freeform);
    assert!(p.points.is_empty());
    assert!(p.selection_point.is_none());
    assert!(!p.is_valid());
    assert_eq!(p.handle_distance(pt(0.0, 0.0)), f64::INFINITY);
}

#[test]
fn handle_starts_on_first_vertex() {
    assert_eq!(triangle().selection_point, Some(pt(0.0, 0.0)));
}

#[test]
fn flat_points_roundtrip() {
    let p = triangle();
    let flat = p.flat_points();
    assert_eq!(flat, vec![0.0, 0.0, 40.0, 0.0, 40.0, 30.0]);
    assert_eq!(Polygon::from_flat(PolygonMode::Click, &flat).points, p.points);
}

#[test]
fn from_flat_drops_trailing_odd_value() {
    let p = Polygon::from_flat(PolygonMode::Click, &[1.0, 2.0, 3.0]);
    assert_eq!(p.points, vec![pt(1.0, 2.0)]);
}

#[test]
fn validity_needs_three_vertices() {
    let two = Polygon::from_points(PolygonMode::Click, vec![pt(0.0, 0.0), pt(1.0, 1.0)]);
    assert!(!two.is_valid());
    assert!(triangle().is_valid());
}

// =============================================================
// Vertex collection
// =============================================================

#[test]
fn first_pushed_vertex_becomes_handle() {
    let mut p = Polygon::new(PolygonMode::Freeform);
    p.push_vertex(pt(3.0, 4.0));
    p.push_vertex(pt(5.0, 6.0));
    assert_eq!(p.selection_point, Some(pt(3.0, 4.0)));
    assert_eq!(p.points.len(), 2);
}

#[test]
fn tapped_vertex_in_same_cell_is_dropped() {
    let mut p = Polygon::new(PolygonMode::Click);
    assert!(p.push_tapped_vertex(pt(10.2, 10.7)));
    assert!(!p.push_tapped_vertex(pt(10.9, 10.1)));
    assert!(p.push_tapped_vertex(pt(11.0, 10.1)));
    assert_eq!(p.points.len(), 2);
}

#[test]
fn tapped_vertex_only_compares_with_last() {
    let mut p = Polygon::new(PolygonMode::Click);
    p.push_tapped_vertex(pt(0.0, 0.0));
    p.push_tapped_vertex(pt(20.0, 0.0));
    assert!(p.push_tapped_vertex(pt(0.0, 0.0)));
    assert_eq!(p.points.len(), 3);
}

// =============================================================
// Editing
// =============================================================

#[test]
fn drag_moves_vertex_nearest_drag_start() {
    let mut p = triangle();
    let ev = PointerEvent::at(pt(45.0, 35.0)).from_prev(pt(39.0, 29.0));
    assert!(p.drag_vertex(&ev));
    assert_eq!(p.points[2], pt(46.0, 36.0));
    assert_eq!(p.points[1], pt(40.0, 0.0));
}

#[test]
fn drag_sticks_to_one_vertex_until_ended() {
    let mut p = triangle();
    p.drag_vertex(&PointerEvent::at(pt(40.0, 5.0)).from_prev(pt(40.0, 1.0)));
    // Now nearer vertex 2, but the drag keeps moving vertex 1.
    p.drag_vertex(&PointerEvent::at(pt(40.0, 25.0)).from_prev(pt(40.0, 5.0)));
    assert_eq!(p.points[1], pt(40.0, 24.0));
    assert_eq!(p.points[2], pt(40.0, 30.0));

    p.end_drag();
    p.drag_vertex(&PointerEvent::at(pt(40.0, 40.0)).from_prev(pt(40.0, 30.0)));
    assert_eq!(p.points[2], pt(40.0, 40.0));
}

#[test]
fn dragging_first_vertex_moves_handle() {
    let mut p = triangle();
    p.drag_vertex(&PointerEvent::at(pt(-5.0, -5.0)).from_prev(pt(0.0, 0.0)));
    assert_eq!(p.selection_point, Some(pt(-5.0, -5.0)));
}

#[test]
fn drag_on_empty_polygon_does_nothing() {
    let mut p = Polygon::new(PolygonMode::Click);
    assert!(!p.drag_vertex(&PointerEvent::at(pt(1.0, 1.0))));
}

#[test]
fn translate_shifts_vertices_and_handle() {
    let mut p = triangle();
    p.translate_by(pt(5.0, -5.0));
    assert_eq!(p.points, vec![pt(5.0, -5.0), pt(45.0, -5.0), pt(45.0, 25.0)]);
    assert_eq!(p.selection_point, Some(pt(5.0, -5.0)));
}

#[test]
fn rescale_about_centroid() {
    let mut p = Polygon::from_points(
        PolygonMode::Click,
        vec![pt(-1.0, -1.0), pt(1.0, -1.0), pt(1.0, 1.0), pt(-1.0, 1.0)],
    );
    assert!(p.rescale(3.0));
    assert_eq!(p.points[0], pt(-3.0, -3.0));
    assert_eq!(p.points[2], pt(3.0, 3.0));
    assert_eq!(p.selection_point, Some(pt(-3.0, -3.0)));
}

#[test]
fn rescale_empty_polygon_fails() {
    assert!(!Polygon::new(PolygonMode::Click).rescale(2.0));
}

#![allow(clippy::float_cmp)]

use super::*;
use crate::shape::Shape;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn finished(mut shape: Shape) -> Shape {
    shape.finish();
    shape
}

// =============================================================
// closest_handle
// =============================================================

#[test]
fn handle_hit_on_circle_perimeter_point() {
    let c = finished(Shape::circle(pt(100.0, 100.0), 10.0));
    let id = c.id();
    let hit = closest_handle(&[c], pt(112.0, 100.0), 10.0).unwrap();
    assert_eq!(hit.shape_id, id);
    assert_eq!(hit.part, HitPart::Handle);
    assert_eq!(hit.distance, 2.0);
}

#[test]
fn handle_miss_when_beyond_threshold() {
    let c = finished(Shape::circle(pt(100.0, 100.0), 10.0));
    assert!(closest_handle(&[c], pt(100.0, 100.0), 10.0).is_none());
}

#[test]
fn threshold_is_exclusive() {
    let c = finished(Shape::circle(pt(0.0, 0.0), 10.0));
    assert!(closest_handle(&[c], pt(20.0, 0.0), 10.0).is_none());
}

#[test]
fn handle_skips_locked_shapes() {
    let mut c = finished(Shape::circle(pt(0.0, 0.0), 10.0));
    c.lock();
    assert!(closest_handle(&[c], pt(10.0, 0.0), 10.0).is_none());
}

#[test]
fn handle_prefers_nearer_shape() {
    let a = finished(Shape::circle(pt(0.0, 0.0), 10.0));
    let b = finished(Shape::circle(pt(4.0, 0.0), 10.0));
    let b_id = b.id();
    let hit = closest_handle(&[a, b], pt(13.0, 0.0), 10.0).unwrap();
    assert_eq!(hit.shape_id, b_id);
}

#[test]
fn handle_tie_prefers_topmost() {
    let a = finished(Shape::circle(pt(0.0, 0.0), 10.0));
    let b = finished(Shape::circle(pt(0.0, 0.0), 10.0));
    let b_id = b.id();
    let hit = closest_handle(&[a, b], pt(10.0, 0.0), 10.0).unwrap();
    assert_eq!(hit.shape_id, b_id);
}

#[test]
fn polygon_without_points_has_no_handle() {
    let p = Shape::polygon(vec![]);
    assert!(closest_handle(&[p], pt(0.0, 0.0), 10.0).is_none());
}

#[test]
fn polygon_handle_is_first_vertex_only() {
    let p = finished(Shape::polygon(vec![pt(0.0, 0.0), pt(50.0, 0.0), pt(50.0, 50.0)]));
    assert!(closest_handle(std::slice::from_ref(&p), pt(50.0, 50.0), 10.0).is_none());
    assert!(closest_handle(&[p], pt(1.0, 1.0), 10.0).is_some());
}

// =============================================================
// closest_interaction
// =============================================================

#[test]
fn interaction_hits_any_polygon_vertex() {
    let p = finished(Shape::polygon(vec![pt(0.0, 0.0), pt(50.0, 0.0), pt(50.0, 50.0)]));
    let id = p.id();
    let hit = closest_interaction(&[p], pt(49.0, 49.0), 10.0).unwrap();
    assert_eq!(hit.shape_id, id);
    assert_eq!(hit.part, HitPart::InteractionPoint);
}

#[test]
fn interaction_hits_ellipse_minor_axis_handle() {
    let e = finished(Shape::ellipse(pt(0.0, 0.0), 20.0, 30.0, 0.0));
    assert!(closest_handle(std::slice::from_ref(&e), pt(0.0, 30.0), 10.0).is_none());
    assert!(closest_interaction(&[e], pt(0.0, 30.0), 10.0).is_some());
}

#[test]
fn interaction_skips_locked_shapes() {
    let mut p = finished(Shape::polygon(vec![pt(0.0, 0.0), pt(50.0, 0.0), pt(50.0, 50.0)]));
    p.lock();
    assert!(closest_interaction(&[p], pt(50.0, 0.0), 10.0).is_none());
}

#[test]
fn empty_shape_list_hits_nothing() {
    assert!(closest_handle(&[], pt(0.0, 0.0), 10.0).is_none());
    assert!(closest_interaction(&[], pt(0.0, 0.0), 10.0).is_none());
}

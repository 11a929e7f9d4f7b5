#![allow(clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, PI};

use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// Point
// =============================================================

#[test]
fn distance_is_euclidean() {
    assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
}

#[test]
fn distance_is_symmetric() {
    let a = Point::new(-2.0, 7.5);
    let b = Point::new(11.0, -1.0);
    assert_eq!(a.distance(b), b.distance(a));
}

#[test]
fn offset_then_negated_offset_restores() {
    let p = Point::new(10.25, -3.5);
    let back = p.offset(Point::new(5.0, 5.0)).offset(Point::new(-5.0, -5.0));
    assert_eq!(back, p);
}

#[test]
fn delta_from_inverts_offset() {
    let a = Point::new(1.0, 2.0);
    let b = Point::new(4.0, -2.0);
    assert_eq!(a.offset(b.delta_from(a)), b);
}

#[test]
fn same_cell_uses_floor() {
    assert!(Point::new(10.2, 5.9).same_cell(Point::new(10.9, 5.0)));
    assert!(!Point::new(10.9, 5.0).same_cell(Point::new(11.0, 5.0)));
    assert!(Point::new(-0.5, -0.5).same_cell(Point::new(-0.1, -0.9)));
    assert!(!Point::new(-0.5, 0.0).same_cell(Point::new(0.5, 0.0)));
}

// =============================================================
// polar
// =============================================================

#[test]
fn polar_at_zero_angle_is_along_x() {
    let p = polar(Point::new(10.0, 20.0), 5.0, 0.0);
    assert_eq!(p, Point::new(15.0, 20.0));
}

#[test]
fn polar_quarter_turn_is_along_y() {
    let p = polar(Point::new(0.0, 0.0), 2.0, FRAC_PI_2);
    assert!(approx(p.x, 0.0));
    assert!(approx(p.y, 2.0));
}

#[test]
fn polar_half_turn_is_negative_x() {
    let p = polar(Point::new(1.0, 1.0), 3.0, PI);
    assert!(approx(p.x, -2.0));
    assert!(approx(p.y, 1.0));
}

// =============================================================
// centroid / nearest
// =============================================================

#[test]
fn centroid_empty_is_none() {
    assert!(centroid(&[]).is_none());
}

#[test]
fn centroid_of_square() {
    let pts = [Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(2.0, 2.0), Point::new(0.0, 2.0)];
    assert_eq!(centroid(&pts), Some(Point::new(1.0, 1.0)));
}

#[test]
fn nearest_empty_is_none() {
    assert!(nearest(&[], Point::new(0.0, 0.0)).is_none());
}

#[test]
fn nearest_picks_closest_index() {
    let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
    let (i, d) = nearest(&pts, Point::new(9.0, 9.0)).unwrap();
    assert_eq!(i, 2);
    assert!(approx(d, 2.0_f64.sqrt()));
}

#[test]
fn nearest_tie_prefers_first() {
    let pts = [Point::new(-1.0, 0.0), Point::new(1.0, 0.0)];
    let (i, _) = nearest(&pts, Point::new(0.0, 0.0)).unwrap();
    assert_eq!(i, 0);
}

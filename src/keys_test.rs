use super::*;
use crate::geom::Point;
use crate::input::{CtrlSide, DrawMode, PointerEvent};
use crate::shape::{Shape, ShapeId};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn painter() -> Painter {
    Painter::default()
}

fn add_circle(p: &mut Painter, x: f64, y: f64) -> ShapeId {
    p.create_add_shape(Shape::circle(pt(x, y), 10.0)).unwrap()
}

fn none() -> Modifiers {
    Modifiers::default()
}

fn ctrl() -> Modifiers {
    Modifiers { ctrl: true, ..Modifiers::default() }
}

// =============================================================
// Ctrl tracking
// =============================================================

#[test]
fn ctrl_keys_are_tracked_per_side() {
    let mut p = painter();
    p.on_key_down(&Key::Ctrl(CtrlSide::Left), none());
    p.on_key_down(&Key::Ctrl(CtrlSide::Right), none());
    p.on_key_up(&Key::Ctrl(CtrlSide::Left), none());
    assert!(p.ctrl_held());
    p.on_key_up(&Key::Ctrl(CtrlSide::Right), none());
    assert!(!p.ctrl_held());
}

#[test]
fn releasing_unpressed_ctrl_is_harmless() {
    let mut p = painter();
    assert!(!p.on_key_up(&Key::Ctrl(CtrlSide::Either), none()));
    assert!(!p.ctrl_held());
}

#[test]
fn sided_release_clears_sideless_press() {
    let mut p = painter();
    p.on_key_down(&Key::from_name("ctrl"), none());
    p.on_key_up(&Key::from_name("lctrl"), none());
    assert!(!p.ctrl_held());
    assert!(!p.additive_selection());
}

#[test]
fn sideless_release_clears_every_side() {
    let mut p = painter();
    p.on_key_down(&Key::Ctrl(CtrlSide::Left), none());
    p.on_key_down(&Key::Ctrl(CtrlSide::Right), none());
    p.on_key_up(&Key::Ctrl(CtrlSide::Either), none());
    assert!(!p.ctrl_held());
}

#[test]
fn focus_loss_forgets_ctrl() {
    let mut p = painter();
    p.on_key_down(&Key::Ctrl(CtrlSide::Left), none());
    p.on_focus_lost();
    assert!(!p.ctrl_held());
}

// =============================================================
// Arrows
// =============================================================

#[test]
fn arrows_nudge_selection_on_key_down() {
    let mut p = painter();
    let a = add_circle(&mut p, 0.0, 0.0);
    let b = add_circle(&mut p, 50.0, 0.0);
    p.select_shape(a);
    assert!(p.on_key_down(&Key::Up, none()));
    assert!(p.on_key_down(&Key::Right, none()));
    assert!(!p.on_key_up(&Key::Right, none()));
    assert_eq!(p.shape(a).unwrap().handle(), Some(pt(11.0, 1.0)));
    assert_eq!(p.shape(b).unwrap().handle(), Some(pt(60.0, 0.0)));
}

#[test]
fn arrows_without_selection_are_not_consumed() {
    let mut p = painter();
    add_circle(&mut p, 0.0, 0.0);
    assert!(!p.on_key_down(&Key::Left, none()));
}

// =============================================================
// Shortcuts
// =============================================================

#[test]
fn escape_finishes_current_before_clearing_selection() {
    let mut p = painter();
    let a = add_circle(&mut p, 0.0, 0.0);
    let b = add_circle(&mut p, 50.0, 0.0);
    p.select_shape(a);
    p.start_shape_interaction(b, None);

    assert!(p.on_key_up(&Key::Escape, none()));
    assert!(p.current_id().is_none());
    assert_eq!(p.selected_ids(), &[a]);

    assert!(p.on_key_up(&Key::Escape, none()));
    assert!(p.selected_ids().is_empty());

    assert!(!p.on_key_up(&Key::Escape, none()));
}

#[test]
fn escape_closes_polygon_in_progress() {
    let mut p = Painter::with_config(crate::config::PainterConfig {
        draw_mode: DrawMode::Polygon,
        ..crate::config::PainterConfig::default()
    });
    for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)] {
        p.on_pointer_down(&PointerEvent::at(pt(x, y)));
        p.on_pointer_up(&PointerEvent::at(pt(x, y)));
    }
    assert!(p.on_key_up(&Key::Escape, none()));
    assert_eq!(p.shapes().len(), 1);
    assert!(p.shapes()[0].is_finished());
}

#[test]
fn delete_removes_selection() {
    let mut p = painter();
    let a = add_circle(&mut p, 0.0, 0.0);
    let b = add_circle(&mut p, 50.0, 0.0);
    p.select_shape(a);
    assert!(p.on_key_up(&Key::Delete, none()));
    assert_eq!(p.shapes().len(), 1);
    assert_eq!(p.shapes()[0].id(), b);
    assert!(!p.on_key_up(&Key::Delete, none()));
}

#[test]
fn ctrl_a_selects_unlocked() {
    let mut p = painter();
    let a = add_circle(&mut p, 0.0, 0.0);
    let b = add_circle(&mut p, 50.0, 0.0);
    p.lock_shape(a);
    assert!(p.on_key_up(&Key::Char('a'), ctrl()));
    assert_eq!(p.selected_ids(), &[b]);
}

#[test]
fn held_ctrl_counts_for_shortcuts() {
    let mut p = painter();
    add_circle(&mut p, 0.0, 0.0);
    p.on_key_down(&Key::Ctrl(CtrlSide::Right), none());
    assert!(p.on_key_up(&Key::Char('a'), none()));
    assert_eq!(p.selected_ids().len(), 1);
}

#[test]
fn plain_a_is_not_a_shortcut() {
    let mut p = painter();
    add_circle(&mut p, 0.0, 0.0);
    assert!(!p.on_key_up(&Key::Char('a'), none()));
    assert!(p.selected_ids().is_empty());
}

#[test]
fn ctrl_d_duplicates_selection() {
    let mut p = painter();
    let a = add_circle(&mut p, 0.0, 0.0);
    p.select_shape(a);
    assert!(p.on_key_up(&Key::Char('d'), ctrl()));
    assert_eq!(p.shapes().len(), 2);
    assert_eq!(p.shapes()[1].handle(), Some(pt(25.0, 15.0)));
    assert!(p.selected_ids().is_empty());
    assert!(!p.on_key_up(&Key::Char('d'), ctrl()));
}

#[test]
fn locked_painter_ignores_shortcuts() {
    let mut p = painter();
    add_circle(&mut p, 0.0, 0.0);
    p.set_locked(true);
    assert!(!p.on_key_up(&Key::Char('a'), ctrl()));
    assert!(p.selected_ids().is_empty());
}

#[test]
fn unknown_keys_are_not_consumed() {
    let mut p = painter();
    assert!(!p.on_key_down(&Key::Other("F13".to_owned()), none()));
    assert!(!p.on_key_up(&Key::from_name("q"), none()));
}

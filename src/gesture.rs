//! Pointer gesture state machine.
//!
//! A gesture is claimed on pointer-down and classified by its
//! [`Resolution`]. A press near the current shape forwards to it. A press on a
//! handle selects, or drags the selection. Anything else stays unresolved
//! until the first move or the release creates a new shape, or until the
//! long-press timer starts editing the nearest shape.
//!
//! Only one gesture is tracked at a time; a second pointer is not claimed.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use std::time::Duration;

use tracing::{debug, warn};

use crate::engine::{Action, Current, Painter};
use crate::hit;
use crate::input::{Gesture, PointerEvent, Resolution};
use crate::timer::{ManualClock, Scheduler, TimerId};

impl<S: Scheduler> Painter<S> {
    /// Pointer pressed. Returns whether the painter claimed the gesture.
    pub fn on_pointer_down(&mut self, ev: &PointerEvent) -> bool {
        if self.config.locked || self.gesture.is_some() || !ev.inside {
            return false;
        }
        let mut g = Gesture::new(ev.pointer, ev.pos);
        self.emit(Action::GrabPointer(ev.pointer));
        let threshold = self.config.touch_threshold();

        if let Some(shape) = self.current_shape() {
            let far = shape.is_finished() && shape.closest_interaction_distance(ev.pos) >= threshold;
            if far {
                g.cleared_current = true;
                self.finish_current_shape();
            } else {
                g.resolution = Resolution::Current;
                self.forward_start(ev);
                debug!(pointer = ev.pointer.0, "gesture forwarded to current shape");
                self.gesture = Some(g);
                return true;
            }
        }

        if let Some(hit) = hit::closest_handle(&self.shapes, ev.pos, threshold) {
            g.resolution = Resolution::Selected;
            g.target = Some(hit.shape_id);
            g.target_was_unselected = !self.is_selected(hit.shape_id);
            g.timer = Some(self.scheduler.schedule(self.config.long_touch_delay()));
            debug!(shape_id = %hit.shape_id, part = ?hit.part, distance = hit.distance, "gesture on shape handle");
        } else if self.ctrl_held() {
            g.resolution = Resolution::Done;
        } else {
            g.timer = Some(self.scheduler.schedule(self.config.long_touch_delay()));
        }
        self.gesture = Some(g);
        true
    }

    /// Pointer moved. Returns whether the event belonged to the claimed gesture.
    pub fn on_pointer_move(&mut self, ev: &PointerEvent) -> bool {
        let Some(mut g) = self.take_gesture(ev) else {
            return false;
        };
        self.cancel_long_press(&mut g);
        self.gesture_move(&mut g, ev);
        self.gesture = Some(g);
        true
    }

    /// Pointer released. Returns whether the event ended the claimed gesture.
    pub fn on_pointer_up(&mut self, ev: &PointerEvent) -> bool {
        let Some(mut g) = self.take_gesture(ev) else {
            return false;
        };
        self.cancel_long_press(&mut g);
        self.emit(Action::ReleasePointer(ev.pointer));
        self.gesture_up(&mut g, ev);
        debug!(pointer = ev.pointer.0, resolution = ?g.resolution, "gesture ended");
        true
    }

    /// Deliver an expired timer. Returns `false` for stale or unknown ids.
    pub fn fire_timer(&mut self, id: TimerId) -> bool {
        let Some(mut g) = self.gesture.take() else {
            warn!(timer = id.0, "stale long-press timer");
            return false;
        };
        if g.timer != Some(id) {
            warn!(timer = id.0, "stale long-press timer");
            self.gesture = Some(g);
            return false;
        }
        g.timer = None;
        self.long_press(&mut g);
        self.gesture = Some(g);
        true
    }

    fn take_gesture(&mut self, ev: &PointerEvent) -> Option<Gesture> {
        match self.gesture.take() {
            Some(g) if g.pointer == ev.pointer => Some(g),
            other => {
                self.gesture = other;
                None
            }
        }
    }

    fn cancel_long_press(&mut self, g: &mut Gesture) {
        if let Some(timer) = g.timer.take() {
            self.scheduler.cancel(timer);
        }
    }

    fn gesture_move(&mut self, g: &mut Gesture, ev: &PointerEvent) {
        if self.config.locked || g.resolution == Resolution::Done {
            return;
        }
        g.moved = true;
        g.last_pos = ev.pos;
        if !ev.inside {
            return;
        }
        if g.resolution == Resolution::Unresolved && !self.begin_new_shape(g) {
            return;
        }
        match g.resolution {
            Resolution::Current | Resolution::CurrentNew => {
                if !self.forward_move(ev) {
                    g.resolution = Resolution::Done;
                }
            }
            Resolution::Selected => self.drag_selection(g, ev),
            Resolution::Unresolved | Resolution::Done => {}
        }
    }

    fn gesture_up(&mut self, g: &mut Gesture, ev: &PointerEvent) {
        if self.config.locked || g.resolution == Resolution::Done {
            return;
        }
        if g.resolution == Resolution::Unresolved && !self.begin_new_shape(g) {
            return;
        }
        match g.resolution {
            Resolution::Current | Resolution::CurrentNew => self.release_current(g, ev),
            Resolution::Selected => self.release_selected(g, ev),
            Resolution::Unresolved | Resolution::Done => {}
        }
    }

    /// An unresolved gesture moved or ended: start drawing, unless the press
    /// only dismissed the previous current shape or the selection.
    ///
    /// Returns whether the event should go on to the new shape.
    fn begin_new_shape(&mut self, g: &mut Gesture) -> bool {
        if g.cleared_current || !self.clear_selected_shapes().is_empty() || self.config.locked {
            g.resolution = Resolution::Done;
            return false;
        }
        let mut shape = match self.new_shape_for_mode() {
            Ok(shape) => shape,
            Err(e) => {
                debug!(error = %e, code = e.error_code(), "gesture creates no shape");
                g.resolution = Resolution::Done;
                return false;
            }
        };
        self.finish_current_shape();
        shape.on_gesture_start(g.origin);
        let id = shape.id();
        let done = !shape.is_finished() && shape.ready_to_finish();
        self.current = Some(Current::Drawing(shape));
        debug!(shape_id = %id, mode = %self.config.draw_mode, "drawing started");
        self.emit(Action::DrawingStarted(id));
        if done {
            self.finish_current_shape();
            g.resolution = Resolution::Done;
            return false;
        }
        g.resolution = Resolution::CurrentNew;
        true
    }

    fn forward_start(&mut self, ev: &PointerEvent) {
        if let Some(shape) = self.current_shape_mut() {
            let id = shape.id();
            if shape.on_gesture_start(ev.pos) {
                self.emit(Action::ShapeUpdated(id));
            }
        }
    }

    /// Returns `false` when there is no current shape to forward to.
    fn forward_move(&mut self, ev: &PointerEvent) -> bool {
        let Some(shape) = self.current_shape_mut() else {
            return false;
        };
        let id = shape.id();
        if shape.on_gesture_move(ev) {
            self.emit(Action::ShapeUpdated(id));
        }
        true
    }

    fn drag_selection(&mut self, g: &mut Gesture, ev: &PointerEvent) {
        let Some(target) = g.target.filter(|id| self.index_of(*id).is_some()) else {
            g.resolution = Resolution::Done;
            return;
        };
        if self.additive_selection() {
            if !self.is_selected(target) {
                self.select_shape(target);
            }
        } else if self.selected != [target] {
            self.clear_selected_shapes();
            self.select_shape(target);
        }
        self.translate_selected_shapes(ev.delta());
    }

    fn release_current(&mut self, g: &mut Gesture, ev: &PointerEvent) {
        let Some(shape) = self.current_shape_mut() else {
            return;
        };
        let id = shape.id();
        let changed = shape.on_gesture_end(ev, !ev.inside);
        let done = !shape.is_finished() && shape.ready_to_finish();
        if changed {
            self.emit(Action::ShapeUpdated(id));
        }
        if done {
            self.finish_current_shape();
            g.resolution = Resolution::Done;
        } else if matches!(self.current, Some(Current::Editing(_))) {
            self.end_shape_interaction();
        }
    }

    fn release_selected(&mut self, g: &mut Gesture, ev: &PointerEvent) {
        if !ev.inside {
            g.resolution = Resolution::Done;
            return;
        }
        let Some(target) = g.target.filter(|id| self.index_of(*id).is_some()) else {
            return;
        };
        if g.moved {
            // A quick drag of an unselected shape leaves it unselected.
            if g.target_was_unselected && self.selected == [target] {
                self.deselect_shape(target);
            }
            return;
        }
        if self.additive_selection() {
            if g.target_was_unselected {
                self.select_shape(target);
            } else {
                self.deselect_shape(target);
            }
        } else if self.selected == [target] {
            self.deselect_shape(target);
        } else {
            self.clear_selected_shapes();
            self.select_shape(target);
        }
    }

    fn long_press(&mut self, g: &mut Gesture) {
        match g.resolution {
            Resolution::Selected if self.ctrl_held() => {
                g.resolution = Resolution::Done;
                return;
            }
            Resolution::Selected | Resolution::Unresolved => g.resolution = Resolution::Unresolved,
            _ => return,
        }
        self.clear_selected_shapes();
        let threshold = self.config.touch_threshold();
        match hit::closest_interaction(&self.shapes, g.last_pos, threshold) {
            Some(hit) if self.start_shape_interaction(hit.shape_id, Some(g.last_pos)) => {
                debug!(shape_id = %hit.shape_id, part = ?hit.part, distance = hit.distance, "long press started editing");
                g.resolution = Resolution::Current;
            }
            _ => g.resolution = Resolution::Done,
        }
    }
}

impl Painter<ManualClock> {
    /// Advance the manual clock and fire whatever expired. Returns how many fired.
    pub fn advance_time(&mut self, dt: Duration) -> usize {
        let expired = self.scheduler.advance(dt);
        expired.into_iter().filter(|id| self.fire_timer(*id)).count()
    }
}

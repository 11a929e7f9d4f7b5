//! The painter controller: shape collection, selection, and shape lifecycle.
//!
//! [`Painter`] exclusively owns every shape. Shapes in `shapes` are finished
//! and valid, in z-order (last is topmost). At most one shape is *current*:
//! either a new shape still being drawn, which lives outside `shapes` until it
//! is finished, or a finished shape from `shapes` being edited. The current
//! shape is never selected.
//!
//! Pointer handling lives in [`crate::gesture`] and keyboard shortcuts in
//! [`crate::keys`]; both drive the operations defined here. Every mutation
//! queues an [`Action`] for the host, drained with [`Painter::take_actions`].

#[cfg(test)]
#[path = "engine_test.rs"]
pub(crate) mod engine_test;

use std::collections::BTreeSet;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::PainterConfig;
use crate::consts::DUPLICATE_OFFSET;
use crate::doc::{Document, ShapeState};
use crate::error::PainterError;
use crate::geom::Point;
use crate::input::{CtrlSide, DrawMode, Gesture, PointerId, Resolution};
use crate::shape::{Shape, ShapeId, ShapeStyle, Translation};
use crate::timer::{ManualClock, Scheduler};

/// Notifications for the host, in the order the changes happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A finished shape joined `shapes`.
    ShapeAdded(ShapeId),
    /// A shape left `shapes`.
    ShapeRemoved(ShapeId),
    /// Geometry, style, or a flag of a shape changed.
    ShapeUpdated(ShapeId),
    /// A shape moved within the z-order.
    ShapeReordered(ShapeId),
    /// A gesture began drawing a new shape.
    DrawingStarted(ShapeId),
    /// A shape being drawn was dropped without being added.
    DrawingDiscarded(ShapeId),
    /// The selected set changed.
    SelectionChanged,
    /// Deliver this pointer's later events to the painter only.
    GrabPointer(PointerId),
    /// Exclusive delivery for this pointer can end.
    ReleasePointer(PointerId),
}

/// The current shape: drawn fresh, or an existing shape under edit.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Current {
    Drawing(Shape),
    Editing(ShapeId),
}

/// Interactive shape-drawing controller.
///
/// `S` supplies the long-press timer; see [`crate::timer`].
pub struct Painter<S = ManualClock> {
    pub(crate) shapes: Vec<Shape>,
    pub(crate) selected: Vec<ShapeId>,
    pub(crate) current: Option<Current>,
    pub(crate) config: PainterConfig,
    pub(crate) ctrl_down: BTreeSet<CtrlSide>,
    pub(crate) gesture: Option<Gesture>,
    pub(crate) scheduler: S,
    actions: Vec<Action>,
}

impl Default for Painter<ManualClock> {
    fn default() -> Self {
        Self::new(PainterConfig::default(), ManualClock::new())
    }
}

impl<S: Scheduler> Painter<S> {
    #[must_use]
    pub fn new(config: PainterConfig, scheduler: S) -> Self {
        Self {
            shapes: Vec::new(),
            selected: Vec::new(),
            current: None,
            config,
            ctrl_down: BTreeSet::new(),
            gesture: None,
            scheduler,
            actions: Vec::new(),
        }
    }

    pub(crate) fn emit(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Drain queued notifications.
    pub fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }

    // --- Configuration ---

    #[must_use]
    pub fn config(&self) -> &PainterConfig {
        &self.config
    }

    #[must_use]
    pub fn draw_mode(&self) -> DrawMode {
        self.config.draw_mode
    }

    /// Change the shape new gestures draw. Finishes the current shape and clears the selection.
    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        self.config.draw_mode = mode;
        debug!(%mode, "draw mode changed");
        self.finish_current_shape();
        self.clear_selected_shapes();
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.config.locked
    }

    /// Lock or unlock the whole painter.
    ///
    /// Any change finishes the current shape, clears the selection, and
    /// cancels a pending long press. Locking also ends a gesture in flight,
    /// so it can no longer select or drag.
    pub fn set_locked(&mut self, locked: bool) {
        if self.config.locked == locked {
            return;
        }
        self.config.locked = locked;
        debug!(locked, "painter lock changed");
        if let Some(g) = self.gesture.as_mut() {
            if let Some(timer) = g.timer.take() {
                self.scheduler.cancel(timer);
            }
            if locked {
                g.resolution = Resolution::Done;
            }
        }
        self.finish_current_shape();
        self.clear_selected_shapes();
    }

    #[must_use]
    pub fn multiselect(&self) -> bool {
        self.config.multiselect
    }

    pub fn set_multiselect(&mut self, multiselect: bool) {
        self.config.multiselect = multiselect;
    }

    pub fn set_min_touch_dist(&mut self, dist: f64) {
        self.config.min_touch_dist = dist;
    }

    pub fn set_long_touch_delay(&mut self, delay: Duration) {
        self.config.long_touch_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
    }

    /// Change surface units per device-independent unit. Touch slop and the
    /// radius floor of every held shape follow.
    pub fn set_density(&mut self, density: f64) {
        self.config.density = density;
        for shape in &mut self.shapes {
            shape.set_density(density);
        }
        if let Some(Current::Drawing(shape)) = &mut self.current {
            shape.set_density(density);
        }
    }

    /// Whether any Ctrl key is held.
    #[must_use]
    pub fn ctrl_held(&self) -> bool {
        !self.ctrl_down.is_empty()
    }

    /// Selection taps add to the selection rather than replace it.
    pub(crate) fn additive_selection(&self) -> bool {
        self.config.multiselect || self.ctrl_held()
    }

    // --- Queries ---

    /// Finished shapes, bottom first.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Selected shape ids, in the order they were selected.
    #[must_use]
    pub fn selected_ids(&self) -> &[ShapeId] {
        &self.selected
    }

    pub fn selected_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.selected.iter().filter_map(|id| self.shapes.iter().find(|s| s.id == *id))
    }

    #[must_use]
    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selected.contains(&id)
    }

    /// Look up a shape in `shapes` or the shape being drawn.
    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id).or_else(|| match &self.current {
            Some(Current::Drawing(s)) if s.id == id => Some(s),
            _ => None,
        })
    }

    pub(crate) fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        if let Some(i) = self.index_of(id) {
            return self.shapes.get_mut(i);
        }
        match &mut self.current {
            Some(Current::Drawing(s)) if s.id == id => Some(s),
            _ => None,
        }
    }

    pub(crate) fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == id)
    }

    /// The shape being drawn or edited, if any.
    #[must_use]
    pub fn current_shape(&self) -> Option<&Shape> {
        match &self.current {
            Some(Current::Drawing(s)) => Some(s),
            Some(Current::Editing(id)) => self.shapes.iter().find(|s| s.id == *id),
            None => None,
        }
    }

    pub(crate) fn current_shape_mut(&mut self) -> Option<&mut Shape> {
        match &mut self.current {
            Some(Current::Drawing(s)) => Some(s),
            Some(Current::Editing(id)) => {
                let id = *id;
                self.shapes.iter_mut().find(|s| s.id == id)
            }
            None => None,
        }
    }

    #[must_use]
    pub fn current_id(&self) -> Option<ShapeId> {
        match &self.current {
            Some(Current::Drawing(s)) => Some(s.id),
            Some(Current::Editing(id)) => Some(*id),
            None => None,
        }
    }

    /// The gesture in flight, if any.
    #[must_use]
    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    // --- Current shape lifecycle ---

    /// Finish whatever is current.
    ///
    /// A shape under edit stops interacting. A shape being drawn is finished
    /// and added to `shapes` when valid, otherwise discarded. Returns whether
    /// there was a current shape.
    pub fn finish_current_shape(&mut self) -> bool {
        match self.current.take() {
            None => false,
            Some(Current::Editing(id)) => {
                if let Some(shape) = self.shapes.iter_mut().find(|s| s.id == id) {
                    if shape.stop_interaction() {
                        self.emit(Action::ShapeUpdated(id));
                    }
                }
                debug!(shape_id = %id, "ended shape interaction");
                true
            }
            Some(Current::Drawing(mut shape)) => {
                shape.finish();
                let id = shape.id;
                if shape.is_valid() {
                    info!(shape_id = %id, kind = %shape.kind(), "shape drawn");
                    self.shapes.push(shape);
                    self.emit(Action::ShapeAdded(id));
                } else {
                    warn!(shape_id = %id, kind = %shape.kind(), "discarded invalid shape");
                    self.emit(Action::DrawingDiscarded(id));
                }
                true
            }
        }
    }

    /// Start editing a finished shape: it becomes current and `interacting`.
    ///
    /// Finishes any other current shape and deselects the target first.
    /// Returns `false` for unknown, locked, or already-current shapes.
    pub fn start_shape_interaction(&mut self, id: ShapeId, pos: Option<Point>) -> bool {
        if self.current_id() == Some(id) {
            return false;
        }
        if self.shapes.iter().find(|s| s.id == id).is_none_or(Shape::is_locked) {
            return false;
        }
        self.finish_current_shape();
        self.deselect_shape(id);
        let Some(shape) = self.shapes.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        shape.start_interaction();
        self.current = Some(Current::Editing(id));
        debug!(shape_id = %id, ?pos, "started shape interaction");
        self.emit(Action::ShapeUpdated(id));
        true
    }

    /// Stop editing the current shape. Returns `false` if nothing was being edited.
    pub fn end_shape_interaction(&mut self) -> bool {
        if matches!(self.current, Some(Current::Editing(_))) {
            return self.finish_current_shape();
        }
        false
    }

    // --- Selection ---

    /// Select a shape in `shapes`. Finishes the current shape first.
    ///
    /// Returns `false` if the painter or the shape is locked, or the shape is
    /// unknown or already selected.
    pub fn select_shape(&mut self, id: ShapeId) -> bool {
        if self.config.locked {
            return false;
        }
        match self.shapes.iter().find(|s| s.id == id) {
            Some(s) if !s.is_selected() && !s.is_locked() => {}
            _ => return false,
        }
        self.finish_current_shape();
        let Some(shape) = self.shapes.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        if !shape.select() {
            return false;
        }
        self.selected.push(id);
        self.emit(Action::SelectionChanged);
        true
    }

    /// Returns `false` if the shape wasn't selected.
    pub fn deselect_shape(&mut self, id: ShapeId) -> bool {
        let Some(shape) = self.shapes.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        if !shape.deselect() {
            return false;
        }
        self.selected.retain(|s| *s != id);
        self.emit(Action::SelectionChanged);
        true
    }

    /// Deselect everything; returns the ids that were selected.
    pub fn clear_selected_shapes(&mut self) -> Vec<ShapeId> {
        let ids = self.selected.clone();
        for id in &ids {
            self.deselect_shape(*id);
        }
        ids
    }

    /// Select every unlocked shape.
    pub fn select_all_shapes(&mut self) -> usize {
        let ids: Vec<ShapeId> = self.shapes.iter().filter(|s| !s.is_locked()).map(Shape::id).collect();
        ids.into_iter().filter(|id| self.select_shape(*id)).count()
    }

    // --- Collection ---

    /// Add a finished, valid shape on top of the others.
    ///
    /// # Errors
    ///
    /// `Unfinished` or `InvalidShape` when the shape isn't ready to keep;
    /// `DuplicateId` if a shape with the same id is already held.
    pub fn add_shape(&mut self, shape: Shape) -> Result<ShapeId, PainterError> {
        if !shape.is_finished() {
            return Err(PainterError::Unfinished { kind: shape.kind() });
        }
        if !shape.is_valid() {
            return Err(PainterError::InvalidShape { kind: shape.kind() });
        }
        if self.shape(shape.id).is_some() {
            return Err(PainterError::DuplicateId(shape.id));
        }
        let mut shape = shape;
        shape.selected = false;
        shape.interacting = false;
        shape.set_density(self.config.density);
        let id = shape.id;
        debug!(shape_id = %id, kind = %shape.kind(), "shape added");
        self.shapes.push(shape);
        self.emit(Action::ShapeAdded(id));
        Ok(id)
    }

    /// Remove a shape, deselecting or finishing it first as needed.
    ///
    /// Removing the shape being drawn discards it. Returns whether anything was removed.
    pub fn remove_shape(&mut self, id: ShapeId) -> bool {
        self.deselect_shape(id);
        if self.current_id() == Some(id) {
            if matches!(self.current, Some(Current::Drawing(_))) {
                self.current = None;
                debug!(shape_id = %id, "removed shape being drawn");
                self.emit(Action::DrawingDiscarded(id));
                return true;
            }
            self.finish_current_shape();
        }
        let Some(i) = self.index_of(id) else {
            return false;
        };
        self.shapes.remove(i);
        info!(shape_id = %id, "shape removed");
        self.emit(Action::ShapeRemoved(id));
        true
    }

    /// Move a shape in the z-order: directly below `before`, or to the top when `None`.
    pub fn reorder_shape(&mut self, id: ShapeId, before: Option<ShapeId>) -> bool {
        if before == Some(id) {
            return false;
        }
        let Some(from) = self.index_of(id) else {
            return false;
        };
        if before.is_some_and(|b| self.index_of(b).is_none()) {
            return false;
        }
        let shape = self.shapes.remove(from);
        let to = before.and_then(|b| self.index_of(b)).unwrap_or(self.shapes.len());
        self.shapes.insert(to, shape);
        self.emit(Action::ShapeReordered(id));
        true
    }

    /// Add an unselected copy of a shape, offset so it doesn't cover the original.
    pub fn duplicate_shape(&mut self, id: ShapeId) -> Option<ShapeId> {
        let mut copy = self.shapes.iter().find(|s| s.id == id)?.duplicate();
        copy.translate(Translation::By(Point::new(DUPLICATE_OFFSET, DUPLICATE_OFFSET)));
        let new_id = copy.id;
        self.shapes.push(copy);
        debug!(source = %id, shape_id = %new_id, "shape duplicated");
        self.emit(Action::ShapeAdded(new_id));
        Some(new_id)
    }

    /// Duplicate every selected shape. The selection is cleared; returns the copies' ids.
    pub fn duplicate_selected_shapes(&mut self) -> Vec<ShapeId> {
        let sources = self.clear_selected_shapes();
        sources.into_iter().filter_map(|id| self.duplicate_shape(id)).collect()
    }

    /// Remove the selected shapes and the current shape; returns their ids.
    pub fn delete_selected_shapes(&mut self) -> Vec<ShapeId> {
        let mut ids = self.clear_selected_shapes();
        if let Some(current) = self.current_id() {
            ids.push(current);
        }
        ids.into_iter().filter(|id| self.remove_shape(*id)).collect()
    }

    /// Remove every shape, optionally sparing locked ones; returns the removed ids.
    pub fn delete_all_shapes(&mut self, keep_locked: bool) -> Vec<ShapeId> {
        self.finish_current_shape();
        let ids: Vec<ShapeId> =
            self.shapes.iter().filter(|s| !(keep_locked && s.is_locked())).map(Shape::id).collect();
        ids.into_iter().filter(|id| self.remove_shape(*id)).collect()
    }

    /// Exclude a shape from all interaction. Finishes and deselects it first.
    pub fn lock_shape(&mut self, id: ShapeId) -> bool {
        if self.shapes.iter().find(|s| s.id == id).is_none_or(Shape::is_locked) {
            return false;
        }
        if self.current_id() == Some(id) {
            self.finish_current_shape();
        }
        self.deselect_shape(id);
        let Some(shape) = self.shapes.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        let locked = shape.lock();
        if locked {
            self.emit(Action::ShapeUpdated(id));
        }
        locked
    }

    pub fn unlock_shape(&mut self, id: ShapeId) -> bool {
        let Some(shape) = self.shapes.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        let unlocked = shape.unlock();
        if unlocked {
            self.emit(Action::ShapeUpdated(id));
        }
        unlocked
    }

    // --- Geometry and presentation ---

    pub fn translate_shape(&mut self, id: ShapeId, how: Translation) -> bool {
        let moved = self.shape_mut(id).is_some_and(|s| s.translate(how));
        if moved {
            self.emit(Action::ShapeUpdated(id));
        }
        moved
    }

    /// Move every selected shape by `delta`.
    pub fn translate_selected_shapes(&mut self, delta: Point) -> bool {
        let ids = self.selected.clone();
        let mut any = false;
        for id in ids {
            any |= self.translate_shape(id, Translation::By(delta));
        }
        any
    }

    pub fn rescale_shape(&mut self, id: ShapeId, factor: f64) -> bool {
        let scaled = self.shape_mut(id).is_some_and(|s| s.rescale(factor));
        if scaled {
            self.emit(Action::ShapeUpdated(id));
        }
        scaled
    }

    pub fn show_shape(&mut self, id: ShapeId) -> bool {
        self.set_shape_visible(id, true)
    }

    /// Hide a shape without removing it.
    pub fn hide_shape(&mut self, id: ShapeId) -> bool {
        self.set_shape_visible(id, false)
    }

    fn set_shape_visible(&mut self, id: ShapeId, visible: bool) -> bool {
        let changed = self.shape_mut(id).is_some_and(|s| s.set_visible(visible));
        if changed {
            self.emit(Action::ShapeUpdated(id));
        }
        changed
    }

    pub fn set_shape_style(&mut self, id: ShapeId, style: ShapeStyle) -> bool {
        let Some(shape) = self.shape_mut(id) else {
            return false;
        };
        shape.set_style(style);
        self.emit(Action::ShapeUpdated(id));
        true
    }

    // --- Construction ---

    /// A blank shape of the kind the current draw mode draws.
    ///
    /// # Errors
    ///
    /// `NoDrawMode` when the draw mode is `none`; check the mode first.
    pub fn new_shape_for_mode(&self) -> Result<Shape, PainterError> {
        let kind = self.config.draw_mode.shape_kind().ok_or(PainterError::NoDrawMode)?;
        Ok(Shape::with_density(kind, self.config.density))
    }

    /// Finish a programmatically built shape, refusing it if its geometry is invalid.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if the shape doesn't meet its variant's minimum.
    pub fn create_shape(&self, mut shape: Shape) -> Result<Shape, PainterError> {
        shape.finish();
        if !shape.is_valid() {
            return Err(PainterError::InvalidShape { kind: shape.kind() });
        }
        Ok(shape)
    }

    /// [`Painter::create_shape`], then add it.
    ///
    /// # Errors
    ///
    /// As for `create_shape` and `add_shape`.
    pub fn create_add_shape(&mut self, shape: Shape) -> Result<ShapeId, PainterError> {
        let shape = self.create_shape(shape)?;
        self.add_shape(shape)
    }

    /// Rebuild a shape from its saved state without adding it.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if the saved geometry is below its variant's minimum.
    pub fn shape_from_state(&self, state: &ShapeState) -> Result<Shape, PainterError> {
        self.create_shape(Shape::from_state(state))
    }

    /// Rebuild a shape from its saved state and add it.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if the saved geometry is below its variant's minimum.
    pub fn create_shape_from_state(&mut self, state: &ShapeState) -> Result<ShapeId, PainterError> {
        let shape = self.shape_from_state(state)?;
        self.add_shape(shape)
    }

    /// Overwrite a kept shape's geometry, style, and lock flag from `state`.
    ///
    /// # Errors
    ///
    /// `UnknownShape` if `id` isn't in `shapes`, `KindMismatch` for a state of
    /// another variant, `InvalidShape` if the new geometry is degenerate (the
    /// shape is left unchanged).
    pub fn set_shape_state(&mut self, id: ShapeId, state: &ShapeState) -> Result<(), PainterError> {
        if self.current_id() == Some(id) {
            self.finish_current_shape();
        }
        let i = self.index_of(id).ok_or(PainterError::UnknownShape(id))?;
        let mut updated = self.shapes[i].clone();
        updated.apply_state(state)?;
        updated.set_density(self.config.density);
        if !updated.is_valid() {
            return Err(PainterError::InvalidShape { kind: updated.kind() });
        }
        if updated.is_locked() {
            self.deselect_shape(id);
            updated.selected = false;
        }
        self.shapes[i] = updated;
        self.emit(Action::ShapeUpdated(id));
        Ok(())
    }

    // --- Persistence ---

    /// States of every shape in `shapes`, bottom first.
    #[must_use]
    pub fn save_state(&self) -> Document {
        Document { shapes: self.shapes.iter().map(Shape::state).collect() }
    }

    /// Add every shape in `doc`, optionally replacing the current contents.
    ///
    /// Nothing changes unless every state is valid.
    ///
    /// # Errors
    ///
    /// `InvalidShape` for the first state whose geometry is below its minimum.
    pub fn restore_state(&mut self, doc: &Document, replace: bool) -> Result<Vec<ShapeId>, PainterError> {
        let shapes = doc
            .shapes
            .iter()
            .map(|state| self.shape_from_state(state))
            .collect::<Result<Vec<_>, _>>()?;
        if replace {
            self.delete_all_shapes(false);
        }
        let mut ids = Vec::with_capacity(shapes.len());
        for shape in shapes {
            ids.push(self.add_shape(shape)?);
        }
        info!(count = ids.len(), replace, "restored shapes");
        Ok(ids)
    }

    /// Serialize all shapes to JSON.
    ///
    /// # Errors
    ///
    /// `Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, PainterError> {
        self.save_state().to_json()
    }

    /// Parse and restore a JSON document from [`Painter::to_json`].
    ///
    /// # Errors
    ///
    /// `Json` for malformed text, `InvalidShape` for degenerate shapes.
    pub fn load_json(&mut self, text: &str, replace: bool) -> Result<Vec<ShapeId>, PainterError> {
        let doc = Document::from_json(text)?;
        self.restore_state(&doc, replace)
    }
}

impl Painter<ManualClock> {
    /// A painter with `config` and a manual clock.
    #[must_use]
    pub fn with_config(config: PainterConfig) -> Self {
        Self::new(config, ManualClock::new())
    }
}

//! Keyboard shortcuts.
//!
//! | Key | When | Effect |
//! |-----|------|--------|
//! | Ctrl (either side) | down/up | tracks whether Ctrl is held; a side-less key matches any side |
//! | arrows | down | nudge the selection one unit |
//! | Escape | up | finish the current shape, else clear the selection |
//! | Delete | up | delete the selection and the current shape |
//! | Ctrl+A | up | select every unlocked shape |
//! | Ctrl+D | up | duplicate the selection |

#[cfg(test)]
#[path = "keys_test.rs"]
mod keys_test;

use tracing::debug;

use crate::engine::Painter;
use crate::input::{CtrlSide, Key, Modifiers};
use crate::timer::Scheduler;

impl<S: Scheduler> Painter<S> {
    /// Key pressed. Returns whether the painter consumed it.
    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> bool {
        if let Key::Ctrl(side) = key {
            self.ctrl_down.insert(*side);
            return false;
        }
        if self.config.locked || self.selected.is_empty() {
            return false;
        }
        match key.arrow_delta() {
            Some(delta) => self.translate_selected_shapes(delta),
            None => false,
        }
    }

    /// Key released. Returns whether the painter consumed it.
    pub fn on_key_up(&mut self, key: &Key, modifiers: Modifiers) -> bool {
        if let Key::Ctrl(side) = key {
            // A side-less release can't tell which key went up; drop them all.
            if *side == CtrlSide::Either {
                self.ctrl_down.clear();
            } else {
                self.ctrl_down.remove(side);
                self.ctrl_down.remove(&CtrlSide::Either);
            }
            return false;
        }
        if self.config.locked {
            return false;
        }
        let ctrl = modifiers.ctrl || self.ctrl_held();
        let handled = match key {
            Key::Escape => self.finish_current_shape() || !self.clear_selected_shapes().is_empty(),
            Key::Delete => !self.delete_selected_shapes().is_empty(),
            Key::Char('a') if ctrl => {
                self.select_all_shapes();
                true
            }
            Key::Char('d') if ctrl => !self.duplicate_selected_shapes().is_empty(),
            _ => false,
        };
        if handled {
            debug!(?key, "key shortcut");
        }
        handled
    }

    /// The surface lost keyboard focus: finish the current shape and forget held keys.
    pub fn on_focus_lost(&mut self) {
        self.finish_current_shape();
        self.ctrl_down.clear();
    }
}

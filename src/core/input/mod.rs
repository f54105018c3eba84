//=========================================================================
// Input Subsystem
//
// Fan-in of every input source into one per-tick snapshot.
//
// Responsibilities:
// - Hold the per-tick InputSnapshot (held keys, pointer, one-shots)
// - Define the engine-native event vocabulary (`event`)
// - Route bound keys to agents through one dispatch table (`bindings`)
// - Expose the controller polling seam (`gamepad`)
//
// Notes:
// One-shot fields (click, right-click, wheel) are valid for exactly one
// tick; the engine clears them at the end of every unpaused frame so
// each discrete event is observed once.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;

mod bindings;
mod gamepad;

//=== Public API ==========================================================

pub use bindings::{Control, ControlBindings, ControlState};
pub use event::{is_reserved_key, InputEvent, KeyCode, RESERVED_NAVIGATION_KEYS};
pub use gamepad::{GamepadProvider, GamepadState, AXIS_THRESHOLD};

pub(crate) use bindings::BindingTable;

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== InputSnapshot =======================================================

/// The per-tick input snapshot every entity update reads.
///
/// Pointer position persists between ticks (it is a sampled state, not
/// an event); click, right-click, and wheel are one-shot fields cleared
/// at the end of the tick that observed them.
#[derive(Debug, Default)]
pub struct InputSnapshot {
    pointer: Option<(f32, f32)>,
    click: Option<(f32, f32)>,
    right_click: Option<(f32, f32)>,
    wheel: Option<f32>,
    held: HashSet<KeyCode>,
}

impl InputSnapshot {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    //--- Queries ----------------------------------------------------------

    /// Last known pointer position.
    pub fn pointer(&self) -> Option<(f32, f32)> {
        self.pointer
    }

    /// Click position, if a click arrived this tick.
    pub fn click(&self) -> Option<(f32, f32)> {
        self.click
    }

    /// Right-click position, if one arrived this tick.
    pub fn right_click(&self) -> Option<(f32, f32)> {
        self.right_click
    }

    /// Wheel delta, if wheel motion arrived this tick.
    pub fn wheel(&self) -> Option<f32> {
        self.wheel
    }

    /// True while the key is held down.
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    //--- Mutation (engine-internal) ----------------------------------------

    pub(crate) fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    pub(crate) fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    pub(crate) fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Some((x, y));
    }

    pub(crate) fn set_click(&mut self, x: f32, y: f32) {
        self.click = Some((x, y));
    }

    pub(crate) fn set_right_click(&mut self, x: f32, y: f32) {
        self.right_click = Some((x, y));
    }

    pub(crate) fn set_wheel(&mut self, delta: f32) {
        self.wheel = Some(delta);
    }

    /// Clears the one-shot fields at the end of an unpaused tick.
    ///
    /// Held keys and pointer position persist; only the discrete events
    /// are consumed.
    pub(crate) fn clear_one_shot(&mut self) {
        self.click = None;
        self.right_click = None;
        self.wheel = None;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fields_clear_but_state_persists() {
        let mut snapshot = InputSnapshot::new();
        snapshot.press(KeyCode::KeyA);
        snapshot.set_pointer(10.0, 20.0);
        snapshot.set_click(1.0, 2.0);
        snapshot.set_right_click(3.0, 4.0);
        snapshot.set_wheel(-1.5);

        snapshot.clear_one_shot();

        assert!(snapshot.is_held(KeyCode::KeyA));
        assert_eq!(snapshot.pointer(), Some((10.0, 20.0)));
        assert_eq!(snapshot.click(), None);
        assert_eq!(snapshot.right_click(), None);
        assert_eq!(snapshot.wheel(), None);
    }

    #[test]
    fn press_and_release_track_held_keys() {
        let mut snapshot = InputSnapshot::new();
        snapshot.press(KeyCode::Space);
        assert!(snapshot.is_held(KeyCode::Space));

        snapshot.release(KeyCode::Space);
        assert!(!snapshot.is_held(KeyCode::Space));
    }
}

//=========================================================================
// Control Bindings
//
// Per-agent control vocabulary and the centralized dispatch table.
//
// The original design wired one pair of key listeners per agent, each
// closure capturing its agent's identity. Here a single table maps every
// bound key to (agent, control); the engine consults it once per key
// event and writes straight into the owning agent's ControlState.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;

//=== Internal Modules ====================================================

use super::event::KeyCode;
use crate::core::session::MAX_PLAYERS;

//=== Control =============================================================

/// The five controls every agent understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Jump,
    Left,
    Right,
    Attack,
    Run,
}

//=== ControlState ========================================================

/// The unified per-agent key-state.
///
/// Keyboard dispatch and gamepad polling both write here, so agent
/// behavior code reads one contract regardless of input source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub jump: bool,
    pub left: bool,
    pub right: bool,
    pub attack: bool,
    pub run: bool,
}

impl ControlState {
    /// Sets one control flag.
    pub fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::Jump => self.jump = pressed,
            Control::Left => self.left = pressed,
            Control::Right => self.right = pressed,
            Control::Attack => self.attack = pressed,
            Control::Run => self.run = pressed,
        }
    }

    /// Reads one control flag.
    pub fn get(&self, control: Control) -> bool {
        match control {
            Control::Jump => self.jump,
            Control::Left => self.left,
            Control::Right => self.right,
            Control::Attack => self.attack,
            Control::Run => self.run,
        }
    }

    /// Releases every control. Used when an agent switches control mode.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

//=== ControlBindings =====================================================

/// An agent's keyboard layout: one key per control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlBindings {
    pub jump: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub attack: KeyCode,
    pub run: KeyCode,
}

impl ControlBindings {
    /// Default keyboard layouts.
    ///
    /// One keyboard comfortably fits two players; slots 2 and 3 are
    /// controller-only and get no preset.
    pub fn keyboard_preset(player_index: usize) -> Option<Self> {
        match player_index {
            0 => Some(Self {
                jump: KeyCode::KeyW,
                left: KeyCode::KeyA,
                right: KeyCode::KeyD,
                attack: KeyCode::KeyS,
                run: KeyCode::ShiftLeft,
            }),
            1 => Some(Self {
                jump: KeyCode::ArrowUp,
                left: KeyCode::ArrowLeft,
                right: KeyCode::ArrowRight,
                attack: KeyCode::ArrowDown,
                run: KeyCode::ShiftRight,
            }),
            _ => None,
        }
    }

    /// Iterates the five (key, control) pairs of this layout.
    pub fn entries(&self) -> [(KeyCode, Control); 5] {
        [
            (self.jump, Control::Jump),
            (self.left, Control::Left),
            (self.right, Control::Right),
            (self.attack, Control::Attack),
            (self.run, Control::Run),
        ]
    }
}

//=== BindingTable ========================================================

/// Central key → (agent, control) dispatch table.
///
/// Agents are identified by the registry id assigned when they were
/// added; unregistering an id drops all of its keys.
#[derive(Debug, Default)]
pub(crate) struct BindingTable {
    map: HashMap<KeyCode, (u64, Control)>,
}

impl BindingTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers an agent's layout. Later registrations win on conflict.
    pub(crate) fn register(&mut self, agent_id: u64, bindings: &ControlBindings) {
        for (key, control) in bindings.entries() {
            self.map.insert(key, (agent_id, control));
        }
    }

    /// Drops every key owned by the agent.
    pub(crate) fn unregister(&mut self, agent_id: u64) {
        self.map.retain(|_, &mut (id, _)| id != agent_id);
    }

    /// Resolves a key to the agent and control it drives.
    pub(crate) fn lookup(&self, key: KeyCode) -> Option<(u64, Control)> {
        self.map.get(&key).copied()
    }

    /// Drops every binding.
    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_presets_cover_only_the_first_two_slots() {
        assert!(ControlBindings::keyboard_preset(0).is_some());
        assert!(ControlBindings::keyboard_preset(1).is_some());
        for slot in 2..MAX_PLAYERS {
            assert!(ControlBindings::keyboard_preset(slot).is_none());
        }
    }

    #[test]
    fn presets_do_not_collide() {
        let p0 = ControlBindings::keyboard_preset(0).unwrap();
        let p1 = ControlBindings::keyboard_preset(1).unwrap();

        for (key0, _) in p0.entries() {
            for (key1, _) in p1.entries() {
                assert_ne!(key0, key1, "player layouts must not share keys");
            }
        }
    }

    #[test]
    fn control_state_set_get_clear() {
        let mut state = ControlState::default();
        state.set(Control::Left, true);
        state.set(Control::Run, true);

        assert!(state.get(Control::Left));
        assert!(state.get(Control::Run));
        assert!(!state.get(Control::Jump));

        state.clear();
        assert_eq!(state, ControlState::default());
    }

    #[test]
    fn table_routes_keys_to_owning_agent() {
        let mut table = BindingTable::new();
        let p0 = ControlBindings::keyboard_preset(0).unwrap();
        let p1 = ControlBindings::keyboard_preset(1).unwrap();
        table.register(10, &p0);
        table.register(11, &p1);

        assert_eq!(table.lookup(KeyCode::KeyA), Some((10, Control::Left)));
        assert_eq!(table.lookup(KeyCode::ArrowRight), Some((11, Control::Right)));
        assert_eq!(table.lookup(KeyCode::KeyZ), None);
    }

    #[test]
    fn unregister_drops_only_that_agent() {
        let mut table = BindingTable::new();
        table.register(10, &ControlBindings::keyboard_preset(0).unwrap());
        table.register(11, &ControlBindings::keyboard_preset(1).unwrap());

        table.unregister(10);

        assert_eq!(table.lookup(KeyCode::KeyA), None);
        assert_eq!(table.lookup(KeyCode::ArrowUp), Some((11, Control::Jump)));
    }
}

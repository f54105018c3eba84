//=========================================================================
// Input Event Types
//
// Engine-native representation of low-level input.
//
// This module abstracts the platform layer (Winit here, a canvas host
// elsewhere) into a unified format consumed by the engine's per-tick
// snapshot and binding dispatch.
//
// Responsibilities:
// - Represent keyboard, pointer, and wheel input in a stable, portable way
// - Provide equality and hashing for the held-key set
// - Name the reserved navigation keys a browser-like host must suppress
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    Engine::handle_event (snapshot + binding dispatch)
//         ↓
//    ControlState (per-agent unified key-state)
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced, so
/// bindings survive layout changes (QWERTY vs AZERTY). Unmapped platform
/// keys collapse into `Unidentified` and are filtered before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    /// Directional navigation keys
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    /// Spacebar
    Space,

    /// Return/Enter key
    Enter,

    /// Escape key
    Escape,

    /// Left shift
    ShiftLeft,

    /// Right shift
    ShiftRight,

    /// Any key the platform layer could not map.
    Unidentified,
}

//=== Reserved Keys =======================================================

/// The navigation keys a browser-like host must suppress from default
/// handling (page scrolling, focus traversal) before forwarding them.
///
/// The core still receives and dispatches these keys normally; only the
/// host's *default* behavior is suppressed.
pub const RESERVED_NAVIGATION_KEYS: [KeyCode; 5] = [
    KeyCode::Space,
    KeyCode::ArrowLeft,
    KeyCode::ArrowUp,
    KeyCode::ArrowRight,
    KeyCode::ArrowDown,
];

/// True for the five reserved navigation keys.
pub fn is_reserved_key(key: KeyCode) -> bool {
    RESERVED_NAVIGATION_KEYS.contains(&key)
}

//=== InputEvent ==========================================================

/// A single device event delivered to the engine.
///
/// Pointer variants carry surface-space coordinates; the platform layer
/// is responsible for translating from window space. Wheel deltas are
/// captured verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key went down.
    KeyDown(KeyCode),

    /// A key came up.
    KeyUp(KeyCode),

    /// The pointer moved to a new position.
    PointerMoved { x: f32, y: f32 },

    /// Primary-button click at a position.
    Click { x: f32, y: f32 },

    /// Secondary-button click at a position.
    RightClick { x: f32, y: f32 },

    /// Wheel motion; positive is away from the user.
    Wheel { delta: f32 },
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_keys_are_exactly_the_navigation_five() {
        assert!(is_reserved_key(KeyCode::Space));
        assert!(is_reserved_key(KeyCode::ArrowLeft));
        assert!(is_reserved_key(KeyCode::ArrowUp));
        assert!(is_reserved_key(KeyCode::ArrowRight));
        assert!(is_reserved_key(KeyCode::ArrowDown));

        assert!(!is_reserved_key(KeyCode::KeyW));
        assert!(!is_reserved_key(KeyCode::Escape));
        assert!(!is_reserved_key(KeyCode::Enter));
    }

    #[test]
    fn key_codes_hash_into_a_set() {
        use std::collections::HashSet;

        let mut held = HashSet::new();
        assert!(held.insert(KeyCode::KeyA));
        assert!(!held.insert(KeyCode::KeyA));
        assert!(held.remove(&KeyCode::KeyA));
    }
}

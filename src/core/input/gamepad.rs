//=========================================================================
// Gamepad Polling Seam
//
// The engine polls up to four controller slots once per tick and folds
// the result into each agent's ControlState, so keyboard and controller
// input meet in one contract. How controllers are actually enumerated
// (HID, browser Gamepad API, test stub) is the provider's business.
//
//=========================================================================

//=== Constants ===========================================================

/// Axis deflection beyond this maps to a left/right control.
pub const AXIS_THRESHOLD: f32 = 0.5;

//=== GamepadState ========================================================

/// One controller's state as sampled this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadState {
    /// Primary horizontal axis, -1.0 (left) to 1.0 (right).
    pub axis_x: f32,

    /// The jump button (button 0 on a standard pad).
    pub jump: bool,

    /// The attack button.
    pub attack: bool,

    /// The run button.
    pub run: bool,
}

impl GamepadState {
    /// True when the stick is deflected past the threshold leftward.
    pub fn steers_left(&self) -> bool {
        self.axis_x < -AXIS_THRESHOLD
    }

    /// True when the stick is deflected past the threshold rightward.
    pub fn steers_right(&self) -> bool {
        self.axis_x > AXIS_THRESHOLD
    }
}

//=== GamepadProvider =====================================================

/// Host seam for controller enumeration.
///
/// `sample(slot)` returns `None` when no controller is live at that slot
/// this tick; the engine treats that as a disconnect and falls back to
/// autonomous control for controller-only agents.
pub trait GamepadProvider {
    /// Polls one controller slot (0..=3).
    fn sample(&mut self, slot: usize) -> Option<GamepadState>;
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_threshold_is_exclusive() {
        let centered = GamepadState { axis_x: 0.5, ..Default::default() };
        assert!(!centered.steers_right());
        assert!(!centered.steers_left());

        let right = GamepadState { axis_x: 0.51, ..Default::default() };
        assert!(right.steers_right());

        let left = GamepadState { axis_x: -0.8, ..Default::default() };
        assert!(left.steers_left());
        assert!(!left.steers_right());
    }
}

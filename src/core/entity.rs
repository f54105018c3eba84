//=========================================================================
// Entity Contract
//
// The polymorphic capability contract implemented by everything that
// participates in the update/draw/reset cycle.
//
// Design:
// Concrete behavior (movement patterns, collision response, AI) lives in
// host code. The core only needs three capabilities (update, draw,
// reset), a removal flag, and a kind tag for the registry's insertion
// policy. Runtime dispatch on concrete type happens exclusively through
// the `as_*` downcast hooks; everywhere else the trait surface is enough.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::{ControlBindings, ControlState, InputSnapshot};
use crate::core::render::RenderSurface;

//=== EntityKind ==========================================================

/// Tag consulted by the registry when an entity is added.
///
/// The kind decides which registry lists an entity lands in; it carries
/// no behavior of its own. `Other` is the bucket for kinds the registry
/// does not recognize, which are accepted but tracked nowhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Backdrop painted first and kept visible during scene transitions.
    Background,

    /// Static or moving obstacle; registered for collision consideration.
    Platform,

    /// A controllable agent (see [`PlayerAgent`]).
    Player,

    /// The top-level game-state entity (the scene machine).
    Director,

    /// Pickups and other decorative simulation objects.
    Collectible,

    /// Anything the registry has no policy for.
    Other,
}

//=== PlayerStatus ========================================================

/// Read-only per-agent snapshot published to the update pass.
///
/// Rebuilt by the engine every tick from the live player agents, so
/// scenes (including the scene machine's score capture) can observe
/// agents without reaching into the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStatus {
    /// Stable player slot, 0..=3.
    pub index: usize,

    /// The agent's current score.
    pub score: i64,

    /// Whether the agent is running under autonomous control.
    pub autonomous: bool,
}

//=== UpdateContext =======================================================

/// Per-tick data handed to every entity's update capability.
///
/// Borrowed from the engine for the duration of one update pass; nothing
/// in it outlives the tick.
pub struct UpdateContext<'a> {
    /// Clamped elapsed time for this tick, in seconds.
    pub delta: f64,

    /// The per-tick input snapshot (held keys, pointer, one-shot events).
    pub input: &'a InputSnapshot,

    /// Status of every registered player agent, in registration order.
    pub players: &'a [PlayerStatus],

    /// Debug overlay toggle, flipped by the global debug key.
    pub debug: bool,
}

//=== Entity Trait ========================================================

/// Capability contract for simulated objects.
///
/// # Lifecycle
///
/// An entity is owned by exactly one registry list. Setting the removal
/// flag during `update` causes the registry to drop it in the sweep at
/// the end of that same tick; flagged entities are never updated again.
///
/// # Minimal Implementation
///
/// `update` and `draw` are required; everything else has a sensible
/// default (kind `Other`, never removed, no downcasts).
pub trait Entity {
    /// Kind tag consulted by the registry's insertion policy.
    fn kind(&self) -> EntityKind {
        EntityKind::Other
    }

    /// Advances the entity by one tick.
    fn update(&mut self, ctx: &UpdateContext<'_>);

    /// Paints the entity onto the surface.
    ///
    /// The engine brackets every call in `save`/`restore`, so style
    /// mutations cannot leak to sibling entities.
    fn draw(&self, surface: &mut dyn RenderSurface);

    /// Returns the entity to its initial state. Must be idempotent.
    fn reset(&mut self) {}

    /// True once the entity has flagged itself for removal.
    fn should_remove(&self) -> bool {
        false
    }

    /// Downcast hook for player agents.
    fn as_player(&self) -> Option<&dyn PlayerAgent> {
        None
    }

    /// Mutable downcast hook for player agents.
    fn as_player_mut(&mut self) -> Option<&mut dyn PlayerAgent> {
        None
    }

    /// Downcast hook for the top-level game-state entity.
    fn as_director(&self) -> Option<&dyn DirectorEntity> {
        None
    }
}

//=== PlayerAgent Trait ===================================================

/// Extra capabilities of Player-kind entities.
///
/// The core is deliberately incurious about what an agent *does*; it only
/// routes input into the agent's [`ControlState`], toggles autonomous
/// mode, and reads the score at round boundaries.
pub trait PlayerAgent {
    /// Stable player slot, 0..=3. Doubles as the gamepad slot.
    fn player_index(&self) -> usize;

    /// Keyboard bindings, if this agent has any.
    ///
    /// Agents that return `None` are controller-only: when no gamepad is
    /// live at their slot they fall back to autonomous control.
    fn bindings(&self) -> Option<&ControlBindings>;

    /// The unified key-state both input sources write into.
    fn controls(&self) -> &ControlState;

    /// Mutable access for the input dispatch and gamepad unification.
    fn controls_mut(&mut self) -> &mut ControlState;

    /// Whether the agent is currently self-driving.
    fn is_autonomous(&self) -> bool;

    /// Switches the agent between manual and autonomous control.
    fn set_autonomous(&mut self, enabled: bool);

    /// Current score, read by the scene machine at round boundaries.
    fn score(&self) -> i64;
}

//=== DirectorEntity Trait ================================================

/// Capability of the top-level game-state entity.
pub trait DirectorEntity {
    /// True while a scene transition is in progress.
    ///
    /// While reported, the engine suppresses all gameplay entities from
    /// the draw pass so round content cannot bleed through between
    /// scenes.
    fn in_transition(&self) -> bool;
}

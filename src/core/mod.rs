//=========================================================================
// Core Systems
//
// Everything that runs inside one tick of the loop.
//
// Leaves first:
// - clock:   clamped-delta wall-clock sampling
// - entity:  the update/draw/reset capability contract
// - input:   snapshot, events, bindings, gamepad seam
// - render:  scoped-acquisition surface contract
// - audio:   fire-and-forget playback seam
// - session: rounds-played counter and score history
// - scene:   phase contract, validated chain, state machine
//
// The registry and loop that orchestrate these live in `crate::engine`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod audio;
pub mod clock;
pub mod entity;
pub mod input;
pub mod render;
pub mod scene;
pub mod session;

//=== Public API ==========================================================

pub use audio::{AudioService, NullAudio};
pub use clock::{GameClock, DEFAULT_MAX_STEP};
pub use entity::{DirectorEntity, Entity, EntityKind, PlayerAgent, PlayerStatus, UpdateContext};
pub use input::{
    Control, ControlBindings, ControlState, GamepadProvider, GamepadState, InputEvent,
    InputSnapshot, KeyCode,
};
pub use render::{NullSurface, RenderSurface};
pub use scene::{
    AssemblyError, Scene, SceneChain, SceneChainBuilder, SceneContent, SceneId, SceneKind,
    SceneManager,
};
pub use session::{SessionState, MAX_PLAYERS};

//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use caprine_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder, EntityId};

// Entity contract
pub use crate::core::entity::{
    DirectorEntity, Entity, EntityKind, PlayerAgent, PlayerStatus, UpdateContext,
};

// Input system
pub use crate::core::input::{
    Control, ControlBindings, ControlState, GamepadProvider, GamepadState, InputEvent,
    InputSnapshot, KeyCode,
};

// Scene system
pub use crate::core::scene::{
    confirmation_received, Scene, SceneChain, SceneChainBuilder, SceneContent, SceneId, SceneKind,
    SceneManager,
};

// Session bookkeeping
pub use crate::core::session::{SessionState, MAX_PLAYERS};

// Render and audio seams
pub use crate::core::audio::{AudioService, NullAudio};
pub use crate::core::render::{NullSurface, RenderSurface};

// Windowed host
pub use crate::platform::{HostEvent, WindowHost};

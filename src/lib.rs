//=========================================================================
// Caprine Engine — Library Root
//
// This crate defines the public API surface of the Caprine Engine, the
// realtime core of a local-multiplayer arena game: clamped-delta clock,
// entity registry with removal-safe sweep, scene state machine, and
// input fan-in from keyboard, pointer, and up to four gamepads.
//
// Responsibilities:
// - Expose the engine interface (`Engine`, `EngineBuilder`)
// - Keep lower-level subsystems reachable through `core` for
//   engine-level extensibility
// - Offer the windowed host glue (`WindowHost`) without exposing the
//   platform module's internals
//
// Typical usage:
// ```no_run
// use caprine_engine::EngineBuilder;
// use caprine_engine::core::NullSurface;
//
// let mut engine = EngineBuilder::new().build();
// engine.start();
// let mut surface = NullSurface;
// engine.frame(&mut surface);
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains all internal engine systems (clock, entities, input,
// scenes, session bookkeeping). It is exposed publicly for engine-level
// extensibility, but application code will mostly use the top-level
// `Engine` facade and the prelude.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains OS-specific logic (window, Winit integration,
// event loop); only its facade types are re-exported.
//
// `engine` defines the registry and the tick driver.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EntityId};
pub use platform::{HostError, HostEvent, WindowHost};

//=========================================================================
// Scene System
//=========================================================================
//
// Sequences the session through its phases.
//
// Architecture:
//   SceneManager (a Director-kind entity)
//     ├─ SceneChain: validated singly-linked progression of scenes
//     └─ SessionState: rounds-played counter + per-player score history
//
// Flow:
//   Entity pass → SceneManager::update → is_scene_done?
//     no  → delegate update to current scene
//     yes → capture scores (Round) → end_scene → advance → start_scene
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::entity::UpdateContext;
use crate::core::entity::Entity;
use crate::core::render::RenderSurface;

//=== Module Declarations =================================================

mod chain;
mod manager;

//=== Public API ==========================================================

pub use chain::{AssemblyError, SceneChain, SceneChainBuilder, SceneId};
pub use manager::SceneManager;

//=== SceneKind ===========================================================

/// The named phases a session moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    /// Opening screen; waits for a confirmation click.
    Title,

    /// Controls walkthrough before the first round.
    Tutorial,

    /// The phase where gameplay and scoring happen.
    Round,

    /// Between-rounds score display.
    Scoreboard,

    /// Session wrap-up; by convention links back to Title.
    EndGame,
}

//=== Scene Trait =========================================================

/// Lifecycle contract for one phase of the session.
///
/// A scene with no special behavior (EndGame is the canonical example)
/// implements only `kind`, `draw`, and a completion predicate; the
/// lifecycle hooks default to no-ops and [`confirmation_received`] covers
/// the common "wait for a click" predicate.
pub trait Scene {
    /// Which phase this scene represents.
    fn kind(&self) -> SceneKind;

    /// One-time setup when the scene becomes active (reset timers,
    /// reinitialize score displays).
    fn start_scene(&mut self) {}

    /// Teardown before the machine leaves this scene.
    fn end_scene(&mut self) {}

    /// Variant-specific completion predicate, polled once per tick.
    fn is_scene_done(&self, ctx: &UpdateContext<'_>) -> bool;

    /// Advances the scene by one tick while it is active and not done.
    fn update(&mut self, ctx: &UpdateContext<'_>);

    /// Paints the scene's own content.
    fn draw(&self, surface: &mut dyn RenderSurface);

    /// Returns the scene to its initial state. Must be idempotent.
    fn reset(&mut self) {}

    /// How many players participate in this scene.
    ///
    /// Round scenes must report a non-zero count; the chain builder
    /// rejects a Round with zero players before the loop ever starts.
    fn player_count(&self) -> usize {
        0
    }
}

//=== SceneContent ========================================================

/// Flattenable scene payload handed to the registry.
///
/// `Engine::load_scene` appends the background to the master list and
/// every obstacle to both the master and collidable lists, preserving
/// insertion order (later entries draw on top and update after earlier
/// ones).
pub struct SceneContent {
    /// The backdrop, drawn first and kept visible during transitions.
    pub background: Box<dyn Entity>,

    /// Platforms and other obstacles, in draw order.
    pub obstacles: Vec<Box<dyn Entity>>,
}

//=== Helpers =============================================================

/// Generic "await confirmation input" completion predicate.
///
/// True once the user produced a click this tick. Title, Scoreboard, and
/// EndGame scenes typically delegate `is_scene_done` here.
pub fn confirmation_received(ctx: &UpdateContext<'_>) -> bool {
    ctx.input.click().is_some()
}

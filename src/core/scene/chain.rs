//=========================================================================
// Scene Chain
//=========================================================================
//
// The validated singly-linked progression the state machine walks.
//
// Scenes are pushed into a builder, wired with `link`, and sealed by
// `finish`, which proves every slot has a successor and every Round has
// players. After that the runtime walk is total: advancing can never
// discover a missing link mid-session.
//
// Misconfiguration is fatal at assembly time, never mid-loop.
//
//=========================================================================

//=== External Crates =====================================================

use log::debug;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::{Scene, SceneKind};

//=== SceneId =============================================================

/// Opaque handle to a scene slot within one chain.
///
/// Ids are only meaningful for the builder that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(usize);

//=== AssemblyError =======================================================

/// Fatal scene-graph misconfiguration, reported before the loop starts.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// The builder was sealed without any scenes.
    #[error("scene chain has no scenes")]
    EmptyChain,

    /// A scene was never wired to a successor.
    #[error("{kind:?} scene {scene:?} has no successor")]
    MissingSuccessor { scene: SceneId, kind: SceneKind },

    /// A link references a slot outside this chain.
    #[error("link target {0:?} does not belong to this chain")]
    DanglingLink(SceneId),

    /// A Round scene was assembled with nobody in it.
    #[error("round scene {0:?} has zero players")]
    EmptyRound(SceneId),
}

//=== SceneChainBuilder ===================================================

/// Assembles and validates a scene progression.
///
/// # Example
///
/// ```ignore
/// let mut builder = SceneChainBuilder::new();
/// let title = builder.push(TitleScene::new());
/// let round = builder.push(RoundScene::new(2));
/// let end = builder.push(EndGameScene::new());
/// builder.link(title, round);
/// builder.link(round, end);
/// builder.link(end, title); // sessions restart rather than terminate
/// let chain = builder.finish(title)?;
/// ```
pub struct SceneChainBuilder {
    slots: Vec<(Box<dyn Scene>, Option<SceneId>)>,
}

impl SceneChainBuilder {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    //--- Assembly ---------------------------------------------------------

    /// Adds a scene and returns its handle.
    pub fn push<T>(&mut self, scene: T) -> SceneId
    where
        T: Scene + 'static,
    {
        let id = SceneId(self.slots.len());
        debug!("Chain slot {:?}: {:?}", id, scene.kind());
        self.slots.push((Box::new(scene), None));
        id
    }

    /// Wires `from`'s successor. Relinking replaces the previous target.
    pub fn link(&mut self, from: SceneId, to: SceneId) {
        if let Some(slot) = self.slots.get_mut(from.0) {
            slot.1 = Some(to);
        }
    }

    /// Validates the topology and seals the chain.
    ///
    /// # Errors
    ///
    /// Returns an [`AssemblyError`] if the chain is empty, any scene
    /// lacks a successor, a link points outside the chain, or a Round
    /// has zero players.
    pub fn finish(self, initial: SceneId) -> Result<SceneChain, AssemblyError> {
        if self.slots.is_empty() {
            return Err(AssemblyError::EmptyChain);
        }
        if initial.0 >= self.slots.len() {
            return Err(AssemblyError::DanglingLink(initial));
        }

        let count = self.slots.len();
        let mut slots = Vec::with_capacity(count);

        for (index, (scene, next)) in self.slots.into_iter().enumerate() {
            let id = SceneId(index);

            let next = next.ok_or(AssemblyError::MissingSuccessor {
                scene: id,
                kind: scene.kind(),
            })?;
            if next.0 >= count {
                return Err(AssemblyError::DanglingLink(next));
            }

            if scene.kind() == SceneKind::Round && scene.player_count() == 0 {
                return Err(AssemblyError::EmptyRound(id));
            }

            slots.push(SceneSlot { scene, next });
        }

        debug!("Scene chain sealed: {} scenes, initial {:?}", count, initial);
        Ok(SceneChain { slots, current: initial })
    }
}

impl Default for SceneChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== SceneChain ==========================================================

struct SceneSlot {
    scene: Box<dyn Scene>,
    next: SceneId,
}

/// A sealed scene progression with a current-scene cursor.
///
/// Exactly one scene is current at a time; the chain exclusively owns
/// every scene in it.
pub struct SceneChain {
    slots: Vec<SceneSlot>,
    current: SceneId,
}

impl SceneChain {
    //--- Cursor -----------------------------------------------------------

    /// The active scene.
    pub fn current(&self) -> &dyn Scene {
        self.slots[self.current.0].scene.as_ref()
    }

    /// Mutable access to the active scene.
    pub fn current_mut(&mut self) -> &mut dyn Scene {
        self.slots[self.current.0].scene.as_mut()
    }

    /// Moves the cursor to the current scene's successor.
    ///
    /// Total by construction: `finish` proved every slot has an
    /// in-bounds successor.
    pub fn advance(&mut self) {
        let next = self.slots[self.current.0].next;
        debug!(
            "Scene transition: {:?} -> {:?}",
            self.current().kind(),
            self.slots[next.0].scene.kind()
        );
        self.current = next;
    }

    /// Handle of the active scene.
    pub fn current_id(&self) -> SceneId {
        self.current
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::UpdateContext;
    use crate::core::render::RenderSurface;

    //--- Test Scene -------------------------------------------------------

    struct StubScene {
        kind: SceneKind,
        players: usize,
    }

    impl StubScene {
        fn new(kind: SceneKind) -> Self {
            Self { kind, players: 0 }
        }

        fn round(players: usize) -> Self {
            Self { kind: SceneKind::Round, players }
        }
    }

    impl Scene for StubScene {
        fn kind(&self) -> SceneKind {
            self.kind
        }

        fn is_scene_done(&self, _ctx: &UpdateContext<'_>) -> bool {
            false
        }

        fn update(&mut self, _ctx: &UpdateContext<'_>) {}

        fn draw(&self, _surface: &mut dyn RenderSurface) {}

        fn player_count(&self) -> usize {
            self.players
        }
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn empty_chain_is_rejected() {
        let builder = SceneChainBuilder::new();
        let fake = SceneId(0);
        assert!(matches!(builder.finish(fake), Err(AssemblyError::EmptyChain)));
    }

    #[test]
    fn missing_successor_is_rejected() {
        let mut builder = SceneChainBuilder::new();
        let title = builder.push(StubScene::new(SceneKind::Title));
        let end = builder.push(StubScene::new(SceneKind::EndGame));
        builder.link(title, end);
        // `end` never linked anywhere.

        match builder.finish(title) {
            Err(AssemblyError::MissingSuccessor { scene, kind }) => {
                assert_eq!(scene, end);
                assert_eq!(kind, SceneKind::EndGame);
            }
            other => panic!("expected MissingSuccessor, got {:?}", other.err()),
        }
    }

    #[test]
    fn empty_round_is_rejected() {
        let mut builder = SceneChainBuilder::new();
        let round = builder.push(StubScene::round(0));
        builder.link(round, round);

        assert!(matches!(
            builder.finish(round),
            Err(AssemblyError::EmptyRound(id)) if id == round
        ));
    }

    #[test]
    fn valid_cycle_seals_and_advances() {
        let mut builder = SceneChainBuilder::new();
        let title = builder.push(StubScene::new(SceneKind::Title));
        let round = builder.push(StubScene::round(2));
        let end = builder.push(StubScene::new(SceneKind::EndGame));
        builder.link(title, round);
        builder.link(round, end);
        builder.link(end, title);

        let mut chain = builder.finish(title).expect("valid chain");
        assert_eq!(chain.current().kind(), SceneKind::Title);

        chain.advance();
        assert_eq!(chain.current().kind(), SceneKind::Round);

        chain.advance();
        chain.advance();
        assert_eq!(chain.current().kind(), SceneKind::Title);
    }

    #[test]
    fn single_scene_may_loop_onto_itself() {
        let mut builder = SceneChainBuilder::new();
        let round = builder.push(StubScene::round(2));
        builder.link(round, round);

        let mut chain = builder.finish(round).expect("self-loop is valid");
        chain.advance();
        assert_eq!(chain.current().kind(), SceneKind::Round);
    }
}

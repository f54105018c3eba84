//=========================================================================
// Scene Manager
//=========================================================================
//
// Finite-state machine walking the sealed scene chain.
//
// The manager is itself a Director-kind entity: the registry updates it
// in the ordinary entity pass, and it swaps which scene is active
// without ever stopping the loop. Exactly one scene is current at a
// time; the manager exclusively owns that designation.
//
// Transition algorithm, once per tick:
//   1. Current scene not done → delegate update, stop.
//   2. Done and kind == Round → capture every roster player's score and
//      bump the completed-rounds counter (strictly before teardown).
//   3. end_scene on the outgoing scene.
//   4. Advance the cursor (total: chain validated at assembly).
//   5. start_scene on the incoming scene.
//
//=========================================================================

//=== External Crates =====================================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::entity::{DirectorEntity, Entity, EntityKind, UpdateContext};
use crate::core::render::RenderSurface;
use crate::core::session::SessionState;
use super::{SceneChain, SceneKind};

//=== SceneManager ========================================================

/// Walks the scene chain and books scores at round boundaries.
///
/// Owns the chain and the session state for its whole lifetime; both are
/// torn down together when the session ends.
pub struct SceneManager {
    chain: SceneChain,
    session: SessionState,
}

impl SceneManager {
    //--- Construction -----------------------------------------------------

    /// Wraps a sealed chain and a fresh session.
    ///
    /// Call [`SceneManager::start`] once before the first tick so the
    /// initial scene gets its `start_scene` hook.
    pub fn new(chain: SceneChain, session: SessionState) -> Self {
        Self { chain, session }
    }

    /// Fires `start_scene` on the initial scene.
    pub fn start(&mut self) {
        info!("Scene machine starting at {:?}", self.chain.current().kind());
        self.chain.current_mut().start_scene();
    }

    //--- Accessors --------------------------------------------------------

    /// Kind of the currently active scene.
    pub fn current_kind(&self) -> SceneKind {
        self.chain.current().kind()
    }

    /// The session's score history and round counter.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    //--- Internal Helpers -------------------------------------------------

    fn capture_round_scores(&mut self, ctx: &UpdateContext<'_>) {
        for status in ctx.players {
            self.session.record_score(status.index, status.score);
        }
        self.session.complete_round();
        info!(
            "Round {} complete, {} scores captured",
            self.session.rounds_played(),
            ctx.players.len()
        );
    }
}

//=== Entity Implementation ===============================================

impl Entity for SceneManager {
    fn kind(&self) -> EntityKind {
        EntityKind::Director
    }

    fn update(&mut self, ctx: &UpdateContext<'_>) {
        if !self.chain.current().is_scene_done(ctx) {
            self.chain.current_mut().update(ctx);
            return;
        }

        // Score capture must precede teardown of the round's entities.
        if self.chain.current().kind() == SceneKind::Round {
            self.capture_round_scores(ctx);
        }

        self.chain.current_mut().end_scene();
        self.chain.advance();
        self.chain.current_mut().start_scene();
    }

    fn draw(&self, surface: &mut dyn RenderSurface) {
        self.chain.current().draw(surface);
    }

    fn reset(&mut self) {
        self.chain.current_mut().reset();
    }

    fn as_director(&self) -> Option<&dyn DirectorEntity> {
        Some(self)
    }
}

impl DirectorEntity for SceneManager {
    /// Transition mode holds whenever the session is outside a round, so
    /// gameplay entities never bleed through title/score screens.
    fn in_transition(&self) -> bool {
        self.chain.current().kind() != SceneKind::Round
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::PlayerStatus;
    use crate::core::input::InputSnapshot;
    use crate::core::scene::{Scene, SceneChainBuilder};

    //--- Test Scenes ------------------------------------------------------

    /// Scene that is never done, counting how often it is updated.
    struct NeverDoneScene {
        kind: SceneKind,
        updates: std::rc::Rc<std::cell::Cell<u32>>,
    }

    impl Scene for NeverDoneScene {
        fn kind(&self) -> SceneKind {
            self.kind
        }

        fn is_scene_done(&self, _ctx: &UpdateContext<'_>) -> bool {
            false
        }

        fn update(&mut self, _ctx: &UpdateContext<'_>) {
            self.updates.set(self.updates.get() + 1);
        }

        fn draw(&self, _surface: &mut dyn RenderSurface) {}

        fn player_count(&self) -> usize {
            4
        }
    }

    /// Always-done scene for fast cycling.
    struct InstantScene(SceneKind);

    impl Scene for InstantScene {
        fn kind(&self) -> SceneKind {
            self.0
        }

        fn is_scene_done(&self, _ctx: &UpdateContext<'_>) -> bool {
            true
        }

        fn update(&mut self, _ctx: &UpdateContext<'_>) {}

        fn draw(&self, _surface: &mut dyn RenderSurface) {}

        fn player_count(&self) -> usize {
            if self.0 == SceneKind::Round { 4 } else { 0 }
        }
    }

    //--- Helpers ----------------------------------------------------------

    fn four_player_roster() -> Vec<PlayerStatus> {
        (0..4)
            .map(|index| PlayerStatus {
                index,
                score: 10 * index as i64,
                autonomous: false,
            })
            .collect()
    }

    fn manager_with_cycle() -> SceneManager {
        let mut builder = SceneChainBuilder::new();
        let title = builder.push(InstantScene(SceneKind::Title));
        let round = builder.push(InstantScene(SceneKind::Round));
        let board = builder.push(InstantScene(SceneKind::Scoreboard));
        let end = builder.push(InstantScene(SceneKind::EndGame));
        builder.link(title, round);
        builder.link(round, board);
        builder.link(board, end);
        builder.link(end, title);

        let chain = builder.finish(title).expect("valid cycle");
        SceneManager::new(chain, SessionState::new())
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn cycles_through_all_kinds_in_order_and_returns_to_title() {
        let mut manager = manager_with_cycle();
        manager.start();

        let snapshot = InputSnapshot::new();
        let roster = four_player_roster();
        let ctx = UpdateContext {
            delta: 1.0 / 60.0,
            input: &snapshot,
            players: &roster,
            debug: false,
        };

        let mut visited = vec![manager.current_kind()];
        for _ in 0..4 {
            manager.update(&ctx);
            visited.push(manager.current_kind());
        }

        assert_eq!(
            visited,
            vec![
                SceneKind::Title,
                SceneKind::Round,
                SceneKind::Scoreboard,
                SceneKind::EndGame,
                SceneKind::Title,
            ]
        );
    }

    #[test]
    fn scores_collected_once_per_player_per_round() {
        let mut manager = manager_with_cycle();
        manager.start();

        let snapshot = InputSnapshot::new();
        let roster = four_player_roster();
        let ctx = UpdateContext {
            delta: 1.0 / 60.0,
            input: &snapshot,
            players: &roster,
            debug: false,
        };

        // Three full cycles of the four-scene loop.
        for _ in 0..12 {
            manager.update(&ctx);
        }

        assert_eq!(manager.session().rounds_played(), 3);
        for player in 0..4 {
            let scores = manager.session().scores_for(player);
            assert_eq!(scores.len(), 3, "player {} should have 3 entries", player);
            assert!(scores.iter().all(|&s| s == 10 * player as i64));
        }
    }

    #[test]
    fn not_done_scene_keeps_receiving_updates() {
        let updates = std::rc::Rc::new(std::cell::Cell::new(0));
        let mut builder = SceneChainBuilder::new();
        let round = builder.push(NeverDoneScene {
            kind: SceneKind::Round,
            updates: updates.clone(),
        });
        builder.link(round, round);
        let chain = builder.finish(round).expect("valid");

        let mut manager = SceneManager::new(chain, SessionState::new());
        manager.start();

        let snapshot = InputSnapshot::new();
        let ctx = UpdateContext {
            delta: 1.0 / 60.0,
            input: &snapshot,
            players: &[],
            debug: false,
        };

        for _ in 0..5 {
            manager.update(&ctx);
        }
        assert_eq!(manager.current_kind(), SceneKind::Round);
        assert_eq!(updates.get(), 5);
        assert_eq!(manager.session().rounds_played(), 0);
    }

    #[test]
    fn transition_mode_tracks_non_round_scenes() {
        let mut manager = manager_with_cycle();
        manager.start();
        assert!(manager.in_transition(), "title screen suppresses gameplay");

        let snapshot = InputSnapshot::new();
        let roster = four_player_roster();
        let ctx = UpdateContext {
            delta: 1.0 / 60.0,
            input: &snapshot,
            players: &roster,
            debug: false,
        };

        manager.update(&ctx); // Title -> Round
        assert!(!manager.in_transition());

        manager.update(&ctx); // Round -> Scoreboard
        assert!(manager.in_transition());
    }
}

//=========================================================================
// Session State
//
// Process-wide bookkeeping that used to be bare globals: how many rounds
// the session has completed, and every score each player posted.
//
// Lifecycle:
// Created when the session starts, handed to the SceneManager, dropped
// when the session ends. Scores live only in memory for the session;
// there is deliberately no persistence.
//
//=========================================================================

//=== External Crates =====================================================

use log::warn;

//=== Constants ===========================================================

/// The arena supports at most four simultaneous players.
pub const MAX_PLAYERS: usize = 4;

//=== SessionState ========================================================

/// Rounds-played counter plus per-player score history.
///
/// Score capture happens once per completed round, strictly before the
/// round's entities are torn down, so `scores_for(i).len()` equals the
/// number of rounds player `i` has finished.
#[derive(Debug, Default)]
pub struct SessionState {
    rounds_played: u32,
    collected_scores: [Vec<i64>; MAX_PLAYERS],
}

impl SessionState {
    //--- Construction -----------------------------------------------------

    /// Creates a fresh session with no rounds played.
    pub fn new() -> Self {
        Self::default()
    }

    //--- Recording --------------------------------------------------------

    /// Appends a round score for the given player slot.
    ///
    /// Out-of-range slots are dropped with a warning; the arena never has
    /// more than [`MAX_PLAYERS`] agents.
    pub fn record_score(&mut self, player_index: usize, score: i64) {
        match self.collected_scores.get_mut(player_index) {
            Some(history) => history.push(score),
            None => warn!(
                "Dropping score {} for out-of-range player slot {}",
                score, player_index
            ),
        }
    }

    /// Bumps the completed-rounds counter.
    pub fn complete_round(&mut self) {
        self.rounds_played += 1;
    }

    //--- Accessors --------------------------------------------------------

    /// Number of rounds completed this session.
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Every score the player has posted, oldest first.
    pub fn scores_for(&self, player_index: usize) -> &[i64] {
        self.collected_scores
            .get(player_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_empty() {
        let session = SessionState::new();
        assert_eq!(session.rounds_played(), 0);
        for i in 0..MAX_PLAYERS {
            assert!(session.scores_for(i).is_empty());
        }
    }

    #[test]
    fn scores_accumulate_per_player() {
        let mut session = SessionState::new();
        session.record_score(0, 3);
        session.record_score(1, 7);
        session.record_score(0, 5);

        assert_eq!(session.scores_for(0), &[3, 5]);
        assert_eq!(session.scores_for(1), &[7]);
        assert!(session.scores_for(2).is_empty());
    }

    #[test]
    fn out_of_range_slot_is_dropped() {
        let mut session = SessionState::new();
        session.record_score(MAX_PLAYERS, 99);
        assert!(session.scores_for(MAX_PLAYERS).is_empty());
    }

    #[test]
    fn round_counter_advances() {
        let mut session = SessionState::new();
        session.complete_round();
        session.complete_round();
        assert_eq!(session.rounds_played(), 2);
    }
}

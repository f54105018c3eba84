//=========================================================================
// Game Clock
//
// Produces one clamped elapsed-time value per tick from wall-clock
// sampling.
//
// Responsibilities:
// - Sample wall time and report the delta since the previous sample
// - Clamp every delta into [0, max_step] (no spiral-of-death on slow
//   frames, no negative deltas if the host clock misbehaves)
// - Accumulate the *clamped* deltas into the running game time
//
// Notes:
// The clock makes no pacing promises. The host invokes the loop at its
// own cadence; the clock only guarantees that whatever interval elapsed,
// the simulation never steps further than `max_step` at once.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Instant;

//=== Constants ===========================================================

/// Upper bound on a single tick's delta, in seconds.
///
/// A frame that took longer than this (debugger pause, window drag, OS
/// hiccup) advances the simulation by exactly this much instead of
/// trying to catch up in one giant step.
pub const DEFAULT_MAX_STEP: f64 = 0.05;

//=== GameClock ===========================================================

/// Wall-clock sampler with per-tick delta clamping.
///
/// The first tick after construction measures from the construction
/// instant, so it is naturally near zero.
///
/// # Examples
///
/// ```
/// use caprine_engine::core::clock::GameClock;
///
/// let mut clock = GameClock::default();
/// let delta = clock.tick();
/// assert!(delta >= 0.0 && delta <= clock.max_step());
/// ```
pub struct GameClock {
    game_time: f64,
    max_step: f64,
    last_sample: Instant,
}

impl GameClock {
    //--- Construction -----------------------------------------------------

    /// Creates a clock with the given clamp, sampling from "now".
    ///
    /// # Panics
    ///
    /// Panics if `max_step` is not strictly positive.
    pub fn new(max_step: f64) -> Self {
        assert!(max_step > 0.0, "max_step must be positive, got {}", max_step);
        Self {
            game_time: 0.0,
            max_step,
            last_sample: Instant::now(),
        }
    }

    //--- Ticking ----------------------------------------------------------

    /// Samples the wall clock and returns the clamped delta in seconds.
    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    /// Like [`GameClock::tick`], but with an injected sample instant.
    ///
    /// Hosts that drive the loop from their own scheduler (or tests that
    /// need deterministic time) supply the instants themselves.
    /// `saturating_duration_since` absorbs a regressing sample.
    pub fn tick_at(&mut self, now: Instant) -> f64 {
        let raw = now.saturating_duration_since(self.last_sample).as_secs_f64();
        self.last_sample = now;
        self.advance(raw)
    }

    /// Clamps a raw elapsed value and folds it into the game time.
    ///
    /// This is the whole delta contract in one place: the returned value
    /// is always in `[0, max_step]`, and `game_time` accumulates the
    /// returned value, never the raw input.
    pub fn advance(&mut self, raw: f64) -> f64 {
        let delta = raw.max(0.0).min(self.max_step);
        self.game_time += delta;
        delta
    }

    //--- Accessors --------------------------------------------------------

    /// Total simulated time in seconds (sum of every returned delta).
    pub fn game_time(&self) -> f64 {
        self.game_time
    }

    /// The per-tick clamp in seconds.
    pub fn max_step(&self) -> f64 {
        self.max_step
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STEP)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::time::Duration;

    #[test]
    fn first_tick_is_near_zero() {
        let mut clock = GameClock::default();
        let delta = clock.tick();
        assert!(delta < 0.05, "first delta should be tiny, got {}", delta);
    }

    #[test]
    fn long_frame_is_clamped_to_max_step() {
        let mut clock = GameClock::new(0.05);
        let start = Instant::now();
        clock.tick_at(start);

        // A two-second stall reports only max_step.
        let delta = clock.tick_at(start + Duration::from_secs(2));
        assert_eq!(delta, 0.05);
        assert_eq!(clock.game_time(), 0.05);
    }

    #[test]
    fn regressing_sample_reports_zero() {
        let mut clock = GameClock::new(0.05);
        let start = Instant::now();
        clock.tick_at(start + Duration::from_secs(1));

        let delta = clock.tick_at(start);
        assert_eq!(delta, 0.0);
    }

    #[test]
    fn game_time_accumulates_clamped_deltas() {
        let mut clock = GameClock::new(0.05);
        let start = Instant::now();
        clock.tick_at(start);

        let mut total = 0.0;
        for i in 1..=10 {
            // 100 ms per frame, clamped to 50 ms each.
            total += clock.tick_at(start + Duration::from_millis(100 * i));
        }

        assert_eq!(total, 0.5);
        assert_eq!(clock.game_time(), total);
    }

    #[test]
    #[should_panic(expected = "max_step must be positive")]
    fn zero_max_step_is_rejected() {
        GameClock::new(0.0);
    }

    proptest! {
        /// Every reported delta lies in [0, max_step], and the game time
        /// equals the sum of reported deltas, not of raw inputs.
        #[test]
        fn delta_bounds_and_accumulation(raws in prop::collection::vec(-0.01f64..0.5, 1..64)) {
            let mut clock = GameClock::new(0.05);
            let mut sum = 0.0;

            for raw in raws {
                let delta = clock.advance(raw);
                prop_assert!(delta >= 0.0);
                prop_assert!(delta <= clock.max_step());
                sum += delta;
            }

            prop_assert!((clock.game_time() - sum).abs() < 1e-12);
        }
    }
}

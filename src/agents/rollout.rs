//! Rollout (Monte-Carlo) strategy.
//!
//! Each legal action is scored by playing complete random-vs-random games
//! from its successor and tallying wins for the acting player. The agent
//! re-yields the current best after every sweep over the action set — an
//! anytime estimator that never terminates on its own and is truncated
//! only by the referee's deadline.

use crate::core::GameRng;
use crate::universe::{Outcome, Universe};

use super::{Agent, AgentInfo, Yielder};

/// Anytime rollout-based agent.
#[derive(Clone, Copy, Debug, Default)]
pub struct RolloutAgent;

impl RolloutAgent {
    /// Play a random-vs-random game to completion.
    ///
    /// Returns the winning seat index, or `None` for a draw. The walk
    /// follows successor states (whose own branch RNGs drive the shuffled
    /// enumeration) while `rng` picks the moves, so successive playouts
    /// from the same start diverge.
    fn playout(mut state: Universe, rng: &mut GameRng) -> Option<usize> {
        loop {
            match state.is_winner() {
                Some(Outcome::Win) => return Some(state.current_player()),
                Some(Outcome::Loss) => return Some(1 - state.current_player()),
                Some(Outcome::Draw) => return None,
                None => {
                    let mut successors = state.successors();
                    let index = rng.gen_range_usize(0..successors.len());
                    state = successors.swap_remove(index).1;
                }
            }
        }
    }
}

impl Agent for RolloutAgent {
    fn info(&self) -> AgentInfo {
        AgentInfo::named("Rollout")
    }

    fn decide(&self, mut state: Universe, rng: &mut GameRng, out: &mut Yielder) {
        let me = state.current_player();
        let successors = state.successors();
        let mut wins = vec![0u32; successors.len()];

        loop {
            for (index, (_, next)) in successors.iter().enumerate() {
                // Best-effort prompt exit between playouts.
                if out.is_cancelled() {
                    return;
                }
                if Self::playout(next.clone(), rng) == Some(me) {
                    wins[index] += 1;
                }
            }

            let best = wins
                .iter()
                .enumerate()
                .max_by_key(|(_, &count)| count)
                .map(|(index, _)| index)
                .expect("fortify guarantees at least one action");
            if !out.give(successors[best].0) {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::decision_pipe;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    #[test]
    fn test_playout_reaches_a_verdict() {
        let state = Universe::big_bang(&["alice", "bob"], 2, 42).initialize();
        let mut rng = GameRng::new(9);
        // Any verdict is fine; the point is termination within the round
        // budget and a seat-index (not perspective-relative) result.
        let verdict = RolloutAgent::playout(state, &mut rng);
        if let Some(seat) = verdict {
            assert!(seat < 2);
        }
    }

    #[test]
    fn test_yields_improving_legal_actions_until_cancelled() {
        let state = Universe::custom(
            vec![
                crate::core::Planet::new(
                    Arc::new(crate::core::PlanetInfo::new("A", (0, 0), 10, 100)),
                    crate::core::OwnerId::Red,
                    10,
                ),
                crate::core::Planet::new(
                    Arc::new(crate::core::PlanetInfo::new("B", (1, 0), 10, 100)),
                    crate::core::OwnerId::Blue,
                    10,
                ),
            ],
            &["alice", "bob"],
            6,
            42,
        );
        let (mut yielder, receiver) = decision_pipe();

        let handle = std::thread::spawn({
            let state = state.clone();
            move || {
                let mut rng = GameRng::new(11);
                RolloutAgent.decide(state, &mut rng, &mut yielder);
            }
        });

        let decision = receiver.collect(Some(Instant::now() + Duration::from_millis(300)));
        receiver.cancel();
        handle.join().unwrap();

        let action = decision.action.expect("at least one sweep finished");
        let mut state = state;
        assert!(state.successors().iter().any(|(a, _)| *a == action));
    }
}

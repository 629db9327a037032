//! Iterative-deepening alpha-beta search.
//!
//! Re-searches from depth 1 upward and yields the best action after every
//! completed depth, so a timeout after any finished iteration still has a
//! usable answer. Successor shuffling randomizes move order per node,
//! which both breaks deterministic worst-case pruning and diversifies
//! among equally-good moves.

use tracing::debug;

use crate::core::GameRng;
use crate::universe::Universe;

use super::minimax::terminal_score;
use super::{Agent, AgentInfo, Yielder};

/// Iterative-deepening alpha-beta agent.
///
/// The heuristic rewards material plus positional terms: in-flight fleet
/// count, weighted production, owned-planet count, and a penalty for
/// planets already sitting at capacity (wasted production).
#[derive(Clone, Copy, Debug)]
pub struct AlphaBetaAgent {
    start_depth: u32,
    max_depth: u32,
}

impl AlphaBetaAgent {
    #[must_use]
    pub fn new(start_depth: u32, max_depth: u32) -> Self {
        Self {
            start_depth: start_depth.max(1),
            max_depth: max_depth.max(start_depth.max(1)),
        }
    }

    fn heuristic(state: &Universe) -> f64 {
        let me = state.current_player_id();
        let mut ships = 0.0;
        let mut production = 0.0;
        let mut planets = 0u32;
        let mut saturated = 0u32;
        for planet in state.planets() {
            if planet.owner() == me {
                ships += planet.ships();
                production += planet.info().production();
                planets += 1;
                if planet.ships_hundredths() == i64::from(planet.info().capacity) * 100 {
                    saturated += 1;
                }
            }
        }
        let fleets = state.fleets().iter().filter(|f| f.owner == me).count() as f64;

        ships + fleets / 2.0 + production * 6.0 + f64::from(planets) * 5.0
            - f64::from(saturated) * 10.0
    }

    fn max_value(&self, state: &mut Universe, depth: u32, mut alpha: f64, beta: f64) -> f64 {
        if let Some(outcome) = state.is_winner() {
            return terminal_score(outcome);
        }
        if depth == 0 {
            return Self::heuristic(state);
        }

        let mut value = f64::NEG_INFINITY;
        for (_, mut next) in state.successors() {
            value = value.max(self.min_value(&mut next, depth - 1, alpha, beta));
            alpha = alpha.max(value);
            if beta <= alpha {
                break;
            }
        }
        value
    }

    fn min_value(&self, state: &mut Universe, depth: u32, alpha: f64, mut beta: f64) -> f64 {
        if let Some(outcome) = state.is_winner() {
            return -terminal_score(outcome);
        }
        if depth == 0 {
            return -Self::heuristic(state);
        }

        let mut value = f64::INFINITY;
        for (_, mut next) in state.successors() {
            value = value.min(self.max_value(&mut next, depth - 1, alpha, beta));
            if value <= alpha {
                return value;
            }
            beta = beta.min(value);
        }
        value
    }
}

impl Default for AlphaBetaAgent {
    fn default() -> Self {
        Self::new(1, 100)
    }
}

impl Agent for AlphaBetaAgent {
    fn info(&self) -> AgentInfo {
        AgentInfo::named("ID-AlphaBeta")
    }

    fn decide(&self, mut state: Universe, _rng: &mut GameRng, out: &mut Yielder) {
        for depth in self.start_depth..=self.max_depth {
            // Fresh bounds every iteration: stale bounds from a shallower
            // search can mask better moves at the deeper one.
            let mut best_action = None;
            let mut best_value = f64::NEG_INFINITY;
            let mut alpha = f64::NEG_INFINITY;
            let beta = f64::INFINITY;

            for (action, mut next) in state.successors() {
                let value = self.min_value(&mut next, depth - 1, alpha, beta);
                if value > best_value {
                    best_value = value;
                    best_action = Some(action);
                }
                alpha = alpha.max(best_value);
                if beta <= alpha {
                    break;
                }
            }

            if let Some(best) = best_action {
                debug!(depth, best = %best, value = best_value, "completed depth");
                if !out.give(best) {
                    return;
                }
            }
        }
    }
}

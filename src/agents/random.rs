//! Uniformly random strategy: the baseline opponent and rollout policy.

use crate::core::GameRng;
use crate::universe::Universe;

use super::{Agent, AgentInfo, Yielder};

/// Samples one legal action uniformly and yields it once.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomAgent;

impl Agent for RandomAgent {
    fn info(&self) -> AgentInfo {
        AgentInfo::named("Random")
    }

    fn decide(&self, mut state: Universe, rng: &mut GameRng, out: &mut Yielder) {
        let successors = state.successors();
        if let Some((action, _)) = rng.choose(&successors) {
            out.give(*action);
        }
    }
}

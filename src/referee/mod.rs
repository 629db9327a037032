//! The match loop: drives turns, enforces per-move time limits, validates
//! chosen actions, substitutes fallbacks, and reports the winners.
//!
//! ## Deadline enforcement
//!
//! Each decision runs on its own detached thread, pushing candidate
//! actions into the mailbox. The referee drains the mailbox until the
//! wall-clock deadline, keeps the last value, and raises cancellation; the
//! agent observes it at its next yield and unwinds on its own. Because the
//! engine only ever mutates clones, an abandoned decision needs no
//! rollback.
//!
//! ## Recovery
//!
//! Timeouts and illegal moves are recovered locally: a uniformly random
//! legal action is substituted and the cause is logged as a warning. Agent
//! panics are caught and downgraded to timeouts in tournament mode. Only a
//! malformed state (an engine invariant violation) aborts the match.

pub mod visualizer;

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::agents::{decision_pipe, Agent, Decision};
use crate::core::GameRng;
use crate::error::GameError;
use crate::universe::{Outcome, Universe};

pub use visualizer::{NullVisualizer, Visualizer};

/// Match-level configuration.
#[derive(Clone, Debug)]
pub struct RefereeConfig {
    /// Per-seat wall-clock budget for one decision. `None` means the
    /// referee waits until the agent finishes on its own — only sensible
    /// for self-terminating agents.
    pub timeouts: Vec<Option<Duration>>,
    /// Tournament mode catches agent panics and treats them as timeouts;
    /// debug mode aborts the match with full context instead.
    pub tournament_mode: bool,
    /// Seed for the referee's own RNG (fallback substitutions).
    pub seed: u64,
}

impl Default for RefereeConfig {
    fn default() -> Self {
        Self {
            timeouts: vec![Some(Duration::from_secs(5)); 2],
            tournament_mode: true,
            seed: 0,
        }
    }
}

impl RefereeConfig {
    #[must_use]
    pub fn with_timeouts(mut self, timeouts: Vec<Option<Duration>>) -> Self {
        self.timeouts = timeouts;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn debug_mode(mut self) -> Self {
        self.tournament_mode = false;
        self
    }
}

/// Drives a match between two agents.
pub struct Referee {
    agents: Vec<Arc<dyn Agent>>,
    config: RefereeConfig,
    rng: GameRng,
}

impl Referee {
    #[must_use]
    pub fn new(agents: Vec<Arc<dyn Agent>>, config: RefereeConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            agents,
            config,
            rng,
        }
    }

    /// Play the match to completion.
    ///
    /// Returns the absolute winner seat indices: empty for a draw, one
    /// element otherwise. The engine's perspective-relative outcome is
    /// translated here and nowhere else.
    pub fn play(
        &mut self,
        state: Universe,
        mut visualizer: Option<&mut dyn Visualizer>,
    ) -> Result<Vec<usize>, GameError> {
        let mut state = state;
        state.validate()?;
        info!(
            players = ?state.players().iter().map(ToString::to_string).collect::<Vec<_>>(),
            "match started"
        );

        loop {
            // Terminal check runs once per state, before deciding.
            if let Some(outcome) = state.is_winner() {
                let mover = state.current_player();
                let winners = match outcome {
                    Outcome::Draw => vec![],
                    Outcome::Win => vec![mover],
                    Outcome::Loss => vec![1 - mover],
                };
                match winners.as_slice() {
                    [] => info!("game over: draw"),
                    [seat] => info!(winner = seat, "game over"),
                    _ => unreachable!("two-player match has at most one winner"),
                }
                if let Some(viz) = visualizer.as_deref_mut() {
                    viz.game_over(&winners);
                }
                return Ok(winners);
            }

            let mover = state.current_player();
            let agent = Arc::clone(&self.agents[mover]);
            let name = agent.info().name;
            let timeout = self.config.timeouts.get(mover).copied().flatten();

            let started = Instant::now();
            let decision = self.request_decision(agent, &state, timeout);
            debug!(
                agent = %name,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "decision window closed"
            );

            if let Some(fault) = decision.fault.as_deref() {
                if self.config.tournament_mode {
                    warn!(agent = %name, fault, "agent faulted; treating as timeout");
                } else {
                    return Err(GameError::AgentFault {
                        agent: name,
                        message: fault.to_string(),
                    });
                }
            }

            // Legality is re-checked against a fresh successor set by
            // value, never against cached identities.
            let mut successors = state.successors();
            let position = decision
                .action
                .and_then(|action| successors.iter().position(|(a, _)| *a == action));
            let (action, next) = match position {
                Some(index) => successors.swap_remove(index),
                None => {
                    match decision.action {
                        None => warn!(agent = %name, "time out! choosing a random action"),
                        Some(action) => {
                            warn!(agent = %name, action = %action, "illegal move! choosing a random action");
                        }
                    }
                    let index = self.rng.gen_range_usize(0..successors.len());
                    successors.swap_remove(index)
                }
            };

            debug!(seat = mover, action = %action, "applied");
            state = next;
            state.validate()?;

            // Snapshots go out once per round, on the wrap back to seat 0.
            if state.current_player() == 0 {
                if let Some(viz) = visualizer.as_deref_mut() {
                    viz.update_state(&state);
                }
            }
        }
    }

    /// Run one decision on a detached thread and harvest the mailbox.
    fn request_decision(
        &mut self,
        agent: Arc<dyn Agent>,
        state: &Universe,
        timeout: Option<Duration>,
    ) -> Decision {
        let (mut yielder, receiver) = decision_pipe();
        let snapshot = state.clone();
        let mut rng = self.rng.fork();

        std::thread::spawn(move || {
            let run = std::panic::catch_unwind(AssertUnwindSafe(|| {
                agent.decide(snapshot, &mut rng, &mut yielder);
            }));
            if let Err(panic) = run {
                yielder.fault(panic_message(&panic));
            }
        });

        let decision = receiver.collect(timeout.map(|budget| Instant::now() + budget));
        // Cancellation reaches the agent at its next yield; the detached
        // thread unwinds on its own while the match moves on.
        receiver.cancel();
        decision
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

//! Search agents and the anytime decision contract.
//!
//! An agent is polymorphic over one capability: given a state snapshot,
//! produce a non-terminating, lazily-improving sequence of candidate
//! actions. The sequence is modelled as a cancellable unit of work pushing
//! successive "current best" values into a mailbox; the referee pulls
//! values until the wall-clock budget expires, keeps the last one, and
//! raises cancellation. Suspension points are exactly the [`Yielder::give`]
//! calls — between them an agent runs uninterrupted.
//!
//! Agents never mutate the referee's state: they receive an owned clone
//! and explore by cloning further.

pub mod alpha_beta;
pub mod minimax;
pub mod random;
pub mod rollout;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::core::{Action, GameRng};
use crate::universe::Universe;

pub use alpha_beta::AlphaBetaAgent;
pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
pub use rollout::RolloutAgent;

/// Static identity metadata for an agent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentInfo {
    pub name: String,
}

impl AgentInfo {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A decision strategy.
///
/// `decide` must treat `state` as an immutable snapshot of the position
/// (exploring via its `successors`), may run indefinitely, and must stop
/// promptly once the yielder reports cancellation. Every action produced
/// must be one of the state's legal actions by value.
pub trait Agent: Send + Sync {
    /// Identity metadata; no side effects.
    fn info(&self) -> AgentInfo;

    /// Produce a lazily-improving sequence of candidate actions.
    fn decide(&self, state: Universe, rng: &mut GameRng, out: &mut Yielder);
}

enum Message {
    Best(Action),
    Fault(String),
}

/// The agent-side end of the decision mailbox.
pub struct Yielder {
    tx: Sender<Message>,
    cancelled: Arc<AtomicBool>,
}

impl Yielder {
    /// Yield the current best action.
    ///
    /// Returns `false` once the referee has cancelled the decision; the
    /// agent should return as soon as that happens.
    pub fn give(&mut self, action: Action) -> bool {
        if self.cancelled.load(Ordering::Relaxed) {
            return false;
        }
        // A send can only fail if the referee dropped its end, which is
        // equivalent to cancellation.
        self.tx.send(Message::Best(action)).is_ok() && !self.cancelled.load(Ordering::Relaxed)
    }

    /// Whether the referee has already cancelled this decision.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Report an agent fault (used by the referee's panic guard).
    pub(crate) fn fault(&mut self, message: String) {
        let _ = self.tx.send(Message::Fault(message));
    }
}

/// Everything the referee learned from one decision window.
#[derive(Clone, Debug, Default)]
pub struct Decision {
    /// Last action yielded before the deadline, if any.
    pub action: Option<Action>,
    /// Panic message, if the agent faulted.
    pub fault: Option<String>,
}

/// The referee-side end of the decision mailbox.
pub struct DecisionReceiver {
    rx: Receiver<Message>,
    cancelled: Arc<AtomicBool>,
}

impl DecisionReceiver {
    /// Drain the mailbox until `deadline` (or until the agent finishes,
    /// whichever comes first), keeping the last value produced. With no
    /// deadline, blocks until the agent finishes on its own.
    #[must_use]
    pub fn collect(&self, deadline: Option<Instant>) -> Decision {
        let mut decision = Decision::default();
        loop {
            let received = match deadline {
                Some(at) => self.rx.recv_deadline(at).ok(),
                None => self.rx.recv().ok(),
            };
            match received {
                Some(Message::Best(action)) => decision.action = Some(action),
                Some(Message::Fault(message)) => {
                    decision.fault = Some(message);
                    break;
                }
                // Deadline reached or agent finished and dropped its end.
                None => break,
            }
        }
        decision
    }

    /// Raise cancellation: the agent observes it at its next yield.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

/// Create a linked decision mailbox pair.
#[must_use]
pub fn decision_pipe() -> (Yielder, DecisionReceiver) {
    let (tx, rx) = unbounded();
    let cancelled = Arc::new(AtomicBool::new(false));
    (
        Yielder {
            tx,
            cancelled: Arc::clone(&cancelled),
        },
        DecisionReceiver { rx, cancelled },
    )
}

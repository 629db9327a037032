//! # konquest
//!
//! A two-player deterministic planetary-conquest game ("Konquest") together
//! with a family of adversarial search agents that choose moves against a
//! wall-clock time budget.
//!
//! ## Architecture
//!
//! - **Clone-per-branch exploration**: search agents never mutate a shared
//!   state. Every explored branch deep-copies planets and fleets; the
//!   immutable planet records and the player list are shared by handle.
//!
//! - **Per-round world simulation**: state transitions are per-player-move
//!   granular, but production, fleet advancement, and combat resolve as one
//!   synchronized step after every non-neutral player has moved.
//!
//! - **Anytime decisions**: an agent is a cancellable unit of work that
//!   pushes successive "current best" actions into a mailbox. The referee
//!   keeps the last value produced before the deadline and cancels the rest.
//!
//! ## Modules
//!
//! - `core`: players, planets, fleets, actions, deterministic RNG
//! - `universe`: the transition engine and galaxy generation
//! - `agents`: random, minimax, alpha-beta, and rollout strategies
//! - `referee`: the time-limited match loop
//! - `error`: crate error taxonomy

pub mod agents;
pub mod core;
pub mod error;
pub mod referee;
pub mod universe;

// Re-export commonly used types
pub use crate::core::{Action, Fleet, GameRng, OwnerId, Planet, PlanetInfo, Player};

pub use crate::universe::{GalaxyConfig, Outcome, Universe};

pub use crate::agents::{
    decision_pipe, Agent, AgentInfo, AlphaBetaAgent, Decision, DecisionReceiver, MinimaxAgent,
    RandomAgent, RolloutAgent, Yielder,
};

pub use crate::referee::{NullVisualizer, Referee, RefereeConfig, Visualizer};

pub use crate::error::GameError;

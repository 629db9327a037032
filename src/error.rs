//! Crate error taxonomy.
//!
//! Two classes of failure exist:
//!
//! - **Malformed state** (negative ships, over-capacity planets, duplicate
//!   fleet ids): a bug in state construction. Never silently repaired; the
//!   match aborts with a diagnostic.
//! - **Agent fault** (panic inside a decision): recoverable. In tournament
//!   mode the referee downgrades it to a timeout; in debug mode it is
//!   propagated so the fault surfaces with context.
//!
//! Timeouts and illegal moves are *not* errors: the referee recovers from
//! both locally with a random legal action and a `warn!` log line.

use thiserror::Error;

/// Errors that can abort a match.
#[derive(Debug, Error)]
pub enum GameError {
    /// A planet holds a negative ship count.
    #[error("malformed state: planet {planet} holds {ships} ships")]
    NegativeShips { planet: usize, ships: f64 },

    /// A planet holds more ships than its capacity allows.
    #[error("malformed state: planet {planet} holds {ships} ships over capacity {capacity}")]
    OverCapacity {
        planet: usize,
        ships: f64,
        capacity: u32,
    },

    /// Two in-flight fleets share an identifier.
    #[error("malformed state: duplicate fleet id {0}")]
    DuplicateFleetId(u64),

    /// A fleet references a planet index outside the galaxy.
    #[error("malformed state: fleet {fleet} targets unknown planet {planet}")]
    UnknownPlanet { fleet: u64, planet: usize },

    /// An agent failed during its decision (debug mode only).
    #[error("agent '{agent}' faulted during decision: {message}")]
    AgentFault { agent: String, message: String },
}

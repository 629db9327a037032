//! Entity model: players, planets, fleets, actions, and deterministic RNG.

pub mod action;
pub mod fleet;
pub mod planet;
pub mod player;
pub mod rng;

pub use action::Action;
pub use fleet::Fleet;
pub use planet::{Planet, PlanetInfo, KILL_RATE};
pub use player::{OwnerId, Player};
pub use rng::GameRng;

/// Converts a planet index into its display name (`0 -> "A"`, `1 -> "B"`, ...).
#[must_use]
pub fn planet_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

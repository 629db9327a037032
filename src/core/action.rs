//! Action representation: launch ships, or fortify.
//!
//! The wire shape is `{ships, source, destination}` with the sentinel pair
//! `(-1, -1)` and zero ships denoting the always-legal "no move" (fortify)
//! action. Referee-side legality checks compare actions by value, never by
//! identity, so the type derives full structural equality.

use serde::{Deserialize, Serialize};

use super::planet_letter;

/// Index sentinel used by the fortify action.
pub const NO_PLANET: i32 = -1;

/// One player move: send `ships` from `source` to `destination`, or fortify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// Whole ships to launch; zero for fortify.
    pub ships: u32,
    /// Source planet index, or `NO_PLANET`.
    pub source: i32,
    /// Destination planet index, or `NO_PLANET`.
    pub destination: i32,
}

impl Action {
    /// An attack launching `ships` from `source` towards `destination`.
    #[must_use]
    pub fn attack(ships: u32, source: usize, destination: usize) -> Self {
        Self {
            ships,
            source: source as i32,
            destination: destination as i32,
        }
    }

    /// The always-legal "no move" action.
    #[must_use]
    pub const fn fortify() -> Self {
        Self {
            ships: 0,
            source: NO_PLANET,
            destination: NO_PLANET,
        }
    }

    #[must_use]
    pub const fn is_fortify(&self) -> bool {
        self.ships == 0
    }

    /// Source planet index for a non-fortify action.
    #[must_use]
    pub fn source_index(&self) -> usize {
        self.source as usize
    }

    /// Destination planet index for a non-fortify action.
    #[must_use]
    pub fn destination_index(&self) -> usize {
        self.destination as usize
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_fortify() {
            write!(f, "(No move!)")
        } else {
            write!(
                f,
                "({} == {} ships ==> {})",
                planet_letter(self.source_index()),
                self.ships,
                planet_letter(self.destination_index())
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fortify_sentinel_shape() {
        let fortify = Action::fortify();
        assert!(fortify.is_fortify());
        assert_eq!(fortify.ships, 0);
        assert_eq!(fortify.source, NO_PLANET);
        assert_eq!(fortify.destination, NO_PLANET);
    }

    #[test]
    fn test_value_equality() {
        let a = Action::attack(4, 0, 2);
        let b = Action::attack(4, 0, 2);
        let c = Action::attack(2, 0, 2);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Action::fortify());
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::fortify().to_string(), "(No move!)");
        assert_eq!(Action::attack(8, 0, 2).to_string(), "(A == 8 ships ==> C)");
    }

    #[test]
    fn test_serialization() {
        let action = Action::attack(2, 1, 3);
        let json = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }
}

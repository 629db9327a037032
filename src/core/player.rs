//! Player identity.
//!
//! `OwnerId` is the fixed identity tag carried by planets and fleets.
//! `Neutral` owns unclaimed planets and never takes a turn; the "player to
//! move" index rotates among non-neutral players only.

use serde::{Deserialize, Serialize};

/// Owner tag for planets and fleets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerId {
    Red,
    Blue,
    Neutral,
}

impl OwnerId {
    /// All non-neutral tags, in seat order.
    pub const SEATS: [OwnerId; 2] = [OwnerId::Red, OwnerId::Blue];

    /// Display color used by visualizers.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            OwnerId::Red => "red",
            OwnerId::Blue => "blue",
            OwnerId::Neutral => "wheat",
        }
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwnerId::Red => write!(f, "RED"),
            OwnerId::Blue => write!(f, "BLUE"),
            OwnerId::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// A participant in the match: display name plus fixed identity tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub id: OwnerId,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>, id: OwnerId) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.id, self.name)
    }
}

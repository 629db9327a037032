//! Fleets in flight between planets.

use serde::{Deserialize, Serialize};

use super::player::OwnerId;

/// A fleet of whole ships travelling from a source planet to a destination.
///
/// The identifier is unique within one branch of exploration: the `Universe`
/// hands out monotonically increasing ids, and cloned branches continue
/// numbering independently. Equality and hashing use the id alone, so "the
/// same fleet" stays recognizable across successive engine states.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Fleet {
    /// Branch-unique identifier.
    pub id: u64,
    pub owner: OwnerId,
    /// Whole ships carried.
    pub ships: u32,
    /// Remaining travel time in rounds; a fleet at distance 0 is consumed
    /// by the destination at the end of the round.
    pub distance: u32,
    /// Index of the launch planet.
    pub source: usize,
    /// Index of the target planet.
    pub destination: usize,
}

impl Fleet {
    #[must_use]
    pub fn new(
        id: u64,
        owner: OwnerId,
        ships: u32,
        distance: u32,
        source: usize,
        destination: usize,
    ) -> Self {
        Self {
            id,
            owner,
            ships,
            distance,
            source,
            destination,
        }
    }
}

impl PartialEq for Fleet {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Fleet {}

impl std::hash::Hash for Fleet {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

//! Planets: immutable layout records plus mutable ownership and ship state.
//!
//! ## Fixed-point ship arithmetic
//!
//! Planet ship counts are carried as integer hundredths (`i64`, scaled
//! ×100) so that incremental production and combat never accumulate
//! floating-point error; every observable count is an exact multiple of
//! 0.01. Fleet ship counts stay whole integers.
//!
//! ## Sharing
//!
//! `PlanetInfo` never changes after galaxy generation, so every `Planet`
//! holds it behind an `Arc` and state clones share the record instead of
//! copying it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::fleet::Fleet;
use super::player::OwnerId;

/// Combat effectiveness of attacking ships, in percent.
///
/// The defender loses `KILL_RATE`% of the attacker's ship count; a capture
/// costs the attacker `defender / (KILL_RATE / 100)` ships. This asymmetric
/// exchange rate is the central balance rule of the game.
pub const KILL_RATE: i64 = 70;

/// Immutable planet record: identity, layout, and production profile.
///
/// Created once per match during galaxy generation and shared by handle
/// across every state derived from that layout.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanetInfo {
    /// Single-letter display name, unique within a galaxy.
    pub name: String,
    /// Grid position.
    pub position: (i32, i32),
    /// Maximum storable ships.
    pub capacity: u32,
    /// Production per round, in hundredths of a ship.
    production: u32,
}

impl PlanetInfo {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        position: (i32, i32),
        capacity: u32,
        production_hundredths: u32,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            capacity,
            production: production_hundredths,
        }
    }

    /// Production per round in whole-ship units.
    #[must_use]
    pub fn production(&self) -> f64 {
        f64::from(self.production) / 100.0
    }

    /// Production per round in hundredths.
    #[must_use]
    pub fn production_hundredths(&self) -> i64 {
        i64::from(self.production)
    }

    /// Ceil-Euclidean grid distance to `position`, in turns of travel.
    #[must_use]
    pub fn distance_to(&self, position: (i32, i32)) -> u32 {
        let dx = f64::from(self.position.0 - position.0);
        let dy = f64::from(self.position.1 - position.1);
        (dx * dx + dy * dy).sqrt().ceil() as u32
    }
}

// Identity is the name; position/capacity/production are attributes of it.
impl PartialEq for PlanetInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for PlanetInfo {}

impl std::hash::Hash for PlanetInfo {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for PlanetInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Info: name = {}, position = {:?}, capacity = {}, production = {}>",
            self.name,
            self.position,
            self.capacity,
            self.production()
        )
    }
}

/// A planet's mutable state: owner plus stored ships.
///
/// Owned exclusively by one `Universe` snapshot; cloning a state deep-copies
/// this struct while sharing the `PlanetInfo` handle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Planet {
    info: Arc<PlanetInfo>,
    owner: OwnerId,
    /// Stored ships in hundredths.
    ships: i64,
}

impl Planet {
    #[must_use]
    pub fn new(info: Arc<PlanetInfo>, owner: OwnerId, ships: u32) -> Self {
        Self {
            info,
            owner,
            ships: i64::from(ships) * 100,
        }
    }

    #[must_use]
    pub fn info(&self) -> &PlanetInfo {
        &self.info
    }

    /// Shared handle to the immutable record, for building derived states.
    #[must_use]
    pub fn shared_info(&self) -> Arc<PlanetInfo> {
        Arc::clone(&self.info)
    }

    #[must_use]
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Stored ships in whole-ship units (exact multiple of 0.01).
    #[must_use]
    pub fn ships(&self) -> f64 {
        self.ships as f64 / 100.0
    }

    /// Stored ships in hundredths.
    #[must_use]
    pub fn ships_hundredths(&self) -> i64 {
        self.ships
    }

    /// Reset the stored ship count to a whole number.
    pub fn set_ships(&mut self, ships: u32) {
        self.ships = i64::from(ships) * 100;
    }

    pub(crate) fn set_owner(&mut self, owner: OwnerId) {
        self.owner = owner;
    }

    /// Remove whole ships launched as a fleet.
    pub(crate) fn remove_ships(&mut self, ships: u32) {
        self.ships -= i64::from(ships) * 100;
    }

    /// Whether at least `ships` whole ships are stored here.
    #[must_use]
    pub fn can_launch(&self, ships: u32) -> bool {
        self.ships >= i64::from(ships) * 100
    }

    /// End-of-round production. Neutral planets never produce; owned planets
    /// grow by their production rate, clamped to capacity.
    pub fn produce_ships(&mut self) {
        if self.owner != OwnerId::Neutral {
            let cap = i64::from(self.info.capacity) * 100;
            self.ships = cap.min(self.ships + self.info.production_hundredths());
        }
    }

    /// Resolve a fleet reaching this planet: reinforcement if the owners
    /// match, combat otherwise.
    pub fn arrival(&mut self, fleet: &Fleet) {
        if fleet.owner == self.owner {
            let cap = i64::from(self.info.capacity) * 100;
            self.ships = cap.min(self.ships + i64::from(fleet.ships) * 100);
        } else {
            self.combat(fleet);
        }
    }

    /// Combat at the fixed kill rate. The defender loses 70% of the
    /// attacker's count; if that wipes the defense the planet flips to the
    /// attacker with `attacker - defender/0.70` survivors (clamped to
    /// `[0, capacity]`), all in hundredths arithmetic.
    fn combat(&mut self, fleet: &Fleet) {
        let defender_loss = KILL_RATE * i64::from(fleet.ships);
        let remaining_defender = self.ships - defender_loss;
        if remaining_defender < 0 {
            self.owner = fleet.owner;
            // ceil(100 * defender / KILL_RATE): the attacker pays for every
            // started hundredth of the exchange.
            let attacker_loss = (100 * self.ships + KILL_RATE - 1) / KILL_RATE;
            let alive = (100 * i64::from(fleet.ships) - attacker_loss).max(0);
            self.ships = alive.min(i64::from(self.info.capacity) * 100);
        } else {
            self.ships = remaining_defender;
        }
    }
}

// Structural equality over identity, owner, and exact ship count.
impl PartialEq for Planet {
    fn eq(&self, other: &Self) -> bool {
        self.info == other.info && self.owner == other.owner && self.ships == other.ships
    }
}

impl Eq for Planet {}

impl std::hash::Hash for Planet {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.info.hash(state);
        self.owner.hash(state);
        self.ships.hash(state);
    }
}

impl std::fmt::Display for Planet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Planet: owner: {}, ships: {}, {}>",
            self.owner,
            self.ships(),
            self.info
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(capacity: u32, production: u32) -> Arc<PlanetInfo> {
        Arc::new(PlanetInfo::new("A", (0, 0), capacity, production))
    }

    fn fleet(owner: OwnerId, ships: u32) -> Fleet {
        Fleet::new(0, owner, ships, 0, 0, 1)
    }

    #[test]
    fn test_distance_is_ceil_euclidean() {
        let a = PlanetInfo::new("A", (0, 0), 10, 100);
        assert_eq!(a.distance_to((1, 0)), 1);
        assert_eq!(a.distance_to((1, 1)), 2); // sqrt(2) -> 2
        assert_eq!(a.distance_to((3, 2)), 4); // sqrt(13) -> 4
        assert_eq!(a.distance_to((0, 0)), 0);
    }

    #[test]
    fn test_production_grows_and_clamps() {
        let mut planet = Planet::new(info(10, 130), OwnerId::Red, 9);
        planet.produce_ships();
        assert_eq!(planet.ships(), 10.0); // 9 + 1.30 clamped to capacity

        let mut planet = Planet::new(info(10, 40), OwnerId::Red, 5);
        planet.produce_ships();
        assert_eq!(planet.ships(), 5.40);
    }

    #[test]
    fn test_neutral_never_produces() {
        let mut planet = Planet::new(info(10, 100), OwnerId::Neutral, 4);
        planet.produce_ships();
        assert_eq!(planet.ships(), 4.0);
    }

    #[test]
    fn test_reinforcement_clamps_to_capacity() {
        let mut planet = Planet::new(info(10, 100), OwnerId::Red, 5);
        planet.arrival(&fleet(OwnerId::Red, 3));
        assert_eq!(planet.ships(), 8.0);
        assert_eq!(planet.owner(), OwnerId::Red);

        planet.arrival(&fleet(OwnerId::Red, 9));
        assert_eq!(planet.ships(), 10.0);
    }

    #[test]
    fn test_combat_planet_held() {
        // 8 attackers vs 10 defenders: loss 5.60 < 10, planet held at 4.40.
        let mut planet = Planet::new(info(12, 100), OwnerId::Blue, 10);
        planet.arrival(&fleet(OwnerId::Red, 8));
        assert_eq!(planet.owner(), OwnerId::Blue);
        assert_eq!(planet.ships(), 4.40);
    }

    #[test]
    fn test_combat_capture() {
        // 20 attackers vs 10 defenders: loss 14.00 > 10 -> capture with
        // min(12, 20 - 10/0.7) = 5.71 survivors.
        let mut planet = Planet::new(info(12, 100), OwnerId::Blue, 10);
        planet.arrival(&fleet(OwnerId::Red, 20));
        assert_eq!(planet.owner(), OwnerId::Red);
        assert_eq!(planet.ships(), 5.71);
    }

    #[test]
    fn test_combat_capture_clamps_to_capacity() {
        let mut planet = Planet::new(info(4, 100), OwnerId::Neutral, 1);
        planet.arrival(&fleet(OwnerId::Blue, 20));
        assert_eq!(planet.owner(), OwnerId::Blue);
        assert_eq!(planet.ships(), 4.0);
    }

    #[test]
    fn test_combat_survivors_never_negative() {
        // 2 attackers vs 1.30 defenders: loss 1.40 > 1.30 -> capture, but
        // 2 - 1.30/0.7 rounds below zero and must clamp to exactly zero.
        // Build the fractional defense via one production step at rate 0.30.
        let mut low = Planet::new(info(10, 30), OwnerId::Blue, 1);
        low.produce_ships();
        assert_eq!(low.ships(), 1.30);
        low.arrival(&fleet(OwnerId::Red, 2));
        assert_eq!(low.owner(), OwnerId::Red);
        assert!(low.ships() >= 0.0);
        assert_eq!(low.ships(), 0.14); // 2.00 - ceil(1.30/0.7)
    }

    #[test]
    fn test_planet_equality_is_structural() {
        let shared = info(10, 100);
        let a = Planet::new(Arc::clone(&shared), OwnerId::Red, 5);
        let b = Planet::new(Arc::clone(&shared), OwnerId::Red, 5);
        let c = Planet::new(shared, OwnerId::Blue, 5);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_info_identity_by_name() {
        let a = PlanetInfo::new("A", (0, 0), 10, 100);
        let also_a = PlanetInfo::new("A", (3, 2), 4, 40);
        let b = PlanetInfo::new("B", (0, 0), 10, 100);
        assert_eq!(a, also_a);
        assert_ne!(a, b);
    }
}

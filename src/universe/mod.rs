//! The transition engine: full board state, legal-move enumeration,
//! deterministic simulation, and terminal detection.
//!
//! ## Granularity
//!
//! State transitions are per-player-move granular, but the world itself
//! (production, fleet advancement, combat) updates as one synchronized
//! step only when the move index wraps back to the first player. All
//! actions within a round are therefore logically simultaneous with
//! respect to world state.
//!
//! ## Cloning discipline
//!
//! Exploration never mutates a shared state: `apply` clones, then mutates
//! the clone. Planets and fleets are deep-copied; the immutable
//! `PlanetInfo` records and the player list are shared by handle. The
//! branch RNG is forked on every `apply`, and the fleet-id counter is
//! copied forward, so sibling branches legitimately diverge in both.

pub mod genesis;

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::core::{Action, Fleet, GameRng, OwnerId, Planet, Player};
use crate::error::GameError;

pub use genesis::GalaxyConfig;

/// Fixed attack-size menu. Enumerating only these counts caps the
/// branching factor; agent heuristics are tuned against this exact
/// structure, so it is part of the ruleset, not a tunable.
pub const ATTACK_SIZES: [u32; 3] = [2, 4, 8];

/// Tolerance for the end-of-game material tie, in whole-ship units.
pub const EPSILON: f64 = 1e-7;

/// Game outcome relative to the state's *current player*.
///
/// Callers that need absolute seat indices (the referee) must translate;
/// the engine never does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Signed score: +1 win, 0 draw, -1 loss.
    #[must_use]
    pub const fn score(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Draw => 0.0,
            Outcome::Loss => -1.0,
        }
    }
}

/// The full game state.
///
/// Planet indices are stable for the whole game; the fleet set grows on
/// launch and shrinks on arrival; exactly one seat index is "to move".
#[derive(Clone, Debug)]
pub struct Universe {
    planets: Vec<Planet>,
    fleets: SmallVec<[Fleet; 8]>,
    players: Arc<Vec<Player>>,
    current_player: usize,
    fleet_counter: u64,
    remaining_turns: u32,
    rng: GameRng,
}

impl Universe {
    /// Generate a fresh galaxy with the default configuration.
    ///
    /// Planets start neutral and empty; call [`Universe::initialize`] to
    /// seed garrisons and home ownership before play.
    #[must_use]
    pub fn big_bang(player_names: &[&str], neutral_count: usize, seed: u64) -> Self {
        Self::big_bang_with(&GalaxyConfig::default(), player_names, neutral_count, seed)
    }

    /// Generate a fresh galaxy with an explicit configuration.
    #[must_use]
    pub fn big_bang_with(
        config: &GalaxyConfig,
        player_names: &[&str],
        neutral_count: usize,
        seed: u64,
    ) -> Self {
        assert!(
            player_names.len() <= OwnerId::SEATS.len(),
            "at most {} players supported",
            OwnerId::SEATS.len()
        );
        let players: Vec<Player> = player_names
            .iter()
            .zip(OwnerId::SEATS)
            .map(|(&name, id)| Player::new(name, id))
            .collect();
        let mut rng = GameRng::new(seed);
        let planets = genesis::generate_planets(config, players.len(), neutral_count, &mut rng);
        Self {
            planets,
            fleets: SmallVec::new(),
            players: Arc::new(players),
            current_player: 0,
            fleet_counter: 0,
            remaining_turns: config.max_turns,
            rng,
        }
    }

    /// Build a hand-crafted scenario: explicit planets, two seats in order,
    /// and a round budget. Ownership and garrisons are taken from the
    /// given planets as-is.
    #[must_use]
    pub fn custom(
        planets: Vec<Planet>,
        player_names: &[&str],
        max_turns: u32,
        seed: u64,
    ) -> Self {
        let players: Vec<Player> = player_names
            .iter()
            .zip(OwnerId::SEATS)
            .map(|(&name, id)| Player::new(name, id))
            .collect();
        Self {
            planets,
            fleets: SmallVec::new(),
            players: Arc::new(players),
            current_player: 0,
            fleet_counter: 0,
            remaining_turns: max_turns,
            rng: GameRng::new(seed),
        }
    }

    /// Seed the opening position: every planet garrisons up to its
    /// capacity, and the first planets are handed to the players in seat
    /// order.
    #[must_use]
    pub fn initialize(mut self) -> Self {
        for planet in &mut self.planets {
            let capacity = planet.info().capacity;
            planet.set_ships(capacity);
        }
        for (planet, player) in self.planets.iter_mut().zip(self.players.iter()) {
            planet.set_owner(player.id);
        }
        self
    }

    /// Rotate the seat order, so a series of games alternates who opens.
    pub fn rotate_players(&mut self) {
        let players = Arc::make_mut(&mut self.players);
        players.rotate_left(1);
    }

    // === Accessors ===

    #[must_use]
    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    #[must_use]
    pub fn fleets(&self) -> &[Fleet] {
        &self.fleets
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Seat index of the player to move.
    #[must_use]
    pub fn current_player(&self) -> usize {
        self.current_player
    }

    /// Identity tag of the player to move.
    #[must_use]
    pub fn current_player_id(&self) -> OwnerId {
        self.players[self.current_player].id
    }

    /// Rounds remaining before the game is scored on material.
    #[must_use]
    pub fn remaining_turns(&self) -> u32 {
        self.remaining_turns
    }

    // === Transition engine ===

    /// The full legal action set for the player to move, paired with the
    /// successor state each action produces.
    ///
    /// Never empty for a non-terminal state: the fortify action is always
    /// present. The list order is shuffled on every call, so callers must
    /// use it only for randomized tie-breaking, never for correctness.
    #[must_use]
    pub fn successors(&mut self) -> Vec<(Action, Universe)> {
        let actions = self.applicable_actions();
        let mut successors: Vec<(Action, Universe)> = actions
            .into_iter()
            .map(|action| {
                let next = self.apply(action);
                (action, next)
            })
            .collect();
        self.rng.shuffle(&mut successors);
        successors
    }

    /// Attack actions for every owned source, every size in
    /// [`ATTACK_SIZES`], and every other planet as destination — plus the
    /// fortify no-op.
    fn applicable_actions(&self) -> Vec<Action> {
        let mover = self.current_player_id();
        let sources: Vec<usize> = self
            .planets
            .iter()
            .enumerate()
            .filter(|(_, p)| p.owner() == mover)
            .map(|(i, _)| i)
            .collect();

        let mut actions = Vec::new();
        for &ships in &ATTACK_SIZES {
            for &source in &sources {
                if !self.planets[source].can_launch(ships) {
                    continue;
                }
                for destination in 0..self.planets.len() {
                    if destination != source {
                        actions.push(Action::attack(ships, source, destination));
                    }
                }
            }
        }
        actions.push(Action::fortify());
        actions
    }

    /// Apply one action, producing the successor state. Clones first; the
    /// original is never touched beyond advancing its RNG fork counter.
    fn apply(&mut self, action: Action) -> Universe {
        let mut next = self.clone();
        next.rng = self.rng.fork();

        if action.ships > 0 {
            let source = action.source_index();
            let destination = action.destination_index();
            let distance = next.planets[destination]
                .info()
                .distance_to(next.planets[source].info().position);
            let fleet = Fleet::new(
                next.fleet_counter,
                next.planets[source].owner(),
                action.ships,
                distance,
                source,
                destination,
            );
            next.fleet_counter += 1;
            next.planets[source].remove_ships(action.ships);
            next.fleets.push(fleet);
        }

        next.current_player += 1;
        if next.current_player == next.players.len() {
            next.end_of_round();
        }
        next
    }

    /// The synchronized world update: production everywhere, then every
    /// fleet either arrives (distance 0) or advances one step, then the
    /// round counter drops and the move index resets.
    fn end_of_round(&mut self) {
        for planet in &mut self.planets {
            planet.produce_ships();
        }

        let fleets = std::mem::take(&mut self.fleets);
        for mut fleet in fleets {
            if fleet.distance == 0 {
                self.planets[fleet.destination].arrival(&fleet);
            } else {
                fleet.distance -= 1;
                self.fleets.push(fleet);
            }
        }

        self.remaining_turns = self.remaining_turns.saturating_sub(1);
        self.current_player = 0;
    }

    /// Terminal detection, relative to the current player.
    ///
    /// - exactly one non-neutral owner holds ships: `Win`/`Loss`
    /// - round budget exhausted: material comparison, ties (within
    ///   [`EPSILON`]) are a `Draw`
    /// - otherwise the game continues (`None`)
    #[must_use]
    pub fn is_winner(&self) -> Option<Outcome> {
        let mut ships: FxHashMap<OwnerId, i64> = FxHashMap::default();
        for planet in &self.planets {
            *ships.entry(planet.owner()).or_insert(0) += planet.ships_hundredths();
        }
        for fleet in &self.fleets {
            *ships.entry(fleet.owner).or_insert(0) += i64::from(fleet.ships) * 100;
        }
        ships.remove(&OwnerId::Neutral);

        let me = self.current_player_id();
        if ships.len() == 1 {
            let (&owner, _) = ships.iter().next().expect("one entry");
            return Some(if owner == me { Outcome::Win } else { Outcome::Loss });
        }

        if self.remaining_turns == 0 {
            let mut totals: Vec<(OwnerId, i64)> = ships.into_iter().collect();
            totals.sort_by(|a, b| b.1.cmp(&a.1));
            match totals.as_slice() {
                [] => return Some(Outcome::Draw),
                [(leader, top), (_, runner_up), ..] => {
                    if ((top - runner_up).abs() as f64) / 100.0 < EPSILON {
                        return Some(Outcome::Draw);
                    }
                    return Some(if *leader == me { Outcome::Win } else { Outcome::Loss });
                }
                [(leader, _)] => {
                    return Some(if *leader == me { Outcome::Win } else { Outcome::Loss })
                }
            }
        }
        None
    }

    /// Check the engine invariants. A violation signals a bug in state
    /// construction and aborts the match; it is never silently repaired.
    pub fn validate(&self) -> Result<(), GameError> {
        for (index, planet) in self.planets.iter().enumerate() {
            let ships = planet.ships_hundredths();
            if ships < 0 {
                return Err(GameError::NegativeShips {
                    planet: index,
                    ships: planet.ships(),
                });
            }
            let capacity = planet.info().capacity;
            if ships > i64::from(capacity) * 100 {
                return Err(GameError::OverCapacity {
                    planet: index,
                    ships: planet.ships(),
                    capacity,
                });
            }
        }

        let mut seen = FxHashSet::default();
        for fleet in &self.fleets {
            if !seen.insert(fleet.id) {
                return Err(GameError::DuplicateFleetId(fleet.id));
            }
            if fleet.source >= self.planets.len() || fleet.destination >= self.planets.len() {
                return Err(GameError::UnknownPlanet {
                    fleet: fleet.id,
                    planet: fleet.source.max(fleet.destination),
                });
            }
        }
        Ok(())
    }
}

// Structural equality: two states are the same position regardless of how
// their branch RNGs or fleet counters got there.
impl PartialEq for Universe {
    fn eq(&self, other: &Self) -> bool {
        self.current_player == other.current_player
            && self.remaining_turns == other.remaining_turns
            && self.planets == other.planets
            && self.fleets == other.fleets
    }
}

impl Eq for Universe {}

impl std::hash::Hash for Universe {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.current_player.hash(state);
        self.remaining_turns.hash(state);
        self.planets.hash(state);
        for fleet in &self.fleets {
            fleet.hash(state);
        }
    }
}

impl std::fmt::Display for Universe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:*^49}", "")?;
        writeln!(f, "{: ^49}", "Planets")?;
        writeln!(
            f,
            "|{: <4}|{: <10}|{: ^7}|{: ^8}|{: ^10}|",
            "Name", "Owner", "Ships", "Capacity", "Production"
        )?;
        for planet in &self.planets {
            let info = planet.info();
            writeln!(
                f,
                "|{: <4}|{: <10}|{: ^7}|{: ^8}|{: ^10}|",
                info.name,
                planet.owner().to_string(),
                format!("{:.2}", planet.ships()),
                info.capacity,
                format!("{:.2}", info.production()),
            )?;
        }

        writeln!(f, "{: ^37}", "Fleets")?;
        writeln!(
            f,
            "|{: <7}|{: ^5}|{: ^8}|{: ^9}|",
            "Owner", "Ships", "Target", "Distance"
        )?;
        let mut fleets: Vec<&Fleet> = self.fleets.iter().collect();
        fleets.sort_by_key(|fleet| fleet.distance);
        for fleet in fleets {
            writeln!(
                f,
                "|{: <7}|{: ^5}|{: ^8}|{: ^9}|",
                fleet.owner.to_string(),
                fleet.ships,
                self.planets[fleet.destination].info().name,
                fleet.distance,
            )?;
        }

        let player = &self.players[self.current_player];
        writeln!(f, "Current Player: {player}")?;
        writeln!(f, "Remaining turns: {}", self.remaining_turns)
    }
}

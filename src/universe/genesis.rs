//! Galaxy generation ("big bang").
//!
//! One home planet is placed per player on a bounded integer grid; whole
//! layouts are rejected and re-rolled until every pairwise home distance
//! reaches the minimum separation. Neutral planets then land on distinct
//! positions with capacity and production drawn uniformly from fixed
//! ranges. Given a fixed seed the whole procedure is reproducible.

use std::sync::Arc;

use tracing::info;

use crate::core::{planet_letter, GameRng, OwnerId, Planet, PlanetInfo};

/// Tunable galaxy parameters. The defaults are the canonical ruleset and
/// what every agent heuristic is tuned against.
#[derive(Clone, Debug)]
pub struct GalaxyConfig {
    /// Grid width (positions 0..width).
    pub width: i32,
    /// Grid height (positions 0..height).
    pub height: i32,
    /// Half-open capacity range for neutral planets.
    pub capacity_range: (u32, u32),
    /// Half-open production range for neutral planets, hundredths/round.
    pub production_range: (u32, u32),
    /// Minimum pairwise ceil-Euclidean distance between home planets.
    pub min_home_distance: u32,
    /// Rounds played before the game is scored on material.
    pub max_turns: u32,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            width: 4,
            height: 3,
            capacity_range: (4, 12),
            production_range: (40, 130),
            min_home_distance: 4,
            max_turns: 200,
        }
    }
}

impl GalaxyConfig {
    /// Home planet capacity: two below the neutral maximum.
    #[must_use]
    pub fn home_capacity(&self) -> u32 {
        self.capacity_range.1 - 2
    }

    /// Home planet production: exactly one ship per round.
    pub const HOME_PRODUCTION: u32 = 100;
}

/// Generate the planet list for a fresh galaxy. All planets start neutral
/// with zero ships; `Universe::initialize` seeds ownership and garrisons.
pub(super) fn generate_planets(
    config: &GalaxyConfig,
    player_count: usize,
    neutral_count: usize,
    rng: &mut GameRng,
) -> Vec<Planet> {
    let mut planets: Vec<Planet>;

    // Rejection-sample whole home layouts until the separation holds.
    loop {
        planets = (0..player_count)
            .map(|i| {
                let position = (rng.gen_range(0..config.width), rng.gen_range(0..config.height));
                let info = PlanetInfo::new(
                    planet_letter(i).to_string(),
                    position,
                    config.home_capacity(),
                    GalaxyConfig::HOME_PRODUCTION,
                );
                Planet::new(Arc::new(info), OwnerId::Neutral, 0)
            })
            .collect();

        let spread_ok = planets.iter().enumerate().all(|(i, a)| {
            planets[i + 1..]
                .iter()
                .all(|b| a.info().distance_to(b.info().position) >= config.min_home_distance)
        });
        if spread_ok {
            break;
        }
    }

    for i in 0..neutral_count {
        // Two planets cannot share the exact same position.
        let position = loop {
            let candidate = (rng.gen_range(0..config.width), rng.gen_range(0..config.height));
            if planets.iter().all(|p| p.info().position != candidate) {
                break candidate;
            }
        };

        let capacity = rng.gen_range(config.capacity_range.0 as i32..config.capacity_range.1 as i32);
        let production =
            rng.gen_range(config.production_range.0 as i32..config.production_range.1 as i32);
        let info = PlanetInfo::new(
            planet_letter(player_count + i).to_string(),
            position,
            capacity as u32,
            production as u32,
        );
        planets.push(Planet::new(Arc::new(info), OwnerId::Neutral, 0));
    }

    info!("Big Bang!");
    for planet in &planets {
        info!(planet = %planet.info(), "placed");
    }

    planets
}

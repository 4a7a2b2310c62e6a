//! World construction from the historical templates

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

use crate::core::config::EngineConfig;
use crate::core::error::WorldError;
use crate::core::types::{CityId, FactionId, OfficerId};
use crate::state::{City, Faction, GameState, Officer, OfficerStats};
use crate::world::templates::{CITIES, FACTIONS, OFFICERS, ROADS};

/// Chance a subordinate officer starts away from their historical posting
pub const DISPLACEMENT_CHANCE: f64 = 0.25;

/// Range of the initial diplomatic relation between two factions
pub const INITIAL_RELATION_MIN: i8 = -20;
pub const INITIAL_RELATION_MAX: i8 = 10;

/// Build the year 208 campaign with `player_choice` as the human faction
///
/// The same seed always yields the same world.
pub fn init_world(player_choice: &str, seed: u64) -> Result<GameState, WorldError> {
    init_world_with_config(player_choice, seed, EngineConfig::default())
}

pub fn init_world_with_config(
    player_choice: &str,
    seed: u64,
    config: EngineConfig,
) -> Result<GameState, WorldError> {
    let player_index = FACTIONS
        .iter()
        .position(|name| *name == player_choice)
        .ok_or_else(|| WorldError::InvalidFaction(player_choice.to_string()))?;

    config
        .validate()
        .map_err(|err| WorldError::InvalidConfig(err.to_string()))?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = GameState::new(faction_id(player_index));
    state.config = config;

    let faction_ids: BTreeMap<&str, FactionId> = FACTIONS
        .iter()
        .enumerate()
        .map(|(i, name)| (*name, faction_id(i)))
        .collect();

    for (name, id) in &faction_ids {
        state.add_faction(Faction::new(*id, *name));
    }
    seed_relations(&mut state, &mut rng);

    let mut city_ids: BTreeMap<&str, CityId> = BTreeMap::new();
    for (i, template) in CITIES.iter().enumerate() {
        let Some(owner) = faction_ids.get(template.owner).copied() else {
            tracing::warn!("City template {} has unknown owner {}", template.name, template.owner);
            continue;
        };
        let id = CityId(i as u32);
        city_ids.insert(template.name, id);
        state.add_city(City {
            id,
            name: template.name.to_string(),
            owner,
            gold: template.gold,
            food: template.food,
            troops: template.troops,
            defense: template.defense,
            morale: template.morale,
            agriculture: template.agriculture,
            commerce: template.commerce,
            technology: template.technology,
            walls: template.walls,
        });
    }

    for (a, b) in ROADS {
        if let (Some(a), Some(b)) = (city_ids.get(a), city_ids.get(b)) {
            state.graph.add_edge(*a, *b);
        }
    }

    for (i, template) in OFFICERS.iter().enumerate() {
        let (Some(faction), Some(home)) = (
            faction_ids.get(template.faction).copied(),
            city_ids.get(template.city).copied(),
        ) else {
            tracing::warn!("Officer template {} references unknown data", template.name);
            continue;
        };

        let id = OfficerId(i as u32);
        let city = if template.ruler {
            home
        } else {
            starting_city(&state, faction, home, &mut rng)
        };

        let officer = Officer::new(
            id,
            template.name,
            Some(faction),
            OfficerStats::new(
                template.leadership,
                template.intelligence,
                template.politics,
                template.charisma,
            ),
            city,
        )
        .with_traits(template.traits)
        .with_loyalty(template.loyalty);
        state.add_officer(officer);

        if template.ruler {
            if let Some(f) = state.factions.get_mut(&faction) {
                f.ruler = Some(id);
            }
        }
    }

    tracing::info!(
        player = player_choice,
        seed,
        cities = state.cities.len(),
        officers = state.officers.len(),
        "World initialized"
    );

    Ok(state)
}

fn faction_id(index: usize) -> FactionId {
    FactionId(index as u32)
}

fn seed_relations(state: &mut GameState, rng: &mut ChaCha8Rng) {
    let ids: Vec<FactionId> = state.factions.keys().copied().collect();
    for &a in &ids {
        let relations: BTreeMap<FactionId, i8> = ids
            .iter()
            .map(|&b| {
                let value = if a == b {
                    0
                } else {
                    rng.gen_range(INITIAL_RELATION_MIN..=INITIAL_RELATION_MAX)
                };
                (b, value)
            })
            .collect();
        if let Some(faction) = state.factions.get_mut(&a) {
            faction.relations = relations;
        }
    }
}

/// Historical posting, or occasionally another city of the same faction
fn starting_city(state: &GameState, faction: FactionId, home: CityId, rng: &mut ChaCha8Rng) -> CityId {
    if !rng.gen_bool(DISPLACEMENT_CHANCE) {
        return home;
    }
    let holdings: Vec<CityId> = state.cities_of(faction).map(|c| c.id).collect();
    holdings.choose(rng).copied().unwrap_or(home)
}

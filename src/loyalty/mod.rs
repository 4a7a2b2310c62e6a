//! Loyalty & Defection
//!
//! Loyalty moves at two points only: after a completed assignment and
//! after a battle. Once per turn, low-loyalty officers of the player's
//! faction may defect to a neighboring enemy.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{CityId, FactionId, OfficerId};
use crate::state::{EventType, GameState, Officer};

pub const LOYALTY_GAIN_FROM_WORK: i32 = 1;
pub const LOYALTY_LOSS_FROM_EXHAUSTION: i32 = -2;
/// Energy at or below which a task counts as overwork
pub const EXHAUSTION_THRESHOLD: u8 = 10;

pub const VICTORY_LOYALTY_GAIN: i32 = 2;
pub const DEFEAT_LOYALTY_LOSS: i32 = -1;

/// Reward a completed task. Returns true if the officer was overworked.
///
/// The success bonus and the exhaustion penalty both apply in the same step.
pub fn apply_work_loyalty(officer: &mut Officer) -> bool {
    officer.adjust_loyalty(LOYALTY_GAIN_FROM_WORK);
    let overworked = officer.energy() <= EXHAUSTION_THRESHOLD;
    if overworked {
        officer.adjust_loyalty(LOYALTY_LOSS_FROM_EXHAUSTION);
    }
    overworked
}

/// Adjust loyalty of the officers present on each side of a battle
pub fn apply_battle_loyalty(state: &mut GameState, winners: &[OfficerId], losers: &[OfficerId]) {
    for id in winners {
        if let Some(officer) = state.officer_mut(*id) {
            officer.adjust_loyalty(VICTORY_LOYALTY_GAIN);
        }
    }
    for id in losers {
        if let Some(officer) = state.officer_mut(*id) {
            officer.adjust_loyalty(DEFEAT_LOYALTY_LOSS);
        }
    }
}

/// A completed defection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defection {
    pub officer: OfficerId,
    pub from: FactionId,
    pub to: FactionId,
    pub city: CityId,
}

/// Roll defection for every disloyal officer of the player's faction
///
/// Each officer below the threshold draws exactly one trial. A successful
/// trial only takes effect if a neighboring city is held by another faction.
pub fn check_defections<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> Vec<Defection> {
    let player = state.player;
    let threshold = state.config.loyalty.defection_threshold;
    let chance = state.config.loyalty.defection_chance;
    let new_loyalty = state.config.loyalty.defector_loyalty;

    // Config is public and may have been edited after validation
    if !(0.0..=1.0).contains(&chance) {
        tracing::warn!(chance, "Defection chance out of range, skipping defection checks");
        return Vec::new();
    }

    let at_risk: Vec<(OfficerId, CityId)> = state
        .officers_of(player)
        .filter(|o| o.loyalty() < threshold)
        .map(|o| (o.id, o.city))
        .collect();

    let mut defections = Vec::new();
    for (officer_id, city) in at_risk {
        if !rng.gen_bool(chance) {
            continue;
        }

        let enemy_cities: Vec<(CityId, FactionId)> = state
            .graph
            .neighbors(city)
            .filter_map(|n| state.owner_of(n).map(|owner| (n, owner)))
            .filter(|(_, owner)| *owner != player)
            .collect();

        let Some(&(dest, new_faction)) = enemy_cities.choose(rng) else {
            continue;
        };

        if let Some(officer) = state.officer_mut(officer_id) {
            officer.faction = Some(new_faction);
            officer.city = dest;
            officer.assignment = None;
            officer.set_loyalty(new_loyalty);
        }

        tracing::info!(officer = %officer_id, to = %new_faction, city = %dest, "Officer defected");
        state.log(EventType::OfficerDefected {
            officer: officer_id,
            from: player,
            to: new_faction,
            city: dest,
        });
        defections.push(Defection {
            officer: officer_id,
            from: player,
            to: new_faction,
            city: dest,
        });
    }

    defections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{City, Faction, OfficerStats};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SHU: FactionId = FactionId(0);
    const WEI: FactionId = FactionId(1);

    fn border_state(loyalty: u8) -> GameState {
        let mut state = GameState::new(SHU);
        state.add_faction(Faction::new(SHU, "Shu"));
        state.add_faction(Faction::new(WEI, "Wei"));
        state.add_city(City::new(CityId(0), "Hanzhong", SHU));
        state.add_city(City::new(CityId(1), "Xuchang", WEI));
        state.graph.add_edge(CityId(0), CityId(1));
        state.add_officer(
            Officer::new(OfficerId(0), "Waverer", Some(SHU), OfficerStats::new(50, 50, 50, 50), CityId(0))
                .with_loyalty(loyalty),
        );
        state
    }

    #[test]
    fn test_work_loyalty() {
        let mut officer = Officer::new(OfficerId(0), "A", None, OfficerStats::new(1, 1, 1, 1), CityId(0))
            .with_loyalty(50)
            .with_energy(50);
        assert!(!apply_work_loyalty(&mut officer));
        assert_eq!(officer.loyalty(), 51);

        officer.set_energy(EXHAUSTION_THRESHOLD);
        assert!(apply_work_loyalty(&mut officer));
        assert_eq!(officer.loyalty(), 50);
    }

    #[test]
    fn test_loyal_officers_never_defect() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..200 {
            let mut state = border_state(35);
            assert!(check_defections(&mut state, &mut rng).is_empty());
        }
    }

    #[test]
    fn test_no_enemy_neighbor_no_defection() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut state = border_state(0);
        state.city_mut(CityId(1)).unwrap().owner = SHU;
        for _ in 0..500 {
            assert!(check_defections(&mut state, &mut rng).is_empty());
        }
        assert_eq!(state.officer(OfficerId(0)).unwrap().faction, Some(SHU));
    }

    #[test]
    fn test_defection_reparents_officer() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut state = border_state(10);
        state.config.loyalty.defection_chance = 1.0;

        let defections = check_defections(&mut state, &mut rng);
        assert_eq!(defections.len(), 1);
        let officer = state.officer(OfficerId(0)).unwrap();
        assert_eq!(officer.faction, Some(WEI));
        assert_eq!(officer.city, CityId(1));
        assert_eq!(officer.loyalty(), 60);
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e.event_type, EventType::OfficerDefected { .. })));
    }

    #[test]
    fn test_out_of_range_chance_does_not_panic() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut state = border_state(0);
        for chance in [1.5, -0.2, f64::NAN] {
            state.config.loyalty.defection_chance = chance;
            assert!(check_defections(&mut state, &mut rng).is_empty());
        }
        assert_eq!(state.officer(OfficerId(0)).unwrap().faction, Some(SHU));
    }

    #[test]
    fn test_defection_rate_converges() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let template = border_state(20);
        let trials = 10_000;
        let mut defected = 0;
        for _ in 0..trials {
            let mut state = template.clone();
            defected += check_defections(&mut state, &mut rng).len();
        }
        let rate = defected as f64 / trials as f64;
        assert!((rate - 0.10).abs() < 0.015, "defection rate {rate}");
    }

    #[test]
    fn test_battle_loyalty() {
        let mut state = border_state(50);
        state.add_officer(
            Officer::new(OfficerId(1), "Other", Some(WEI), OfficerStats::new(50, 50, 50, 50), CityId(1))
                .with_loyalty(50),
        );
        apply_battle_loyalty(&mut state, &[OfficerId(0)], &[OfficerId(1)]);
        assert_eq!(state.officer(OfficerId(0)).unwrap().loyalty(), 52);
        assert_eq!(state.officer(OfficerId(1)).unwrap().loyalty(), 49);
    }
}

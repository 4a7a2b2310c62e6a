//! Property-based tests for campaign invariants

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use sango_engine::combat::{attack_power, defense_power};
use sango_engine::core::calendar::Season;
use sango_engine::economy::monthly::food_upkeep;
use sango_engine::economy::settle_city;
use sango_engine::state::{City, Faction, Officer, OfficerStats};
use sango_engine::{end_turn, init_world, resolve_battle, CityId, FactionId, GameState, OfficerId};

fn front(attackers: u32, defenders: u32, defense: u8, walls: u8, technology: u8) -> GameState {
    let mut state = GameState::new(FactionId(0));
    state.add_faction(Faction::new(FactionId(0), "Shu"));
    state.add_faction(Faction::new(FactionId(1), "Wei"));

    let mut source = City::new(CityId(0), "Hanzhong", FactionId(0));
    source.troops = attackers;
    source.technology = technology;
    let mut target = City::new(CityId(1), "Xuchang", FactionId(1));
    target.troops = defenders;
    target.defense = defense;
    target.walls = walls;

    state.add_city(source);
    state.add_city(target);
    state.graph.add_edge(CityId(0), CityId(1));
    state
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The stronger side always wins and ties go to the defender.
    #[test]
    fn prop_ownership_follows_power(
        attackers in 1u32..5000,
        defenders in 0u32..5000,
        defense in 0u8..=100,
        walls in 0u8..=100,
        technology in 0u8..=100,
        seed in any::<u64>()
    ) {
        let mut state = front(attackers, defenders, defense, walls, technology);
        let attack = attack_power(&state, CityId(0), attackers);
        let held = defense_power(&state, CityId(1));
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let report = resolve_battle(&mut state, CityId(0), CityId(1), attackers, &mut rng).unwrap();
        let owner = state.city(CityId(1)).unwrap().owner;

        if attack > held {
            prop_assert_eq!(owner, FactionId(0));
            prop_assert!(report.attacker_losses <= attackers);
        } else {
            prop_assert_eq!(owner, FactionId(1));
            prop_assert_eq!(state.city(CityId(0)).unwrap().troops, attackers - report.attacker_losses);
        }

        // Winner losses stay below the loser's whenever the loser had troops
        let (winner_losses, loser_losses, loser_troops) = if report.attacker_won() {
            (report.attacker_losses, report.defender_losses, defenders)
        } else {
            (report.defender_losses, report.attacker_losses, attackers)
        };
        if loser_troops > 0 {
            prop_assert!(winner_losses < loser_losses);
        }
    }

    /// Starvation removes troops one for one with the food shortfall.
    #[test]
    fn prop_starvation_is_linear(troops in 0u32..100_000, food in 0u32..2_000) {
        let mut city = City::new(CityId(0), "Hanzhong", FactionId(0));
        city.troops = troops;
        city.food = food;
        city.agriculture = 0;
        city.gold = u32::MAX / 2;

        let ledger = settle_city(&mut city, Season::Ordinary);
        let shortfall = food_upkeep(troops).saturating_sub(food);

        prop_assert_eq!(ledger.food_deficit, shortfall);
        prop_assert_eq!(ledger.starved, shortfall.min(troops));
        prop_assert_eq!(city.troops, troops - shortfall.min(troops));
        if shortfall > 0 {
            prop_assert_eq!(city.food, 0);
            prop_assert!(city.troops < troops);
        }
    }

    /// Energy and loyalty never leave [0, 100] whatever deltas are applied.
    #[test]
    fn prop_ratings_clamped(
        start_energy in 0u8..=100,
        start_loyalty in 0u8..=100,
        deltas in prop::collection::vec((-300i32..300, -300i32..300), 0..50)
    ) {
        let mut officer = Officer::new(OfficerId(0), "Jiang Wei", Some(FactionId(0)), OfficerStats::new(90, 90, 70, 80), CityId(0))
            .with_energy(start_energy)
            .with_loyalty(start_loyalty);
        for (energy, loyalty) in deltas {
            officer.adjust_energy(energy);
            officer.adjust_loyalty(loyalty);
            prop_assert!(officer.energy() <= 100);
            prop_assert!(officer.loyalty() <= 100);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// A full campaign never breaks the rating bounds or the map.
    #[test]
    fn prop_campaign_keeps_invariants(seed in any::<u64>(), faction in 0usize..3) {
        let name = ["Wei", "Shu", "Wu"][faction];
        let mut state = init_world(name, seed).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for _ in 0..36 {
            end_turn(&mut state, &mut rng);
            for officer in state.officers.values() {
                prop_assert!(officer.energy() <= 100);
                prop_assert!(officer.loyalty() <= 100);
            }
            for city in state.cities.values() {
                prop_assert!(city.morale <= 100);
                prop_assert!(state.factions.contains_key(&city.owner));
            }
        }
        prop_assert!(state.graph.is_symmetric());
    }
}

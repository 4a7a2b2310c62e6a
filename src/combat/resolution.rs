//! Battle resolution between two adjacent cities
//!
//! The outcome is a pure comparison of attack power against defense power.
//! The random source only draws casualty fractions inside fixed bounds.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::constants::*;
use crate::core::error::BattleError;
use crate::core::types::{CityId, FactionId, OfficerId, Trait};
use crate::loyalty;
use crate::state::{EventType, GameState};

/// Outcome of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// Attacker won and took the city
    AttackerVictory,
    /// Defender held (ties go to the defender)
    DefenderVictory,
}

/// Results of a battle resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub attacker_city: CityId,
    pub defender_city: CityId,
    pub attacker_faction: FactionId,
    pub defender_faction: FactionId,
    pub committed: u32,
    pub attack_power: f32,
    pub defense_power: f32,
    pub attacker_losses: u32,
    pub defender_losses: u32,
}

impl BattleReport {
    pub fn attacker_won(&self) -> bool {
        self.outcome == BattleOutcome::AttackerVictory
    }
}

/// Technology multiplier for a faction's attacks
pub fn tech_bonus(state: &GameState, faction: FactionId) -> f32 {
    let avg = state.average_technology(faction);
    (1.0 + (avg - TECH_BONUS_BASELINE) / TECH_BONUS_DIVISOR).max(1.0)
}

fn any_officer_with(state: &GameState, faction: FactionId, city: CityId, t: Trait) -> bool {
    state
        .officers_of(faction)
        .any(|o| o.city == city && o.has_trait(t))
}

/// Strength of `troops` marching out of `city`
pub fn attack_power(state: &GameState, city: CityId, troops: u32) -> f32 {
    let Some(owner) = state.owner_of(city) else {
        return 0.0;
    };
    let brave = if any_officer_with(state, owner, city, Trait::Brave) {
        BRAVE_ATTACK_BONUS
    } else {
        1.0
    };
    troops as f32 * tech_bonus(state, owner) * brave
}

/// Strength of the garrison holding `city`
pub fn defense_power(state: &GameState, city: CityId) -> f32 {
    let Some(c) = state.city(city) else {
        return 0.0;
    };
    let engineer = if any_officer_with(state, c.owner, city, Trait::Engineer) {
        ENGINEER_DEFENSE_BONUS
    } else {
        1.0
    };
    c.troops as f32 * c.defense_multiplier() * engineer
}

/// Casualties for (winner, loser) given their troop counts and power ratio
///
/// The loser always loses strictly more troops than the winner unless the
/// loser had no troops at all.
pub fn calculate_casualties<R: Rng + ?Sized>(
    winner_troops: u32,
    loser_troops: u32,
    ratio: f32,
    rng: &mut R,
) -> (u32, u32) {
    let ratio = ratio.max(1.0);

    let loser_frac = (rng.gen_range(LOSER_CASUALTIES_MIN..=LOSER_CASUALTIES_MAX)
        * ratio.min(MAX_RATIO_SCALE))
    .min(1.0);
    let winner_frac = rng.gen_range(WINNER_CASUALTIES_MIN..=WINNER_CASUALTIES_MAX) / ratio;

    let loser_losses = ((loser_troops as f32 * loser_frac).ceil() as u32).min(loser_troops);
    let winner_losses = ((winner_troops as f32 * winner_frac).round() as u32)
        .min(winner_troops)
        .min(loser_losses.saturating_sub(1));

    (winner_losses, loser_losses)
}

fn validate(state: &GameState, from: CityId, to: CityId, troops: u32) -> Result<(FactionId, FactionId), BattleError> {
    let source = state.city(from).ok_or(BattleError::UnknownCity(from))?;
    let target = state.city(to).ok_or(BattleError::UnknownCity(to))?;

    if !state.graph.are_adjacent(from, to) {
        return Err(BattleError::NotAdjacent { from, to });
    }
    if source.owner == target.owner {
        return Err(BattleError::SameFaction {
            from,
            to,
            faction: source.owner,
        });
    }
    if troops == 0 || troops > source.troops {
        return Err(BattleError::InsufficientTroops {
            city: from,
            requested: troops,
            available: source.troops,
        });
    }

    Ok((source.owner, target.owner))
}

/// Resolve `troops` from `from` attacking the adjacent enemy city `to`
///
/// On victory the surviving attackers garrison the captured city and every
/// defending officer stationed there passes to the conqueror. On defeat the
/// survivors return home.
pub fn resolve_battle<R: Rng + ?Sized>(
    state: &mut GameState,
    from: CityId,
    to: CityId,
    troops: u32,
    rng: &mut R,
) -> Result<BattleReport, BattleError> {
    let (attacker_faction, defender_faction) = validate(state, from, to, troops)?;

    let attack = attack_power(state, from, troops);
    let defense = defense_power(state, to);
    let attacker_won = attack > defense;
    let defender_troops = state.city(to).map_or(0, |c| c.troops);

    let (attacker_losses, defender_losses) = if attacker_won {
        calculate_casualties(troops, defender_troops, attack / defense.max(1.0), rng)
    } else {
        let (w, l) = calculate_casualties(defender_troops, troops, defense / attack.max(1.0), rng);
        (l, w)
    };

    let attacking_officers = state.officers_in_city(attacker_faction, from);
    let defending_officers = state.officers_in_city(defender_faction, to);
    let survivors = troops - attacker_losses;

    if let Some(source) = state.city_mut(from) {
        source.troops -= troops;
        if attacker_won {
            source.adjust_morale(VICTORY_MORALE_GAIN);
        } else {
            source.troops += survivors;
            source.adjust_morale(DEFEAT_MORALE_LOSS);
        }
    }

    if let Some(target) = state.city_mut(to) {
        if attacker_won {
            target.owner = attacker_faction;
            target.troops = survivors;
            target.defense = CONQUERED_DEFENSE;
            target.morale = CONQUERED_MORALE;
        } else {
            target.troops -= defender_losses;
            target.adjust_morale(DEFENDER_VICTORY_MORALE_GAIN);
        }
    }

    if attacker_won {
        loyalty::apply_battle_loyalty(state, &attacking_officers, &defending_officers);
        transfer_officers(state, &defending_officers, attacker_faction);
    } else {
        loyalty::apply_battle_loyalty(state, &defending_officers, &attacking_officers);
    }

    let report = BattleReport {
        outcome: if attacker_won {
            BattleOutcome::AttackerVictory
        } else {
            BattleOutcome::DefenderVictory
        },
        attacker_city: from,
        defender_city: to,
        attacker_faction,
        defender_faction,
        committed: troops,
        attack_power: attack,
        defense_power: defense,
        attacker_losses,
        defender_losses,
    };

    tracing::info!(
        from = %from,
        to = %to,
        committed = troops,
        attack,
        defense,
        attacker_won,
        attacker_losses,
        defender_losses,
        "Battle resolved"
    );

    state.log(EventType::BattleFought {
        attacker: from,
        defender: to,
        attacker_won,
        casualties: (attacker_losses, defender_losses),
    });
    if attacker_won {
        state.log(EventType::CityCaptured {
            city: to,
            from: defender_faction,
            to: attacker_faction,
        });
        if state.is_eliminated(defender_faction) {
            tracing::info!(faction = %defender_faction, "Faction eliminated");
            state.log(EventType::FactionEliminated {
                faction: defender_faction,
            });
        }
    }

    Ok(report)
}

/// Officers stationed in a captured city now serve its new owner
fn transfer_officers(state: &mut GameState, officers: &[OfficerId], new_owner: FactionId) {
    for id in officers {
        if let Some(officer) = state.officer_mut(*id) {
            officer.faction = Some(new_owner);
            officer.assignment = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{City, Faction, Officer, OfficerStats};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SHU: FactionId = FactionId(0);
    const WEI: FactionId = FactionId(1);
    const HANZHONG: CityId = CityId(0);
    const LUOYANG: CityId = CityId(1);
    const CHENGDU: CityId = CityId(2);

    /// Hanzhong (Shu) borders Luoyang (Wei); Chengdu (Shu) only borders Hanzhong
    fn front(attackers: u32, defenders: u32, defense: u8) -> GameState {
        let mut state = GameState::new(SHU);
        state.add_faction(Faction::new(SHU, "Shu"));
        state.add_faction(Faction::new(WEI, "Wei"));

        let mut hanzhong = City::new(HANZHONG, "Hanzhong", SHU);
        hanzhong.troops = attackers;
        hanzhong.technology = 50;
        let mut luoyang = City::new(LUOYANG, "Luoyang", WEI);
        luoyang.troops = defenders;
        luoyang.defense = defense;
        luoyang.walls = 0;
        let mut chengdu = City::new(CHENGDU, "Chengdu", SHU);
        chengdu.technology = 50;

        state.add_city(hanzhong);
        state.add_city(luoyang);
        state.add_city(chengdu);
        state.graph.add_edge(HANZHONG, LUOYANG);
        state.graph.add_edge(HANZHONG, CHENGDU);
        state
    }

    fn officer(id: u32, faction: FactionId, city: CityId, traits: &[Trait]) -> Officer {
        Officer::new(OfficerId(id), format!("O{id}"), Some(faction), OfficerStats::new(70, 70, 70, 70), city)
            .with_traits(traits)
            .with_loyalty(50)
    }

    #[test]
    fn test_validation_errors() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut state = front(1000, 800, 50);
        let before = state.clone();

        assert_eq!(
            resolve_battle(&mut state, CHENGDU, LUOYANG, 10, &mut rng),
            Err(BattleError::NotAdjacent { from: CHENGDU, to: LUOYANG })
        );
        assert!(matches!(
            resolve_battle(&mut state, HANZHONG, CHENGDU, 10, &mut rng),
            Err(BattleError::SameFaction { .. })
        ));
        assert!(matches!(
            resolve_battle(&mut state, HANZHONG, LUOYANG, 1001, &mut rng),
            Err(BattleError::InsufficientTroops { .. })
        ));
        assert!(matches!(
            resolve_battle(&mut state, HANZHONG, LUOYANG, 0, &mut rng),
            Err(BattleError::InsufficientTroops { .. })
        ));
        assert_eq!(
            resolve_battle(&mut state, HANZHONG, CityId(9), 10, &mut rng),
            Err(BattleError::UnknownCity(CityId(9)))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_no_tech_bonus_at_baseline() {
        let state = front(1000, 800, 50);
        assert_eq!(tech_bonus(&state, SHU), 1.0);
        assert_eq!(attack_power(&state, HANZHONG, 1000), 1000.0);
        assert!((defense_power(&state, LUOYANG) - 1200.0).abs() < 1e-3);
    }

    #[test]
    fn test_fortified_defender_holds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut state = front(1000, 800, 50);
        state.add_officer(officer(0, SHU, HANZHONG, &[]));
        state.add_officer(officer(1, WEI, LUOYANG, &[]));
        let report = resolve_battle(&mut state, HANZHONG, LUOYANG, 1000, &mut rng).unwrap();

        assert_eq!(report.outcome, BattleOutcome::DefenderVictory);
        assert!(report.attacker_losses > report.defender_losses);
        assert!(report.attacker_losses >= 300 && report.attacker_losses <= 660);
        assert_eq!(state.city(LUOYANG).unwrap().owner, WEI);
        assert_eq!(state.city(HANZHONG).unwrap().troops, 1000 - report.attacker_losses);
        assert_eq!(state.city(LUOYANG).unwrap().troops, 800 - report.defender_losses);

        // Defenders who held gain loyalty, the repulsed attackers lose some
        let attacker = state.officer(OfficerId(0)).unwrap();
        assert_eq!(attacker.loyalty(), 49);
        assert_eq!(attacker.faction, Some(SHU));
        let defender = state.officer(OfficerId(1)).unwrap();
        assert_eq!(defender.loyalty(), 52);
        assert_eq!(defender.faction, Some(WEI));
    }

    #[test]
    fn test_same_seed_same_battle() {
        let mut a = front(1000, 800, 50);
        let mut b = front(1000, 800, 50);
        let ra = resolve_battle(&mut a, HANZHONG, LUOYANG, 1000, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        let rb = resolve_battle(&mut b, HANZHONG, LUOYANG, 1000, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        assert_eq!(ra, rb);
        assert_eq!(a, b);
    }

    #[test]
    fn test_conquest_transfers_city_and_officers() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut state = front(1000, 200, 0);
        state.add_officer(officer(0, SHU, HANZHONG, &[Trait::Brave]));
        state.add_officer(officer(1, WEI, LUOYANG, &[]));

        let report = resolve_battle(&mut state, HANZHONG, LUOYANG, 800, &mut rng).unwrap();
        assert!(report.attacker_won());
        assert!(report.defender_losses > report.attacker_losses);

        let luoyang = state.city(LUOYANG).unwrap();
        assert_eq!(luoyang.owner, SHU);
        assert_eq!(luoyang.troops, 800 - report.attacker_losses);
        assert_eq!(luoyang.defense, CONQUERED_DEFENSE);
        assert_eq!(state.city(HANZHONG).unwrap().troops, 200);

        let winner = state.officer(OfficerId(0)).unwrap();
        assert_eq!(winner.loyalty(), 52);
        let captured = state.officer(OfficerId(1)).unwrap();
        assert_eq!(captured.faction, Some(SHU));
        assert_eq!(captured.loyalty(), 49);

        assert!(state.is_eliminated(WEI));
        assert!(state
            .events
            .iter()
            .any(|e| e.event_type == EventType::FactionEliminated { faction: WEI }));
    }

    #[test]
    fn test_trait_bonuses() {
        let mut state = front(1000, 800, 50);
        state.add_officer(officer(0, SHU, HANZHONG, &[Trait::Brave]));
        state.add_officer(officer(1, WEI, LUOYANG, &[Trait::Engineer]));
        // Brave officer in another city does not help
        state.add_officer(officer(2, SHU, CHENGDU, &[Trait::Brave]));

        assert!((attack_power(&state, HANZHONG, 1000) - 1080.0).abs() < 1e-3);
        assert!((defense_power(&state, LUOYANG) - 1296.0).abs() < 1e-2);
        assert!((attack_power(&state, CHENGDU, 100) - 108.0).abs() < 1e-3);
    }

    #[test]
    fn test_casualties_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..1000 {
            let (w, l) = calculate_casualties(1000, 800, 1.3, &mut rng);
            assert!(w < l);
            assert!(l <= 800);
        }
        let (w, l) = calculate_casualties(500, 0, 100.0, &mut rng);
        assert_eq!((w, l), (0, 0));
    }

    #[test]
    fn test_empty_city_falls() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = front(100, 0, 90);
        let report = resolve_battle(&mut state, HANZHONG, LUOYANG, 1, &mut rng).unwrap();
        assert!(report.attacker_won());
        assert_eq!(report.attacker_losses, 0);
        assert_eq!(state.city(LUOYANG).unwrap().troops, 1);
    }
}

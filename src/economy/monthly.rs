//! Monthly income, upkeep, starvation and desertion

use serde::{Deserialize, Serialize};

use crate::core::calendar::Season;
use crate::core::types::CityId;
use crate::economy::constants::*;
use crate::state::{City, EventType, GameState};

/// One city's books for the month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityLedger {
    pub city: Option<CityId>,
    pub gold_income: u32,
    pub food_income: u32,
    pub gold_upkeep: u32,
    pub food_upkeep: u32,
    /// Food that could not be paid
    pub food_deficit: u32,
    /// Gold that could not be paid
    pub gold_deficit: u32,
    pub starved: u32,
    pub deserted: u32,
}

pub fn gold_income(city: &City, season: Season) -> u32 {
    let commerce = u32::from(city.commerce);
    match season {
        Season::Taxation => commerce * TAX_MULTIPLIER,
        _ => BASE_GOLD_INCOME + commerce / COMMERCE_INCOME_DIVISOR,
    }
}

pub fn food_income(city: &City, season: Season) -> u32 {
    let agriculture = u32::from(city.agriculture);
    match season {
        Season::Harvest => agriculture * HARVEST_MULTIPLIER,
        _ => agriculture / AGRICULTURE_INCOME_DIVISOR,
    }
}

pub fn food_upkeep(troops: u32) -> u32 {
    (u64::from(troops) * FOOD_UPKEEP_PER_100_TROOPS / 100) as u32
}

pub fn gold_upkeep(troops: u32) -> u32 {
    troops / GOLD_UPKEEP_DIVISOR
}

/// Run one month of income and upkeep for a single city
///
/// Balances never go negative: whatever cannot be paid is taken out of the
/// garrison at a fixed number of troops per missing unit.
pub fn settle_city(city: &mut City, season: Season) -> CityLedger {
    let troops = city.troops;
    let mut ledger = CityLedger {
        city: Some(city.id),
        gold_income: gold_income(city, season),
        food_income: food_income(city, season),
        gold_upkeep: gold_upkeep(troops),
        food_upkeep: food_upkeep(troops),
        ..CityLedger::default()
    };

    let food = city.food.saturating_add(ledger.food_income);
    if food >= ledger.food_upkeep {
        city.food = food - ledger.food_upkeep;
    } else {
        ledger.food_deficit = ledger.food_upkeep - food;
        ledger.starved = ledger
            .food_deficit
            .saturating_mul(STARVATION_TROOPS_PER_FOOD)
            .min(city.troops);
        city.food = 0;
        city.troops -= ledger.starved;
        city.adjust_morale(STARVATION_MORALE_LOSS);
    }

    let gold = city.gold.saturating_add(ledger.gold_income);
    if gold >= ledger.gold_upkeep {
        city.gold = gold - ledger.gold_upkeep;
    } else {
        ledger.gold_deficit = ledger.gold_upkeep - gold;
        ledger.deserted = ledger
            .gold_deficit
            .saturating_mul(DESERTION_TROOPS_PER_GOLD)
            .min(city.troops);
        city.gold = 0;
        city.troops -= ledger.deserted;
        city.adjust_morale(DESERTION_MORALE_LOSS);
    }

    ledger
}

/// Settle every city for the current month
pub fn process_monthly_economy(state: &mut GameState) -> Vec<CityLedger> {
    let season = state.calendar.season();
    let ledgers: Vec<CityLedger> = state
        .cities
        .values_mut()
        .map(|city| settle_city(city, season))
        .collect();

    for ledger in &ledgers {
        let Some(city) = ledger.city else { continue };

        match season {
            Season::Taxation => state.log(EventType::Taxation {
                city,
                gold: ledger.gold_income,
            }),
            Season::Harvest => state.log(EventType::Harvest {
                city,
                food: ledger.food_income,
            }),
            Season::Ordinary => {}
        }

        if ledger.starved > 0 || ledger.food_deficit > 0 {
            tracing::info!(city = %city, troops_lost = ledger.starved, "Starvation");
            state.log(EventType::Starvation {
                city,
                deficit: ledger.food_deficit,
                troops_lost: ledger.starved,
            });
        }
        if ledger.deserted > 0 || ledger.gold_deficit > 0 {
            tracing::info!(city = %city, troops_lost = ledger.deserted, "Desertion");
            state.log(EventType::Desertion {
                city,
                deficit: ledger.gold_deficit,
                troops_lost: ledger.deserted,
            });
        }
    }

    ledgers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FactionId;

    fn city() -> City {
        City::new(CityId(0), "Test", FactionId(0))
    }

    #[test]
    fn test_ordinary_month() {
        let mut c = city();
        c.gold = 500;
        c.food = 800;
        c.troops = 300;
        c.commerce = 50;
        c.agriculture = 50;

        let ledger = settle_city(&mut c, Season::Ordinary);
        assert_eq!(ledger.gold_income, 20);
        assert_eq!(ledger.food_income, 10);
        assert_eq!(ledger.food_upkeep, 36);
        assert_eq!(ledger.gold_upkeep, 15);
        assert_eq!(c.gold, 505);
        assert_eq!(c.food, 774);
        assert_eq!(c.troops, 300);
    }

    #[test]
    fn test_tax_and_harvest_months() {
        let mut c = city();
        c.commerce = 60;
        c.agriculture = 70;
        assert_eq!(gold_income(&c, Season::Taxation), 300);
        assert_eq!(food_income(&c, Season::Harvest), 350);
        assert_eq!(gold_income(&c, Season::Harvest), 22);
        assert_eq!(food_income(&c, Season::Taxation), 14);
    }

    #[test]
    fn test_starvation_is_linear_in_deficit() {
        let mut c = city();
        c.agriculture = 0;
        c.troops = 1000;
        c.food = 20;
        c.morale = 60;

        let ledger = settle_city(&mut c, Season::Ordinary);
        // Upkeep 120, 20 in the granary -> 100 missing
        assert_eq!(ledger.food_deficit, 100);
        assert_eq!(ledger.starved, 100);
        assert_eq!(c.troops, 900);
        assert_eq!(c.food, 0);
        assert_eq!(c.morale, 50);
    }

    #[test]
    fn test_desertion_when_treasury_empty() {
        let mut c = city();
        c.gold = 0;
        c.commerce = 0;
        c.troops = 400;
        c.food = 10_000;

        let ledger = settle_city(&mut c, Season::Ordinary);
        // Upkeep 20 gold against 10 base income
        assert_eq!(ledger.gold_deficit, 10);
        assert_eq!(ledger.deserted, 10);
        assert_eq!(c.gold, 0);
        assert_eq!(c.troops, 390);
    }

    #[test]
    fn test_economy_logs_seasonal_events() {
        let mut state = GameState::new(FactionId(0));
        state.add_city(city());
        process_monthly_economy(&mut state);
        // Calendar starts in January
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e.event_type, EventType::Taxation { .. })));
    }
}

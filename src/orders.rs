//! Player orders that are neither tasks nor turn processing
//!
//! Relocating officers between a faction's own cities, and marching troops
//! along a road. A march into an enemy city is an attack.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::{resolve_battle, BattleReport};
use crate::core::error::{BattleError, CommandError};
use crate::core::types::{CityId, OfficerId};
use crate::state::{EventType, GameState};

/// Result of a march order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarchOutcome {
    /// Troops joined a friendly garrison
    Reinforced { from: CityId, to: CityId, troops: u32 },
    /// Troops attacked an enemy city
    Battle(BattleReport),
}

/// Relocate an officer to any city its faction holds
///
/// A queued task is dropped since it was bound to the old location.
/// Moving to the city the officer already occupies is a no-op.
pub fn move_officer(
    state: &mut GameState,
    officer_id: OfficerId,
    destination: CityId,
) -> Result<(), CommandError> {
    let officer = state
        .officer(officer_id)
        .ok_or(CommandError::UnknownOfficer(officer_id))?;
    let city = state
        .city(destination)
        .ok_or(CommandError::UnknownCity(destination))?;
    if officer.faction != Some(city.owner) {
        return Err(CommandError::NotOwned { city: destination });
    }
    let origin = officer.city;
    if origin == destination {
        return Ok(());
    }

    let mut cancelled = false;
    if let Some(officer) = state.officer_mut(officer_id) {
        cancelled = officer.assignment.take().is_some();
        officer.city = destination;
    }
    if cancelled {
        state.log(EventType::AssignmentCancelled { officer: officer_id });
    }
    state.log(EventType::OfficerMoved {
        officer: officer_id,
        from: origin,
        to: destination,
    });
    Ok(())
}

/// Send `troops` from `from` to the adjacent city `to`
pub fn march<R: Rng + ?Sized>(
    state: &mut GameState,
    from: CityId,
    to: CityId,
    troops: u32,
    rng: &mut R,
) -> Result<MarchOutcome, CommandError> {
    let source = state.city(from).ok_or(CommandError::UnknownCity(from))?;
    let target = state.city(to).ok_or(CommandError::UnknownCity(to))?;

    if source.owner != target.owner {
        return Ok(MarchOutcome::Battle(resolve_battle(state, from, to, troops, rng)?));
    }

    if !state.graph.are_adjacent(from, to) {
        return Err(BattleError::NotAdjacent { from, to }.into());
    }
    if troops == 0 || troops > source.troops {
        return Err(BattleError::InsufficientTroops {
            city: from,
            requested: troops,
            available: source.troops,
        }
        .into());
    }

    if let Some(source) = state.city_mut(from) {
        source.troops -= troops;
    }
    if let Some(target) = state.city_mut(to) {
        target.troops = target.troops.saturating_add(troops);
    }
    state.log(EventType::TroopsMarched { from, to, troops });
    Ok(MarchOutcome::Reinforced { from, to, troops })
}

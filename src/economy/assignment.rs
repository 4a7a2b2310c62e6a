//! Officer assignments
//!
//! `apply_assignment` performs a task immediately. `assign_task` only
//! validates and queues it; the queue is drained by `process_assignments`
//! at the start of the next turn end.

use serde::{Deserialize, Serialize};

use crate::core::error::{AssignmentError, CommandError};
use crate::core::types::{trait_multiplier, CityId, OfficerId, TaskKind};
use crate::economy::constants::*;
use crate::loyalty;
use crate::state::{Assignment, City, Development, EventType, GameState, Officer};

/// What a completed task did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    pub officer: OfficerId,
    pub task: TaskKind,
    pub city: CityId,
    /// Development points or troops actually added to the city
    pub gain: u32,
    pub energy_after: u8,
    pub loyalty_after: u8,
    pub overworked: bool,
}

/// Development track a task raises, if any
pub fn development_track(task: TaskKind) -> Option<Development> {
    match task {
        TaskKind::Farm => Some(Development::Agriculture),
        TaskKind::Trade => Some(Development::Commerce),
        TaskKind::Research => Some(Development::Technology),
        TaskKind::Fortify => Some(Development::Walls),
        TaskKind::Train | TaskKind::Recruit => None,
    }
}

/// Raw output of a task before city caps are applied
pub fn task_output(officer: &Officer, task: TaskKind) -> u32 {
    let stat = f32::from(officer.stat(task.governing_stat()));
    let mult = trait_multiplier(task, &officer.traits);

    let base = match task {
        TaskKind::Farm | TaskKind::Trade | TaskKind::Research | TaskKind::Fortify => {
            stat * DEVELOPMENT_GAIN_PER_STAT
        }
        TaskKind::Train => stat * TROOPS_PER_LEADERSHIP,
        TaskKind::Recruit => RECRUIT_BASE_TROOPS as f32 + stat / 2.0,
    };

    (base * mult).round() as u32
}

/// Check every precondition of a task without touching the state
pub fn validate_assignment(
    state: &GameState,
    officer_id: OfficerId,
    task: TaskKind,
    city_id: CityId,
) -> Result<(), AssignmentError> {
    let officer = state
        .officer(officer_id)
        .ok_or(AssignmentError::UnknownOfficer(officer_id))?;

    if officer.assignment.is_some() {
        return Err(AssignmentError::OfficerBusy(officer_id));
    }

    let invalid = |reason| AssignmentError::InvalidTarget {
        officer: officer_id,
        city: city_id,
        reason,
    };

    let city = state.city(city_id).ok_or_else(|| invalid("city does not exist"))?;
    if officer.city != city_id {
        return Err(invalid("officer is not stationed there"));
    }
    if officer.faction != Some(city.owner) {
        return Err(invalid("city is not held by the officer's faction"));
    }

    let required = task.energy_cost();
    if officer.energy() < required {
        return Err(AssignmentError::InsufficientEnergy {
            officer: officer_id,
            task,
            required,
            available: officer.energy(),
        });
    }

    if task == TaskKind::Recruit && !can_afford_recruit(city) {
        return Err(AssignmentError::InsufficientFunds {
            city: city_id,
            task,
            gold: RECRUIT_COST_GOLD,
            food: RECRUIT_COST_FOOD,
        });
    }

    Ok(())
}

pub fn can_afford_recruit(city: &City) -> bool {
    city.gold >= RECRUIT_COST_GOLD && city.food >= RECRUIT_COST_FOOD
}

/// Perform a task now: spend energy, improve the city, adjust loyalty
pub fn apply_assignment(
    state: &mut GameState,
    officer_id: OfficerId,
    task: TaskKind,
    city_id: CityId,
) -> Result<AssignmentOutcome, AssignmentError> {
    validate_assignment(state, officer_id, task, city_id)?;

    let output = match state.officer(officer_id) {
        Some(officer) => task_output(officer, task),
        None => return Err(AssignmentError::UnknownOfficer(officer_id)),
    };

    let gain = match state.city_mut(city_id) {
        Some(city) => improve_city(city, task, output),
        None => {
            return Err(AssignmentError::InvalidTarget {
                officer: officer_id,
                city: city_id,
                reason: "city does not exist",
            })
        }
    };

    let Some(officer) = state.officer_mut(officer_id) else {
        return Err(AssignmentError::UnknownOfficer(officer_id));
    };
    officer.adjust_energy(-i32::from(task.energy_cost()));
    let overworked = loyalty::apply_work_loyalty(officer);

    let outcome = AssignmentOutcome {
        officer: officer_id,
        task,
        city: city_id,
        gain,
        energy_after: officer.energy(),
        loyalty_after: officer.loyalty(),
        overworked,
    };

    tracing::debug!(
        officer = %officer_id,
        %task,
        city = %city_id,
        gain,
        overworked,
        "Assignment applied"
    );

    state.log(EventType::AssignmentCompleted {
        officer: officer_id,
        task,
        city: city_id,
        gain,
    });
    if overworked {
        state.log(EventType::Overworked { officer: officer_id });
    }

    Ok(outcome)
}

fn improve_city(city: &mut City, task: TaskKind, output: u32) -> u32 {
    if let Some(track) = development_track(task) {
        return city.raise_development(track, output);
    }

    if task == TaskKind::Recruit {
        city.gold -= RECRUIT_COST_GOLD;
        city.food -= RECRUIT_COST_FOOD;
    }
    city.troops = city.troops.saturating_add(output);
    output
}

/// Validate a task and queue it for the next turn end
pub fn assign_task(
    state: &mut GameState,
    officer_id: OfficerId,
    task: TaskKind,
    city_id: CityId,
) -> Result<(), AssignmentError> {
    validate_assignment(state, officer_id, task, city_id)?;

    if let Some(officer) = state.officer_mut(officer_id) {
        officer.assignment = Some(Assignment { task, city: city_id });
    }
    state.log(EventType::AssignmentQueued {
        officer: officer_id,
        task,
        city: city_id,
    });
    Ok(())
}

/// Drop a queued task
pub fn cancel_assignment(
    state: &mut GameState,
    officer_id: OfficerId,
) -> Result<Assignment, CommandError> {
    let officer = state
        .officer_mut(officer_id)
        .ok_or(CommandError::UnknownOfficer(officer_id))?;
    let assignment = officer
        .assignment
        .take()
        .ok_or(CommandError::NoAssignment(officer_id))?;

    state.log(EventType::AssignmentCancelled { officer: officer_id });
    Ok(assignment)
}

/// Apply every queued assignment in officer id order
///
/// Tasks that are no longer valid (city lost, officer moved) are dropped
/// and logged rather than aborting the batch.
pub fn process_assignments(state: &mut GameState) -> Vec<AssignmentOutcome> {
    let queued: Vec<(OfficerId, Assignment)> = state
        .officers
        .values_mut()
        .filter_map(|o| o.assignment.take().map(|a| (o.id, a)))
        .collect();

    let mut outcomes = Vec::with_capacity(queued.len());
    for (officer, assignment) in queued {
        match apply_assignment(state, officer, assignment.task, assignment.city) {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => {
                tracing::debug!(officer = %officer, error = %err, "Queued assignment dropped");
                state.log(EventType::AssignmentFailed {
                    officer,
                    task: assignment.task,
                    reason: err.to_string(),
                });
            }
        }
    }
    outcomes
}

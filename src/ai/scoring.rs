//! Heuristic scores behind AI decisions

use crate::combat::tech_bonus;
use crate::core::types::{trait_multiplier, CityId, TaskKind};
use crate::economy::assignment::{can_afford_recruit, development_track};
use crate::state::{City, GameState, Officer};

/// How well an officer suits a task: governing stat times trait bonus
pub fn task_score(officer: &Officer, task: TaskKind) -> f32 {
    f32::from(officer.stat(task.governing_stat())) * trait_multiplier(task, &officer.traits)
}

/// Whether the AI should consider `task` for `officer` in `city` at all
///
/// Stricter than assignment validation: energy must exceed the cost and a
/// maxed development track is never worked.
pub fn is_worthwhile(officer: &Officer, task: TaskKind, city: &City) -> bool {
    if officer.energy() <= task.energy_cost() {
        return false;
    }
    match development_track(task) {
        Some(track) => city.development(track) < 100,
        None if task == TaskKind::Recruit => can_afford_recruit(city),
        None => true,
    }
}

/// Estimated attacker/defender power ratio for `committed` troops from `from` against `to`
///
/// Coarse on purpose: ignores officer traits on both sides.
pub fn estimate_advantage(state: &GameState, from: CityId, to: CityId, committed: u32) -> f32 {
    let (Some(source), Some(target)) = (state.city(from), state.city(to)) else {
        return 0.0;
    };
    let attack = committed as f32 * tech_bonus(state, source.owner);
    let defense = (target.troops as f32 * target.defense_multiplier()).max(1.0);
    attack / defense
}

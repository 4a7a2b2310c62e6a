//! AI Controller
//!
//! Runs one non-player faction's turn in two phases. First every idle
//! officer standing in one of the faction's cities is greedily matched to
//! the task that best fits its stats and traits. Then each city with a
//! large enough garrison considers its weakest-looking enemy neighbor and
//! attacks when the estimated advantage clears the configured threshold.
//!
//! All randomness comes from the caller's generator and is only used to
//! break ties between equally scored choices.

pub mod scoring;

use std::cmp::Reverse;
use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::{resolve_battle, BattleReport};
use crate::core::types::{CityId, FactionId, OfficerId, TaskKind};
use crate::economy::assignment::assign_task;
use crate::economy::constants::{RECRUIT_COST_FOOD, RECRUIT_COST_GOLD};
use crate::state::GameState;

pub use scoring::{estimate_advantage, is_worthwhile, task_score};

/// A task the AI queued this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTask {
    pub officer: OfficerId,
    pub task: TaskKind,
    pub city: CityId,
}

/// Everything one faction did during its AI turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiTurnReport {
    pub faction: Option<FactionId>,
    pub assignments: Vec<PlannedTask>,
    pub battles: Vec<BattleReport>,
}

/// Play one turn for `faction`
pub fn run_faction_turn<R: Rng + ?Sized>(
    state: &mut GameState,
    faction: FactionId,
    rng: &mut R,
) -> AiTurnReport {
    let assignments = plan_assignments(state, faction, rng);
    let battles = plan_attacks(state, faction, rng);

    tracing::debug!(
        faction = %faction,
        assignments = assignments.len(),
        battles = battles.len(),
        "AI turn finished"
    );

    AiTurnReport {
        faction: Some(faction),
        assignments,
        battles,
    }
}

/// Candidate (officer, task) pair with its ranking key
struct Candidate {
    score: OrderedFloat<f32>,
    tie_break: u32,
    officer: OfficerId,
    task: TaskKind,
    city: CityId,
}

/// Greedy assignment phase
///
/// Pairs are ranked by score and taken best first. An officer is used at
/// most once and recruitment is skipped once a city's treasury is already
/// committed to an earlier recruit.
fn plan_assignments<R: Rng + ?Sized>(
    state: &mut GameState,
    faction: FactionId,
    rng: &mut R,
) -> Vec<PlannedTask> {
    let mut candidates = Vec::new();
    for officer in state.officers_of(faction).filter(|o| o.is_idle()) {
        let Some(city) = state.city(officer.city).filter(|c| c.owner == faction) else {
            continue;
        };
        for task in TaskKind::ALL {
            if is_worthwhile(officer, task, city) {
                candidates.push(Candidate {
                    score: OrderedFloat(task_score(officer, task)),
                    tie_break: rng.gen(),
                    officer: officer.id,
                    task,
                    city: city.id,
                });
            }
        }
    }
    candidates.sort_by_key(|c| (Reverse(c.score), c.tie_break));

    // Gold and food already promised to queued recruits, per city
    let mut reserved: BTreeMap<CityId, (u32, u32)> = BTreeMap::new();
    let mut planned: Vec<PlannedTask> = Vec::new();

    for candidate in candidates {
        if planned.iter().any(|p| p.officer == candidate.officer) {
            continue;
        }
        if candidate.task == TaskKind::Recruit {
            let (gold, food) = reserved.get(&candidate.city).copied().unwrap_or_default();
            let affordable = state.city(candidate.city).is_some_and(|c| {
                c.gold >= gold + RECRUIT_COST_GOLD && c.food >= food + RECRUIT_COST_FOOD
            });
            if !affordable {
                continue;
            }
        }

        match assign_task(state, candidate.officer, candidate.task, candidate.city) {
            Ok(()) => {
                if candidate.task == TaskKind::Recruit {
                    let entry = reserved.entry(candidate.city).or_default();
                    entry.0 += RECRUIT_COST_GOLD;
                    entry.1 += RECRUIT_COST_FOOD;
                }
                planned.push(PlannedTask {
                    officer: candidate.officer,
                    task: candidate.task,
                    city: candidate.city,
                });
            }
            Err(err) => {
                tracing::debug!(officer = %candidate.officer, error = %err, "AI skipped task");
            }
        }
    }

    planned
}

/// Attack phase
///
/// Cities are considered in id order from a snapshot taken before any
/// battle, so a city captured this turn does not attack again.
fn plan_attacks<R: Rng + ?Sized>(
    state: &mut GameState,
    faction: FactionId,
    rng: &mut R,
) -> Vec<BattleReport> {
    let ai = state.config.ai.clone();
    let owned: Vec<CityId> = state.cities_of(faction).map(|c| c.id).collect();
    let mut battles = Vec::new();

    for from in owned {
        let Some(source) = state.city(from).filter(|c| c.owner == faction) else {
            continue;
        };
        if source.troops < ai.min_attack_garrison {
            continue;
        }
        let committed = (source.troops as f32 * ai.troop_commit_fraction).floor() as u32;
        if committed == 0 {
            continue;
        }

        let best = state
            .hostile_neighbors(from)
            .into_iter()
            .map(|to| {
                let advantage = estimate_advantage(state, from, to, committed);
                (OrderedFloat(advantage), rng.gen::<u32>(), to)
            })
            .max_by_key(|(advantage, tie_break, _)| (*advantage, Reverse(*tie_break)));

        let Some((advantage, _, to)) = best else {
            continue;
        };
        if advantage.into_inner() <= ai.attack_threshold {
            continue;
        }

        tracing::debug!(
            faction = %faction,
            from = %from,
            to = %to,
            committed,
            advantage = advantage.into_inner(),
            "AI attacking"
        );
        match resolve_battle(state, from, to, committed, rng) {
            Ok(report) => battles.push(report),
            Err(err) => tracing::warn!(from = %from, to = %to, error = %err, "AI attack rejected"),
        }
    }

    battles
}

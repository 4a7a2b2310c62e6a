//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for officers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfficerId(pub u32);

/// Unique identifier for cities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(pub u32);

/// Unique identifier for factions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactionId(pub u32);

impl fmt::Display for OfficerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "officer#{}", self.0)
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city#{}", self.0)
    }
}

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "faction#{}", self.0)
    }
}

/// Labor an officer can perform in a city
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// Politics -> agriculture
    Farm,
    /// Politics -> commerce
    Trade,
    /// Intelligence -> technology
    Research,
    /// Leadership -> troops
    Train,
    /// Leadership -> walls
    Fortify,
    /// Charisma -> troops, paid in gold and food
    Recruit,
}

impl TaskKind {
    pub const ALL: [TaskKind; 6] = [
        TaskKind::Farm,
        TaskKind::Trade,
        TaskKind::Research,
        TaskKind::Train,
        TaskKind::Fortify,
        TaskKind::Recruit,
    ];

    /// Energy an officer spends performing this task
    pub fn energy_cost(self) -> u8 {
        match self {
            TaskKind::Farm | TaskKind::Trade | TaskKind::Research => 20,
            TaskKind::Train | TaskKind::Fortify => 25,
            TaskKind::Recruit => 30,
        }
    }

    /// The officer stat that drives this task's output
    pub fn governing_stat(self) -> Stat {
        match self {
            TaskKind::Farm | TaskKind::Trade => Stat::Politics,
            TaskKind::Research => Stat::Intelligence,
            TaskKind::Train | TaskKind::Fortify => Stat::Leadership,
            TaskKind::Recruit => Stat::Charisma,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TaskKind::Farm => "farm",
            TaskKind::Trade => "trade",
            TaskKind::Research => "research",
            TaskKind::Train => "train",
            TaskKind::Fortify => "fortify",
            TaskKind::Recruit => "recruit",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The four base officer stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Leadership,
    Intelligence,
    Politics,
    Charisma,
}

/// Fixed vocabulary of officer traits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Trait {
    /// Attack bonus when stationed in an attacking city
    Brave,
    Benevolent,
    Merchant,
    Scholar,
    Strict,
    /// Fortify bonus and defense bonus when stationed in a defending city
    Engineer,
    Charismatic,
}

/// Multiplier applied when an officer's trait matches a task
pub const TRAIT_TASK_BONUS: f32 = 1.10;

/// (task, trait) -> bonus factor. Every task has exactly one matching trait.
pub const TRAIT_BONUS_TABLE: [(TaskKind, Trait, f32); 6] = [
    (TaskKind::Farm, Trait::Benevolent, TRAIT_TASK_BONUS),
    (TaskKind::Trade, Trait::Merchant, TRAIT_TASK_BONUS),
    (TaskKind::Research, Trait::Scholar, TRAIT_TASK_BONUS),
    (TaskKind::Train, Trait::Strict, TRAIT_TASK_BONUS),
    (TaskKind::Fortify, Trait::Engineer, TRAIT_TASK_BONUS),
    (TaskKind::Recruit, Trait::Charismatic, TRAIT_TASK_BONUS),
];

/// Product of the bonus factors of every trait in `traits` that matches `task`
pub fn trait_multiplier(task: TaskKind, traits: &[Trait]) -> f32 {
    TRAIT_BONUS_TABLE
        .iter()
        .filter(|(t, tr, _)| *t == task && traits.contains(tr))
        .map(|(_, _, factor)| *factor)
        .product()
}

/// Clamp a signed delta applied to a [0,100] rating
pub fn apply_delta(value: u8, delta: i32) -> u8 {
    (i32::from(value) + delta).clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_task_has_one_trait() {
        for task in TaskKind::ALL {
            let matches = TRAIT_BONUS_TABLE.iter().filter(|(t, _, _)| *t == task).count();
            assert_eq!(matches, 1, "{task} should have exactly one bonus trait");
        }
    }

    #[test]
    fn test_trait_multiplier() {
        assert_eq!(trait_multiplier(TaskKind::Farm, &[]), 1.0);
        assert_eq!(trait_multiplier(TaskKind::Farm, &[Trait::Benevolent]), TRAIT_TASK_BONUS);
        // Brave has no task bonus
        assert_eq!(trait_multiplier(TaskKind::Farm, &[Trait::Brave, Trait::Merchant]), 1.0);
        assert_eq!(trait_multiplier(TaskKind::Fortify, &[Trait::Engineer]), TRAIT_TASK_BONUS);
    }

    #[test]
    fn test_apply_delta_clamps() {
        assert_eq!(apply_delta(99, 5), 100);
        assert_eq!(apply_delta(1, -5), 0);
        assert_eq!(apply_delta(50, 1), 51);
    }

    #[test]
    fn test_energy_costs_nonzero() {
        for task in TaskKind::ALL {
            assert!(task.energy_cost() > 0);
            assert!(task.energy_cost() <= 100);
        }
    }

    #[test]
    fn test_id_ordering() {
        assert!(CityId(1) < CityId(2));
        assert_eq!(OfficerId(3).to_string(), "officer#3");
    }
}

//! Combat Resolver
//!
//! One faction's city attacking an adjacent city of another faction.
//! This is the only place city ownership changes hands.

pub mod constants;
pub mod resolution;

pub use resolution::{
    attack_power, calculate_casualties, defense_power, resolve_battle, tech_bonus, BattleOutcome,
    BattleReport,
};

//! Siege combat constants - all tunable values in one place

// Technology: bonus = 1 + (avg tech - baseline) / divisor, never below 1
pub const TECH_BONUS_BASELINE: f32 = 50.0;
pub const TECH_BONUS_DIVISOR: f32 = 500.0;

// Officer traits present at either end of the fight
pub const BRAVE_ATTACK_BONUS: f32 = 1.08;
pub const ENGINEER_DEFENSE_BONUS: f32 = 1.08;

// Casualty fractions, drawn uniformly inside these bounds
pub const LOSER_CASUALTIES_MIN: f32 = 0.25;
pub const LOSER_CASUALTIES_MAX: f32 = 0.55;
pub const WINNER_CASUALTIES_MIN: f32 = 0.10;
pub const WINNER_CASUALTIES_MAX: f32 = 0.30;
/// Cap on how much a lopsided power ratio scales the loser's casualties
pub const MAX_RATIO_SCALE: f32 = 1.8;

// Morale after battle
pub const VICTORY_MORALE_GAIN: i32 = 10;
pub const DEFEAT_MORALE_LOSS: i32 = -8;
pub const DEFENDER_VICTORY_MORALE_GAIN: i32 = 8;

// A captured city starts over under its new owner
pub const CONQUERED_DEFENSE: u8 = 20;
pub const CONQUERED_MORALE: u8 = 50;

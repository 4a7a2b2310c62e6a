//! Economy constants - all tunable values in one place

// Task output
pub const DEVELOPMENT_GAIN_PER_STAT: f32 = 0.125;
pub const TROOPS_PER_LEADERSHIP: f32 = 0.5;
pub const RECRUIT_BASE_TROOPS: u32 = 70;
pub const RECRUIT_COST_GOLD: u32 = 80;
pub const RECRUIT_COST_FOOD: u32 = 80;

// Monthly income
pub const BASE_GOLD_INCOME: u32 = 10;
pub const COMMERCE_INCOME_DIVISOR: u32 = 5;
pub const AGRICULTURE_INCOME_DIVISOR: u32 = 5;
pub const TAX_MULTIPLIER: u32 = 5;
pub const HARVEST_MULTIPLIER: u32 = 5;

// Upkeep (per 100 troops for food, per troop divisor for gold)
pub const FOOD_UPKEEP_PER_100_TROOPS: u64 = 12;
pub const GOLD_UPKEEP_DIVISOR: u32 = 20;

// Shortfalls - troops lost per unit of missing food/gold
pub const STARVATION_TROOPS_PER_FOOD: u32 = 1;
pub const DESERTION_TROOPS_PER_GOLD: u32 = 1;
pub const STARVATION_MORALE_LOSS: i32 = -10;
pub const DESERTION_MORALE_LOSS: i32 = -5;

//! Sango Engine - deterministic Three Kingdoms campaign simulation
//!
//! The whole campaign lives in one [`GameState`] value. Every operation
//! takes it by mutable reference, and every random draw comes from a
//! generator the caller passes in, so a seed plus a command sequence
//! always replays to the same state.

pub mod ai;
pub mod combat;
pub mod core;
pub mod economy;
pub mod loyalty;
pub mod orders;
pub mod state;
pub mod turn;
pub mod world;

pub use crate::combat::{resolve_battle, BattleOutcome, BattleReport};
pub use crate::core::error::{Result, SangoError};
pub use crate::core::{CityId, EngineConfig, FactionId, OfficerId, TaskKind, Trait};
pub use crate::economy::{apply_assignment, assign_task, cancel_assignment};
pub use crate::orders::{march, move_officer, MarchOutcome};
pub use crate::state::GameState;
pub use crate::turn::{check_victory, end_turn, TurnSummary, VictoryStatus};
pub use crate::world::{init_world, init_world_with_config};

pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::{Calendar, Season};
pub use config::EngineConfig;
pub use types::{CityId, FactionId, OfficerId, Stat, TaskKind, Trait};

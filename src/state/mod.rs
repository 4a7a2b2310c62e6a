//! State Model
//!
//! Entity types for one campaign: officers, cities, factions, the
//! adjacency graph, and the `GameState` aggregate that owns them all.

pub mod city;
pub mod events;
pub mod faction;
pub mod game_state;
pub mod graph;
pub mod officer;

pub use city::{City, Development};
pub use events::{Event, EventLog, EventType};
pub use faction::Faction;
pub use game_state::{FactionView, GameState};
pub use graph::CityGraph;
pub use officer::{Assignment, Officer, OfficerStats};

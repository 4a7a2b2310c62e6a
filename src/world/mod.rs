//! World Builder
//!
//! Constructs the starting campaign from static city, officer and road
//! templates, seeded for reproducibility.

pub mod builder;
pub mod templates;

pub use builder::{init_world, init_world_with_config};

use thiserror::Error;

use crate::core::types::{CityId, FactionId, OfficerId, TaskKind};

/// Failure to construct a new world
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("Unknown faction: {0}")]
    InvalidFaction(String),

    #[error("Rejected engine config: {0}")]
    InvalidConfig(String),
}

/// Rejected assignment. The state is untouched when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("Officer not found: {0}")]
    UnknownOfficer(OfficerId),

    #[error("{officer} needs {required} energy for {task} but has {available}")]
    InsufficientEnergy {
        officer: OfficerId,
        task: TaskKind,
        required: u8,
        available: u8,
    },

    #[error("{0} already holds an assignment")]
    OfficerBusy(OfficerId),

    #[error("{officer} cannot work in {city}: {reason}")]
    InvalidTarget {
        officer: OfficerId,
        city: CityId,
        reason: &'static str,
    },

    #[error("{city} cannot pay {gold} gold and {food} food for {task}")]
    InsufficientFunds {
        city: CityId,
        task: TaskKind,
        gold: u32,
        food: u32,
    },
}

/// Rejected attack. The state is untouched when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("City not found: {0}")]
    UnknownCity(CityId),

    #[error("{from} is not adjacent to {to}")]
    NotAdjacent { from: CityId, to: CityId },

    #[error("{city} cannot commit {requested} troops ({available} available)")]
    InsufficientTroops {
        city: CityId,
        requested: u32,
        available: u32,
    },

    #[error("{from} and {to} both belong to {faction}")]
    SameFaction {
        from: CityId,
        to: CityId,
        faction: FactionId,
    },
}

/// Rejected relocation or cancellation command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Officer not found: {0}")]
    UnknownOfficer(OfficerId),

    #[error("City not found: {0}")]
    UnknownCity(CityId),

    #[error("{0} has no pending assignment")]
    NoAssignment(OfficerId),

    #[error("{city} is not held by the officer's faction")]
    NotOwned { city: CityId },

    #[error(transparent)]
    Battle(#[from] BattleError),
}

/// Invalid engine configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum SangoError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SangoError>;

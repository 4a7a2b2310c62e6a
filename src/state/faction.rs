//! Factions - the political entities competing for the map

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::{FactionId, OfficerId};

/// A playable or AI-controlled faction
///
/// Cities and officers are not listed here: `City::owner` and
/// `Officer::faction` are the source of truth for membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    pub id: FactionId,
    pub name: String,
    pub ruler: Option<OfficerId>,
    /// Diplomatic standing toward other factions, -100 to +100
    pub relations: BTreeMap<FactionId, i8>,
}

impl Faction {
    pub fn new(id: FactionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ruler: None,
            relations: BTreeMap::new(),
        }
    }
}

//! Turn events and the per-turn event log
//!
//! Simulation events are expected state transitions (starvation, defection,
//! battle losses), not errors. The hosting layer renders them.

use serde::{Deserialize, Serialize};

use crate::core::types::{CityId, FactionId, OfficerId, TaskKind};

/// A logged event, stamped with the calendar date it happened on
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    pub year: u32,
    pub month: u8,
    pub event_type: EventType,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventType {
    // Assignments
    AssignmentQueued { officer: OfficerId, task: TaskKind, city: CityId },
    AssignmentCancelled { officer: OfficerId },
    AssignmentCompleted { officer: OfficerId, task: TaskKind, city: CityId, gain: u32 },
    AssignmentFailed { officer: OfficerId, task: TaskKind, reason: String },
    Overworked { officer: OfficerId },

    // Economy
    Taxation { city: CityId, gold: u32 },
    Harvest { city: CityId, food: u32 },
    Starvation { city: CityId, deficit: u32, troops_lost: u32 },
    Desertion { city: CityId, deficit: u32, troops_lost: u32 },

    // Military
    TroopsMarched { from: CityId, to: CityId, troops: u32 },
    BattleFought {
        attacker: CityId,
        defender: CityId,
        attacker_won: bool,
        casualties: (u32, u32),
    },
    CityCaptured { city: CityId, from: FactionId, to: FactionId },

    // Officers
    OfficerMoved { officer: OfficerId, from: CityId, to: CityId },
    OfficerDefected { officer: OfficerId, from: FactionId, to: FactionId, city: CityId },

    // Campaign
    NewYear { year: u32 },
    FactionEliminated { faction: FactionId },
    PlayerVictory { faction: FactionId },
    PlayerDefeat { faction: FactionId },
}

/// Append-only log of the events of the turn in progress
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<Event>,
    next_event_id: u32,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&mut self, event_type: EventType, year: u32, month: u8) -> u32 {
        let id = self.next_event_id;
        self.next_event_id += 1;

        self.events.push(Event {
            id,
            year,
            month,
            event_type,
        });

        id
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Hand the accumulated events to the caller and start a fresh turn.
    /// Event ids keep counting so they stay unique across turns.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }
}

//! GameState - the root aggregate of one campaign in progress

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::calendar::Calendar;
use crate::core::config::EngineConfig;
use crate::core::types::{CityId, FactionId, OfficerId};
use crate::state::city::City;
use crate::state::events::{EventLog, EventType};
use crate::state::faction::Faction;
use crate::state::graph::CityGraph;
use crate::state::officer::Officer;

/// Complete state of one game. Every engine operation takes it by `&mut`.
///
/// All collections are ordered maps so iteration (and therefore every
/// simulation result) is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub calendar: Calendar,
    pub cities: BTreeMap<CityId, City>,
    pub officers: BTreeMap<OfficerId, Officer>,
    pub factions: BTreeMap<FactionId, Faction>,
    pub graph: CityGraph,
    pub player: FactionId,
    pub config: EngineConfig,
    pub events: EventLog,
}

/// Read-only summary of a faction for the rendering layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionView {
    pub id: FactionId,
    pub name: String,
    pub is_player: bool,
    pub ruler: Option<OfficerId>,
    pub cities: Vec<CityId>,
    pub officers: Vec<OfficerId>,
    pub treasury: u64,
    pub granary: u64,
    pub army: u64,
}

impl GameState {
    /// An empty campaign at the default start date
    pub fn new(player: FactionId) -> Self {
        Self {
            calendar: Calendar::default(),
            cities: BTreeMap::new(),
            officers: BTreeMap::new(),
            factions: BTreeMap::new(),
            graph: CityGraph::new(),
            player,
            config: EngineConfig::default(),
            events: EventLog::new(),
        }
    }

    pub fn add_faction(&mut self, faction: Faction) {
        self.factions.insert(faction.id, faction);
    }

    pub fn add_city(&mut self, city: City) {
        self.graph.add_city(city.id);
        self.cities.insert(city.id, city);
    }

    pub fn add_officer(&mut self, officer: Officer) {
        self.officers.insert(officer.id, officer);
    }

    /// Append an event stamped with the current date
    pub fn log(&mut self, event_type: EventType) {
        let (year, month) = (self.calendar.year(), self.calendar.month());
        self.events.add_event(event_type, year, month);
    }

    pub fn year(&self) -> u32 {
        self.calendar.year()
    }

    pub fn month(&self) -> u8 {
        self.calendar.month()
    }

    pub fn city(&self, id: CityId) -> Option<&City> {
        self.cities.get(&id)
    }

    pub fn city_mut(&mut self, id: CityId) -> Option<&mut City> {
        self.cities.get_mut(&id)
    }

    pub fn officer(&self, id: OfficerId) -> Option<&Officer> {
        self.officers.get(&id)
    }

    pub fn officer_mut(&mut self, id: OfficerId) -> Option<&mut Officer> {
        self.officers.get_mut(&id)
    }

    pub fn faction(&self, id: FactionId) -> Option<&Faction> {
        self.factions.get(&id)
    }

    pub fn faction_by_name(&self, name: &str) -> Option<&Faction> {
        self.factions.values().find(|f| f.name == name)
    }

    pub fn city_by_name(&self, name: &str) -> Option<&City> {
        self.cities.values().find(|c| c.name == name)
    }

    pub fn officer_by_name(&self, name: &str) -> Option<&Officer> {
        self.officers.values().find(|o| o.name == name)
    }

    pub fn owner_of(&self, city: CityId) -> Option<FactionId> {
        self.cities.get(&city).map(|c| c.owner)
    }

    /// Cities held by a faction, in id order
    pub fn cities_of(&self, faction: FactionId) -> impl Iterator<Item = &City> + '_ {
        self.cities.values().filter(move |c| c.owner == faction)
    }

    /// Officers serving a faction, in id order
    pub fn officers_of(&self, faction: FactionId) -> impl Iterator<Item = &Officer> + '_ {
        self.officers.values().filter(move |o| o.serves(faction))
    }

    /// Officers of `faction` physically stationed in `city`
    pub fn officers_in_city(&self, faction: FactionId, city: CityId) -> Vec<OfficerId> {
        self.officers
            .values()
            .filter(|o| o.serves(faction) && o.city == city)
            .map(|o| o.id)
            .collect()
    }

    /// A faction is eliminated once it holds no cities
    pub fn is_eliminated(&self, faction: FactionId) -> bool {
        self.cities_of(faction).next().is_none()
    }

    /// Neighboring cities held by a faction other than `city`'s owner
    pub fn hostile_neighbors(&self, city: CityId) -> Vec<CityId> {
        let Some(owner) = self.owner_of(city) else {
            return Vec::new();
        };
        self.graph
            .neighbors(city)
            .filter(|n| self.owner_of(*n).is_some_and(|o| o != owner))
            .collect()
    }

    /// Average technology across a faction's cities (0 if it holds none)
    pub fn average_technology(&self, faction: FactionId) -> f32 {
        let (sum, count) = self
            .cities_of(faction)
            .fold((0u32, 0u32), |(s, n), c| (s + u32::from(c.technology), n + 1));
        if count == 0 {
            0.0
        } else {
            sum as f32 / count as f32
        }
    }

    pub fn faction_view(&self, id: FactionId) -> Option<FactionView> {
        let faction = self.factions.get(&id)?;
        let cities: Vec<&City> = self.cities_of(id).collect();

        Some(FactionView {
            id,
            name: faction.name.clone(),
            is_player: id == self.player,
            ruler: faction.ruler,
            cities: cities.iter().map(|c| c.id).collect(),
            officers: self.officers_of(id).map(|o| o.id).collect(),
            treasury: cities.iter().map(|c| u64::from(c.gold)).sum(),
            granary: cities.iter().map(|c| u64::from(c.food)).sum(),
            army: cities.iter().map(|c| u64::from(c.troops)).sum(),
        })
    }

    /// Factions other than the player's, in id order
    pub fn rival_factions(&self) -> Vec<FactionId> {
        self.factions.keys().copied().filter(|f| *f != self.player).collect()
    }
}

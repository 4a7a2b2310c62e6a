//! Officers - named agents who staff cities and perform tasks

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::types::{apply_delta, CityId, FactionId, OfficerId, Stat, TaskKind, Trait};

pub const MAX_RATING: u8 = 100;

/// A task an officer has been given in a city
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub task: TaskKind,
    pub city: CityId,
}

/// Base stats, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OfficerStats {
    pub leadership: u8,
    pub intelligence: u8,
    pub politics: u8,
    pub charisma: u8,
}

impl OfficerStats {
    pub fn new(leadership: u8, intelligence: u8, politics: u8, charisma: u8) -> Self {
        Self {
            leadership: leadership.min(MAX_RATING),
            intelligence: intelligence.min(MAX_RATING),
            politics: politics.min(MAX_RATING),
            charisma: charisma.min(MAX_RATING),
        }
    }

    pub fn get(&self, stat: Stat) -> u8 {
        match stat {
            Stat::Leadership => self.leadership,
            Stat::Intelligence => self.intelligence,
            Stat::Politics => self.politics,
            Stat::Charisma => self.charisma,
        }
    }
}

/// Saved ratings above the cap load as the cap
fn clamped_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(u8::deserialize(deserializer)?.min(MAX_RATING))
}

/// A military/political officer
///
/// Energy and loyalty are private so every mutation goes through a
/// clamping method and stays inside [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Officer {
    pub id: OfficerId,
    pub name: String,
    /// None once the officer serves no faction
    pub faction: Option<FactionId>,
    pub stats: OfficerStats,
    #[serde(deserialize_with = "clamped_rating")]
    energy: u8,
    #[serde(deserialize_with = "clamped_rating")]
    loyalty: u8,
    pub traits: Vec<Trait>,
    /// City the officer is stationed in
    pub city: CityId,
    /// Pending task, applied when the turn ends
    pub assignment: Option<Assignment>,
}

impl Officer {
    pub fn new(
        id: OfficerId,
        name: impl Into<String>,
        faction: Option<FactionId>,
        stats: OfficerStats,
        city: CityId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            faction,
            stats,
            energy: MAX_RATING,
            loyalty: 70,
            traits: Vec::new(),
            city,
            assignment: None,
        }
    }

    pub fn with_traits(mut self, traits: &[Trait]) -> Self {
        self.traits = traits.to_vec();
        self
    }

    pub fn with_loyalty(mut self, loyalty: u8) -> Self {
        self.set_loyalty(loyalty);
        self
    }

    pub fn with_energy(mut self, energy: u8) -> Self {
        self.set_energy(energy);
        self
    }

    pub fn energy(&self) -> u8 {
        self.energy
    }

    pub fn loyalty(&self) -> u8 {
        self.loyalty
    }

    pub fn set_energy(&mut self, energy: u8) {
        self.energy = energy.min(MAX_RATING);
    }

    pub fn set_loyalty(&mut self, loyalty: u8) {
        self.loyalty = loyalty.min(MAX_RATING);
    }

    /// Add a signed amount to energy, clamped to [0, 100]
    pub fn adjust_energy(&mut self, delta: i32) {
        self.energy = apply_delta(self.energy, delta);
    }

    /// Add a signed amount to loyalty, clamped to [0, 100]
    pub fn adjust_loyalty(&mut self, delta: i32) {
        self.loyalty = apply_delta(self.loyalty, delta);
    }

    pub fn stat(&self, stat: Stat) -> u8 {
        self.stats.get(stat)
    }

    pub fn has_trait(&self, t: Trait) -> bool {
        self.traits.contains(&t)
    }

    pub fn is_idle(&self) -> bool {
        self.assignment.is_none()
    }

    pub fn serves(&self, faction: FactionId) -> bool {
        self.faction == Some(faction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn officer() -> Officer {
        Officer::new(
            OfficerId(1),
            "Test",
            Some(FactionId(0)),
            OfficerStats::new(50, 60, 70, 80),
            CityId(0),
        )
    }

    #[test]
    fn test_energy_and_loyalty_clamp() {
        let mut off = officer();
        off.adjust_energy(50);
        assert_eq!(off.energy(), 100);
        off.adjust_energy(-250);
        assert_eq!(off.energy(), 0);

        off.adjust_loyalty(-100);
        assert_eq!(off.loyalty(), 0);
        off.set_loyalty(150);
        assert_eq!(off.loyalty(), 100);
    }

    #[test]
    fn test_out_of_range_save_loads_clamped() {
        let json = serde_json::to_string(&officer()).unwrap();
        assert!(json.contains("\"energy\":100"));
        let tampered = json
            .replace("\"energy\":100", "\"energy\":250")
            .replace("\"loyalty\":70", "\"loyalty\":180");

        let loaded: Officer = serde_json::from_str(&tampered).unwrap();
        assert_eq!(loaded.energy(), 100);
        assert_eq!(loaded.loyalty(), 100);
    }

    #[test]
    fn test_stats_clamped_on_construction() {
        let stats = OfficerStats::new(120, 0, 100, 255);
        assert_eq!(stats.leadership, 100);
        assert_eq!(stats.charisma, 100);
        assert_eq!(stats.get(Stat::Politics), 100);
    }

    #[test]
    fn test_builder_helpers() {
        let off = officer()
            .with_traits(&[Trait::Brave])
            .with_loyalty(20)
            .with_energy(40);
        assert!(off.has_trait(Trait::Brave));
        assert!(!off.has_trait(Trait::Scholar));
        assert_eq!(off.loyalty(), 20);
        assert_eq!(off.energy(), 40);
        assert!(off.is_idle());
        assert!(off.serves(FactionId(0)));
        assert_eq!(off.stat(Stat::Charisma), 80);
    }
}

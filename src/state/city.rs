//! Cities - the contested locations of the campaign map

use serde::{Deserialize, Serialize};

use crate::core::types::{apply_delta, CityId, FactionId};

/// Development tracks raised by officer tasks, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Development {
    Agriculture,
    Commerce,
    Technology,
    Walls,
}

/// A city owned by exactly one faction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub owner: FactionId,
    pub gold: u32,
    pub food: u32,
    pub troops: u32,
    /// Stored defense rating; reset when the city changes hands
    pub defense: u8,
    pub morale: u8,
    pub agriculture: u8,
    pub commerce: u8,
    pub technology: u8,
    pub walls: u8,
}

impl City {
    /// A city with the campaign's default resources and development
    pub fn new(id: CityId, name: impl Into<String>, owner: FactionId) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
            gold: 500,
            food: 800,
            troops: 300,
            defense: 50,
            morale: 60,
            agriculture: 50,
            commerce: 50,
            technology: 40,
            walls: 50,
        }
    }

    pub fn development(&self, track: Development) -> u8 {
        match track {
            Development::Agriculture => self.agriculture,
            Development::Commerce => self.commerce,
            Development::Technology => self.technology,
            Development::Walls => self.walls,
        }
    }

    /// Raise a development track, clamped to 100. Returns the amount actually gained.
    pub fn raise_development(&mut self, track: Development, amount: u32) -> u32 {
        let before = self.development(track);
        let delta = i32::try_from(amount).unwrap_or(i32::MAX);
        let after = apply_delta(before, delta);
        match track {
            Development::Agriculture => self.agriculture = after,
            Development::Commerce => self.commerce = after,
            Development::Technology => self.technology = after,
            Development::Walls => self.walls = after,
        }
        u32::from(after - before)
    }

    pub fn adjust_morale(&mut self, delta: i32) {
        self.morale = apply_delta(self.morale, delta);
    }

    /// Multiplier a garrison gets from the defense rating and walls
    pub fn defense_multiplier(&self) -> f32 {
        (1.0 + f32::from(self.defense) / 100.0) * (1.0 + f32::from(self.walls) / WALL_DEFENSE_DIVISOR)
    }
}

/// Walls contribute walls/400 on top of the defense rating
pub const WALL_DEFENSE_DIVISOR: f32 = 400.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_development_clamps() {
        let mut city = City::new(CityId(0), "Test", FactionId(0));
        city.agriculture = 95;
        let gained = city.raise_development(Development::Agriculture, 11);
        assert_eq!(gained, 5);
        assert_eq!(city.agriculture, 100);

        let gained = city.raise_development(Development::Technology, 3);
        assert_eq!(gained, 3);
        assert_eq!(city.technology, 43);
    }

    #[test]
    fn test_defense_multiplier() {
        let mut city = City::new(CityId(0), "Test", FactionId(0));
        city.defense = 50;
        city.walls = 0;
        assert!((city.defense_multiplier() - 1.5).abs() < 1e-6);

        city.walls = 100;
        assert!((city.defense_multiplier() - 1.875).abs() < 1e-6);
    }

    #[test]
    fn test_morale_clamps() {
        let mut city = City::new(CityId(0), "Test", FactionId(0));
        city.adjust_morale(-200);
        assert_eq!(city.morale, 0);
        city.adjust_morale(500);
        assert_eq!(city.morale, 100);
    }
}

//! Campaign calendar
//!
//! One turn is one month. Seasonal economy events key off the month.

use serde::{Deserialize, Serialize};

pub const START_YEAR: u32 = 208;
pub const MONTHS_PER_YEAR: u8 = 12;

/// Month in which commerce is taxed
pub const TAX_MONTH: u8 = 1;
/// Month in which the harvest comes in
pub const HARVEST_MONTH: u8 = 7;

/// Seasonal event that modifies a month's income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Taxation,
    Harvest,
    Ordinary,
}

impl Season {
    pub fn from_month(month: u8) -> Self {
        match month {
            TAX_MONTH => Season::Taxation,
            HARVEST_MONTH => Season::Harvest,
            _ => Season::Ordinary,
        }
    }
}

/// Calendar tracks campaign time with year/month granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    year: u32,
    month: u8,
}

impl Calendar {
    pub fn new(year: u32, month: u8) -> Self {
        Self {
            year,
            month: month.clamp(1, MONTHS_PER_YEAR),
        }
    }

    /// Advance one month. Returns true when a new year begins.
    pub fn advance(&mut self) -> bool {
        if self.month >= MONTHS_PER_YEAR {
            self.month = 1;
            self.year += 1;
            true
        } else {
            self.month += 1;
            false
        }
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn season(&self) -> Season {
        Season::from_month(self.month)
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(START_YEAR, 1)
    }
}

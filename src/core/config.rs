//! Engine configuration with documented defaults
//!
//! Difficulty knobs for AI aggression, defection and stamina.
//! Loaded from TOML by the hosting layer; every section is optional.

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// AI faction behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Estimated attacker/defender power ratio required before attacking
    ///
    /// At 1.2 the AI only attacks when it expects a 20% edge.
    pub attack_threshold: f32,

    /// Fraction of a city's garrison committed to an attack
    ///
    /// Kept below 1.0 so a source city is never emptied.
    pub troop_commit_fraction: f32,

    /// Garrison size below which a city never launches an attack
    pub min_attack_garrison: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            attack_threshold: 1.2,
            troop_commit_fraction: 0.5,
            min_attack_garrison: 140,
        }
    }
}

/// Loyalty and defection rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoyaltyConfig {
    /// Officers strictly below this loyalty roll for defection
    pub defection_threshold: u8,

    /// Per-turn defection chance for an officer below the threshold
    pub defection_chance: f64,

    /// Loyalty a defector starts with under their new lord
    pub defector_loyalty: u8,
}

impl Default for LoyaltyConfig {
    fn default() -> Self {
        Self {
            defection_threshold: 35,
            defection_chance: 0.10,
            defector_loyalty: 60,
        }
    }
}

/// Officer stamina rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    /// Energy regained each turn by officers without an assignment
    pub idle_recovery: u8,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self { idle_recovery: 12 }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub ai: AiConfig,
    pub loyalty: LoyaltyConfig,
    pub energy: EnergyConfig,
}

impl EngineConfig {
    /// Parse a TOML document and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.ai.troop_commit_fraction > 0.0 && self.ai.troop_commit_fraction < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "ai.troop_commit_fraction ({}) must be in (0, 1)",
                self.ai.troop_commit_fraction
            )));
        }

        if !(self.ai.attack_threshold.is_finite() && self.ai.attack_threshold > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "ai.attack_threshold ({}) must be positive",
                self.ai.attack_threshold
            )));
        }

        if !(0.0..=1.0).contains(&self.loyalty.defection_chance) {
            return Err(ConfigError::Invalid(format!(
                "loyalty.defection_chance ({}) must be in [0, 1]",
                self.loyalty.defection_chance
            )));
        }

        if self.loyalty.defection_threshold > 100 || self.loyalty.defector_loyalty > 100 {
            return Err(ConfigError::Invalid("loyalty values must be <= 100".into()));
        }

        if self.energy.idle_recovery > 100 {
            return Err(ConfigError::Invalid("energy.idle_recovery must be <= 100".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [ai]
            attack_threshold = 1.5
            "#,
        )
        .unwrap();
        assert_eq!(config.ai.attack_threshold, 1.5);
        assert_eq!(config.ai.troop_commit_fraction, 0.5);
        assert_eq!(config.loyalty, LoyaltyConfig::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_rejects_full_commit() {
        let result = EngineConfig::from_toml_str("[ai]\ntroop_commit_fraction = 1.0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_chance() {
        let result = EngineConfig::from_toml_str("[loyalty]\ndefection_chance = 1.5\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = EngineConfig::from_toml_str("[ai\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}

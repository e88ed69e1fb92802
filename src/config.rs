//! Engine Configuration
//!
//! One struct gathering every tunable the pipeline reads, passed
//! explicitly into the engine at construction. No globals, no
//! environment lookups: two engines with different configs can coexist
//! in one process.

use serde::{Deserialize, Serialize};

use crate::baseline::RuleThresholds;
use crate::cluster::DEFAULT_ASSIGNMENT_EPSILON;
use crate::engagement::EngagementConfig;
use crate::error::ConfigError;
use crate::features::AggregatorDefaults;
use crate::risk::FusionThresholds;

fn default_epsilon() -> f32 {
    DEFAULT_ASSIGNMENT_EPSILON
}

/// Complete engine configuration. Every field has a sensible default,
/// so a partial config file only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub aggregator: AggregatorDefaults,
    #[serde(default)]
    pub rules: RuleThresholds,
    #[serde(default)]
    pub fusion: FusionThresholds,
    #[serde(default)]
    pub engagement: EngagementConfig,
    /// Centroid distances closer than this count as a tie.
    #[serde(default = "default_epsilon")]
    pub assignment_epsilon: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            aggregator: AggregatorDefaults::default(),
            rules: RuleThresholds::default(),
            fusion: FusionThresholds::default(),
            engagement: EngagementConfig::default(),
            assignment_epsilon: DEFAULT_ASSIGNMENT_EPSILON,
        }
    }
}

impl EngineConfig {
    /// Flags students earlier across both the rule and fusion layers.
    pub fn high_sensitivity() -> Self {
        Self {
            rules: RuleThresholds::high_sensitivity(),
            fusion: FusionThresholds::high_sensitivity(),
            ..Default::default()
        }
    }

    /// Flags only the clearest cases across both layers.
    pub fn low_sensitivity() -> Self {
        Self {
            rules: RuleThresholds::low_sensitivity(),
            fusion: FusionThresholds::low_sensitivity(),
            ..Default::default()
        }
    }

    pub fn from_json_file(path: &str) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        let config: EngineConfig =
            serde_json::from_slice(&bytes).map_err(|e| ConfigError::Malformed {
                name: path.to_string(),
                reason: e.to_string(),
            })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Startup validation. `name` is only used in error messages.
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if !self.rules.is_valid() {
            return Err(ConfigError::Malformed {
                name: name.to_string(),
                reason: "rule severity cutoffs must satisfy 0 < yellow < red".to_string(),
            });
        }
        if !self.fusion.is_valid() {
            return Err(ConfigError::Malformed {
                name: name.to_string(),
                reason: "fusion cutoffs must satisfy 0 < yellow < red <= 1".to_string(),
            });
        }
        if !self.engagement.is_valid() {
            return Err(ConfigError::Malformed {
                name: name.to_string(),
                reason: "engagement smoothing must be in (0,1] with a positive step cap"
                    .to_string(),
            });
        }
        if !(self.assignment_epsilon >= 0.0) || !self.assignment_epsilon.is_finite() {
            return Err(ConfigError::Malformed {
                name: name.to_string(),
                reason: format!(
                    "assignment epsilon must be >= 0, got {}",
                    self.assignment_epsilon
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate("default").is_ok());
        assert!(EngineConfig::high_sensitivity().validate("high").is_ok());
        assert!(EngineConfig::low_sensitivity().validate("low").is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"fusion":{"red_cutoff":0.6,"yellow_cutoff":0.3}}"#).unwrap();
        assert_eq!(config.fusion.red_cutoff, 0.6);
        assert_eq!(config.rules, RuleThresholds::default());
        assert_eq!(config.assignment_epsilon, DEFAULT_ASSIGNMENT_EPSILON);
    }

    #[test]
    fn test_validation_rejects_inverted_cutoffs() {
        let mut config = EngineConfig::default();
        config.fusion.yellow_cutoff = 0.9;
        let err = config.validate("test").unwrap_err();
        assert!(err.to_string().contains("fusion"));
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let err = EngineConfig::from_json_file("/nonexistent/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

//! Fusion Policy
//!
//! Probability cutoffs used when combining the rule baseline with the
//! model output. Kept as data so deployments can tune sensitivity
//! without touching fusion logic.

use serde::{Deserialize, Serialize};

/// Cutoffs applied to the model's dropout probability during fusion.
///
/// Escalation-only: these can raise the baseline tier, never lower it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionThresholds {
    /// Probability at or above which the verdict is forced to red.
    pub red_cutoff: f32,
    /// Probability at or above which the verdict is at least yellow.
    pub yellow_cutoff: f32,
}

impl Default for FusionThresholds {
    fn default() -> Self {
        FusionThresholds {
            red_cutoff: 0.70,
            yellow_cutoff: 0.40,
        }
    }
}

impl FusionThresholds {
    /// Flags students earlier. For institutions with spare counselling
    /// capacity that prefer false alarms over missed cases.
    pub fn high_sensitivity() -> Self {
        FusionThresholds {
            red_cutoff: 0.55,
            yellow_cutoff: 0.30,
        }
    }

    /// Flags only the clearest cases. For overloaded counselling teams.
    pub fn low_sensitivity() -> Self {
        FusionThresholds {
            red_cutoff: 0.85,
            yellow_cutoff: 0.55,
        }
    }

    /// Cutoffs must be probabilities and ordered yellow < red.
    pub fn is_valid(&self) -> bool {
        self.yellow_cutoff > 0.0
            && self.red_cutoff <= 1.0
            && self.yellow_cutoff < self.red_cutoff
    }
}

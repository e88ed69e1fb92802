//! Risk Fusion
//!
//! Combines the rule baseline tier with the model probability into the
//! final tier. The combination is escalation-only: whichever signal is
//! more alarmed wins, and the model can never talk a rule-flagged
//! student back down to green.

use super::policy::FusionThresholds;
use super::types::RiskLevel;

/// Fuse the baseline tier with the model's dropout probability.
///
/// The raw probability is reported on the verdict unchanged regardless
/// of which side decided the tier.
pub fn fuse(baseline: RiskLevel, probability: f32, thresholds: &FusionThresholds) -> RiskLevel {
    let model_tier = if probability >= thresholds.red_cutoff {
        RiskLevel::Red
    } else if probability >= thresholds.yellow_cutoff {
        RiskLevel::Yellow
    } else {
        RiskLevel::Green
    };

    baseline.max(model_tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_escalates_green_baseline() {
        let t = FusionThresholds::default();
        assert_eq!(fuse(RiskLevel::Green, 0.85, &t), RiskLevel::Red);
        assert_eq!(fuse(RiskLevel::Green, 0.50, &t), RiskLevel::Yellow);
        assert_eq!(fuse(RiskLevel::Green, 0.10, &t), RiskLevel::Green);
    }

    #[test]
    fn test_baseline_red_survives_low_probability() {
        let t = FusionThresholds::default();
        assert_eq!(fuse(RiskLevel::Red, 0.05, &t), RiskLevel::Red);
        assert_eq!(fuse(RiskLevel::Yellow, 0.05, &t), RiskLevel::Yellow);
    }

    #[test]
    fn test_cutoffs_are_inclusive() {
        let t = FusionThresholds::default();
        assert_eq!(fuse(RiskLevel::Green, 0.70, &t), RiskLevel::Red);
        assert_eq!(fuse(RiskLevel::Green, 0.40, &t), RiskLevel::Yellow);
        assert_eq!(
            fuse(RiskLevel::Green, 0.39999, &t),
            RiskLevel::Green
        );
    }

    #[test]
    fn test_monotone_in_probability() {
        let t = FusionThresholds::default();
        let mut last = RiskLevel::Green;
        for i in 0..=100 {
            let p = i as f32 / 100.0;
            let level = fuse(RiskLevel::Green, p, &t);
            assert!(level >= last, "tier dropped at p={}", p);
            last = level;
        }
    }

    #[test]
    fn test_high_sensitivity_flags_earlier() {
        let default = FusionThresholds::default();
        let high = FusionThresholds::high_sensitivity();
        assert_eq!(fuse(RiskLevel::Green, 0.60, &default), RiskLevel::Yellow);
        assert_eq!(fuse(RiskLevel::Green, 0.60, &high), RiskLevel::Red);
    }
}

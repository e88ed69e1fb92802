//! Baseline Classifier
//!
//! Deterministic threshold rules, evaluated before the model. Severity
//! points accumulate per rule group in a fixed order so the factor list
//! reads the same way for every student. Runs without any trained
//! artifact and provides the floor the model can only escalate from.

use serde::{Deserialize, Serialize};

use super::rules::{
    RuleThresholds, ATTENDANCE_COMFORTABLE, ATTENDANCE_CRITICAL, ATTENDANCE_MINIMUM,
    ATTENDANCE_VERY_LOW, BACKLOGS_HIGH, BACKLOGS_MULTIPLE, CGPA_BELOW_AVERAGE, CGPA_CRITICAL,
    CGPA_TARGET, CGPA_VERY_LOW, ENGAGEMENT_LOW, ENGAGEMENT_VERY_LOW, FEES_MAJOR, FEES_NOTABLE,
    FEES_SIGNIFICANT, QUIZ_POOR,
};
use crate::features::StudentFeatures;
use crate::risk::RiskLevel;

/// Placeholder factor for green students with nothing fired. Keeps the
/// factor list non-empty so dashboards always have something to show.
pub const NO_FACTORS_NOTE: &str = "No significant risk factors identified";

/// Output of the rule pass: accumulated severity, the tier it maps to,
/// and one human-readable line per fired rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineAssessment {
    pub severity: u8,
    pub risk: RiskLevel,
    pub factors: Vec<String>,
}

/// Rule-based classifier. Stateless apart from its cutoffs.
#[derive(Debug, Clone)]
pub struct BaselineClassifier {
    thresholds: RuleThresholds,
}

impl Default for BaselineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl BaselineClassifier {
    pub fn new() -> Self {
        Self {
            thresholds: RuleThresholds::default(),
        }
    }

    pub fn with_thresholds(thresholds: RuleThresholds) -> Self {
        Self { thresholds }
    }

    /// Run every rule group in fixed order: attendance, CGPA, backlogs,
    /// fees, engagement, quiz. Same features in, same assessment out.
    pub fn assess(&self, features: &StudentFeatures) -> BaselineAssessment {
        let mut severity: u8 = 0;
        let mut factors: Vec<String> = Vec::new();

        // ====================================================================
        // ATTENDANCE
        // ====================================================================

        let attendance = features.attendance();
        if attendance < ATTENDANCE_CRITICAL {
            severity += 4;
            factors.push(format!(
                "Critical attendance: {:.1}% (need >{:.0}%)",
                attendance, ATTENDANCE_MINIMUM
            ));
        } else if attendance < ATTENDANCE_VERY_LOW {
            severity += 3;
            factors.push(format!(
                "Very low attendance: {:.1}% (need >{:.0}%)",
                attendance, ATTENDANCE_MINIMUM
            ));
        } else if attendance < ATTENDANCE_MINIMUM {
            severity += 2;
            factors.push(format!(
                "Below minimum attendance: {:.1}% (need >{:.0}%)",
                attendance, ATTENDANCE_MINIMUM
            ));
        } else if attendance < ATTENDANCE_COMFORTABLE {
            severity += 1;
            factors.push(format!("Attendance could improve: {:.1}%", attendance));
        }

        // ====================================================================
        // CGPA
        // ====================================================================

        let cgpa = features.cgpa();
        if cgpa < CGPA_CRITICAL {
            severity += 4;
            factors.push(format!("Critical CGPA: {:.2} (failing)", cgpa));
        } else if cgpa < CGPA_VERY_LOW {
            severity += 3;
            factors.push(format!("Very low CGPA: {:.2} (at risk)", cgpa));
        } else if cgpa < CGPA_BELOW_AVERAGE {
            severity += 2;
            factors.push(format!("Below average CGPA: {:.2}", cgpa));
        } else if cgpa < CGPA_TARGET {
            severity += 1;
            factors.push(format!("CGPA needs improvement: {:.2}", cgpa));
        }

        // ====================================================================
        // BACKLOGS
        // ====================================================================

        let backlogs = features.backlogs();
        if backlogs >= BACKLOGS_HIGH {
            severity += 4;
            factors.push(format!("High backlogs: {} subjects pending", backlogs));
        } else if backlogs >= BACKLOGS_MULTIPLE {
            severity += 3;
            factors.push(format!("Multiple backlogs: {} subjects pending", backlogs));
        } else if backlogs >= 1 {
            severity += 2;
            factors.push(format!("Has backlogs: {} subject(s) pending", backlogs));
        }

        // ====================================================================
        // FEES
        // ====================================================================

        if features.fees_pending() {
            let due = features.fees_amount_due();
            if due > FEES_MAJOR {
                severity += 4;
                factors.push(format!("Major fee pending: INR {:.0}", due));
            } else if due > FEES_SIGNIFICANT {
                severity += 3;
                factors.push(format!("Significant fee pending: INR {:.0}", due));
            } else if due > FEES_NOTABLE {
                severity += 2;
                factors.push(format!("Fee pending: INR {:.0}", due));
            } else {
                severity += 1;
                factors.push(format!("Minor fee pending: INR {:.0}", due));
            }
        }

        // ====================================================================
        // ENGAGEMENT & QUIZ
        // ====================================================================

        let engagement = features.engagement();
        if engagement < ENGAGEMENT_VERY_LOW {
            severity += 2;
            factors.push("Very low engagement with support system".to_string());
        } else if engagement < ENGAGEMENT_LOW {
            severity += 1;
            factors.push("Low engagement with support system".to_string());
        }

        let quiz = features.quiz_score_avg();
        if quiz < QUIZ_POOR {
            severity += 1;
            factors.push(format!("Poor quiz performance: {:.1}%", quiz));
        }

        // ====================================================================
        // TIER
        // ====================================================================

        let risk = if severity >= self.thresholds.red_severity_min {
            RiskLevel::Red
        } else if severity >= self.thresholds.yellow_severity_min {
            RiskLevel::Yellow
        } else {
            RiskLevel::Green
        };

        if risk == RiskLevel::Green && factors.is_empty() {
            factors.push(NO_FACTORS_NOTE.to_string());
        }

        BaselineAssessment {
            severity,
            risk,
            factors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::StudentFeaturesBuilder;

    fn features(
        attendance: f32,
        cgpa: f32,
        backlogs: u32,
        fees_pending: bool,
        fees_due: f32,
        quiz: f32,
        engagement: f32,
    ) -> StudentFeatures {
        StudentFeaturesBuilder::new()
            .attendance(attendance)
            .cgpa(cgpa)
            .backlogs(backlogs)
            .fees_pending(fees_pending)
            .fees_amount_due(fees_due)
            .quiz_score_avg(quiz)
            .engagement(engagement)
            .counselling_sessions(0)
            .build()
    }

    #[test]
    fn test_healthy_student_is_green_with_note() {
        let classifier = BaselineClassifier::new();
        let out = classifier.assess(&features(92.0, 8.5, 0, false, 0.0, 75.0, 8.0));
        assert_eq!(out.risk, RiskLevel::Green);
        assert_eq!(out.severity, 0);
        assert_eq!(out.factors, vec![NO_FACTORS_NOTE.to_string()]);
    }

    #[test]
    fn test_struggling_student_is_red() {
        // 45% attendance (+4), 5.2 CGPA (+2), 3 backlogs (+3),
        // small fee pending (+1), engagement 2.0 (+1) = 11
        let classifier = BaselineClassifier::new();
        let out = classifier.assess(&features(45.0, 5.2, 3, true, 15_000.0, 60.0, 2.0));
        assert_eq!(out.severity, 11);
        assert_eq!(out.risk, RiskLevel::Red);
        assert!(out.factors.iter().any(|f| f.starts_with("Critical attendance")));
    }

    #[test]
    fn test_tier_cutoffs_are_inclusive() {
        let classifier = BaselineClassifier::new();
        // 70% attendance (+2), 5.5 CGPA (+2) = 4, exactly at yellow cutoff
        let yellow = classifier.assess(&features(70.0, 5.5, 0, false, 0.0, 60.0, 6.0));
        assert_eq!(yellow.severity, 4);
        assert_eq!(yellow.risk, RiskLevel::Yellow);

        // 45% attendance (+4), 4.5 CGPA (+3), 60% quiz, engagement 3.0 (+1) = 8
        let red = classifier.assess(&features(45.0, 4.5, 0, false, 0.0, 60.0, 3.0));
        assert_eq!(red.severity, 8);
        assert_eq!(red.risk, RiskLevel::Red);
    }

    #[test]
    fn test_factors_follow_rule_order() {
        let classifier = BaselineClassifier::new();
        let out = classifier.assess(&features(60.0, 4.5, 2, true, 60_000.0, 20.0, 1.0));
        let joined = out.factors.join("|");
        let attendance_pos = joined.find("attendance").unwrap();
        let cgpa_pos = joined.find("CGPA").unwrap();
        let backlog_pos = joined.find("backlogs").unwrap();
        let fee_pos = joined.find("fee pending").unwrap();
        let engagement_pos = joined.find("engagement").unwrap();
        let quiz_pos = joined.find("quiz").unwrap();
        assert!(attendance_pos < cgpa_pos);
        assert!(cgpa_pos < backlog_pos);
        assert!(backlog_pos < fee_pos);
        assert!(fee_pos < engagement_pos);
        assert!(engagement_pos < quiz_pos);
    }

    #[test]
    fn test_fee_bands_only_when_pending() {
        let classifier = BaselineClassifier::new();
        // Amount on record but flag cleared - no fee factor
        let out = classifier.assess(&features(90.0, 8.0, 0, false, 150_000.0, 70.0, 7.0));
        assert!(!out.factors.iter().any(|f| f.contains("fee")));

        let out = classifier.assess(&features(90.0, 8.0, 0, true, 150_000.0, 70.0, 7.0));
        assert!(out.factors.iter().any(|f| f.starts_with("Major fee pending")));
        assert_eq!(out.severity, 4);
    }

    #[test]
    fn test_sensitivity_presets_shift_tiers() {
        // Severity 3: 70% attendance (+2), quiz 20% (+1)
        let base = features(70.0, 8.0, 0, false, 0.0, 20.0, 6.0);
        let default_out = BaselineClassifier::new().assess(&base);
        assert_eq!(default_out.severity, 3);
        assert_eq!(default_out.risk, RiskLevel::Green);

        let high = BaselineClassifier::with_thresholds(RuleThresholds::high_sensitivity());
        assert_eq!(high.assess(&base).risk, RiskLevel::Yellow);
    }
}

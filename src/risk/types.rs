//! Risk Types
//!
//! Core data structures for risk classification. No logic here beyond
//! display helpers - the decision code lives in `fusion.rs` and the
//! baseline classifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cluster::ClusterId;
use crate::stage::Stage;

/// Three-tier risk classification shown to counselors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Performing fine, monitor periodically.
    Green,
    /// Needs attention, schedule support.
    Yellow,
    /// Immediate intervention required.
    Red,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Green => "green",
            RiskLevel::Yellow => "yellow",
            RiskLevel::Red => "red",
        }
    }

    /// 0 = green, 1 = yellow, 2 = red. Ordering for monotonicity checks.
    pub fn severity_level(&self) -> u8 {
        match self {
            RiskLevel::Green => 0,
            RiskLevel::Yellow => 1,
            RiskLevel::Red => 2,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Green => "#22c55e",
            RiskLevel::Yellow => "#eab308",
            RiskLevel::Red => "#ef4444",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Green => "Low Risk",
            RiskLevel::Yellow => "Medium Risk",
            RiskLevel::Red => "High Risk",
        }
    }

    /// Counselor-facing urgency line for dashboard cards.
    pub fn urgency(&self) -> &'static str {
        match self {
            RiskLevel::Green => "Monitor periodically",
            RiskLevel::Yellow => "Schedule counselling within 1 week",
            RiskLevel::Red => "Contact today, involve parents",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One fired rule predicate, rendered for humans. Ordering follows rule
/// priority, worst findings first.
pub type RiskFactor = String;

/// The complete output of one analysis pass. Created fresh per call and
/// owned by the caller; the engine never stores verdicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskVerdict {
    pub student_id: String,
    /// Tier from the deterministic threshold rules alone.
    pub baseline_risk: RiskLevel,
    /// Display rescaling of the model probability, 0-100.
    pub ml_risk_score: f32,
    /// Raw model probability in [0,1], never adjusted by the rule layer.
    pub dropout_probability: f32,
    /// Fused, authoritative tier.
    pub final_risk: RiskLevel,
    pub cluster_id: ClusterId,
    pub cluster_name: String,
    pub cluster_description: String,
    pub risk_factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
    pub stage: Stage,
    pub analyzed_at: DateTime<Utc>,
}

/// One slot of a batch scoring run, in input order. A failed item is an
/// explicit marker so downstream consumers can never mistake it for green.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BatchOutcome {
    Scored { verdict: Box<RiskVerdict> },
    Failed { student_id: String, error: String },
}

impl BatchOutcome {
    pub fn is_scored(&self) -> bool {
        matches!(self, BatchOutcome::Scored { .. })
    }

    pub fn verdict(&self) -> Option<&RiskVerdict> {
        match self {
            BatchOutcome::Scored { verdict } => Some(verdict),
            BatchOutcome::Failed { .. } => None,
        }
    }
}

//! Intervention Stage State Machine
//!
//! Three escalation stages with asymmetric movement: red jumps straight
//! to counselor-led, while recovery climbs down one stage per green
//! verdict. A student who just left red territory therefore keeps
//! elevated support for a while instead of being dropped back to
//! monitoring on the first good week.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::risk::RiskLevel;

/// Intervention intensity. Stage numbers are part of the external
/// contract (dashboards filter on them), so the mapping is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Stage {
    /// Stage 1: routine monitoring.
    Monitor,
    /// Stage 2: automated nudges and check-ins.
    AutomatedSupport,
    /// Stage 3: a counselor owns the case.
    CounselorLed,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Monitor, Stage::AutomatedSupport, Stage::CounselorLed];

    pub fn as_number(&self) -> u8 {
        match self {
            Stage::Monitor => 1,
            Stage::AutomatedSupport => 2,
            Stage::CounselorLed => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Stage> {
        match n {
            1 => Some(Stage::Monitor),
            2 => Some(Stage::AutomatedSupport),
            3 => Some(Stage::CounselorLed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Monitor => "monitor",
            Stage::AutomatedSupport => "automated_support",
            Stage::CounselorLed => "counselor_led",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Monitor => "Monitoring",
            Stage::AutomatedSupport => "Automated Support",
            Stage::CounselorLed => "Counselor-Led Intervention",
        }
    }

    fn step_down(&self) -> Stage {
        match self {
            Stage::Monitor => Stage::Monitor,
            Stage::AutomatedSupport => Stage::Monitor,
            Stage::CounselorLed => Stage::AutomatedSupport,
        }
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> u8 {
        stage.as_number()
    }
}

impl TryFrom<u8> for Stage {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Stage::from_number(value).ok_or_else(|| format!("stage out of range: {}", value))
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_number())
    }
}

/// Transition rule. Escalation is instant, de-escalation one stage at a
/// time, and yellow never lowers an already-elevated stage.
pub fn next_stage(current: Stage, risk: RiskLevel) -> Stage {
    match risk {
        RiskLevel::Green => current.step_down(),
        RiskLevel::Yellow => current.max(Stage::AutomatedSupport),
        RiskLevel::Red => Stage::CounselorLed,
    }
}

/// Per-student stage state. Mutated only through `apply`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRecord {
    pub current_stage: Stage,
    /// Risk level that caused the most recent stage change, if any.
    pub last_transition_risk: Option<RiskLevel>,
}

impl Default for StageRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl StageRecord {
    pub fn new() -> Self {
        Self {
            current_stage: Stage::Monitor,
            last_transition_risk: None,
        }
    }

    /// Advance the state machine one verdict. Returns an audit record
    /// when the stage actually moved.
    pub fn apply(&mut self, student_id: &str, risk: RiskLevel) -> Option<StageTransition> {
        let from = self.current_stage;
        let to = next_stage(from, risk);
        if to == from {
            return None;
        }
        self.current_stage = to;
        self.last_transition_risk = Some(risk);
        Some(StageTransition::new(student_id, from, to, risk))
    }
}

/// Audit record for one stage movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTransition {
    pub id: Uuid,
    pub student_id: String,
    pub from_stage: Stage,
    pub to_stage: Stage,
    /// Verdict that triggered the movement.
    pub risk: RiskLevel,
    pub at: DateTime<Utc>,
}

impl StageTransition {
    fn new(student_id: &str, from_stage: Stage, to_stage: Stage, risk: RiskLevel) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id: student_id.to_string(),
            from_stage,
            to_stage,
            risk,
            at: Utc::now(),
        }
    }
}

//! Baseline Risk Rules & Thresholds
//!
//! Threshold constants for the rule-based tier. No classification logic
//! here - just the numbers, so counselling staff can review them in one
//! place.

use serde::{Deserialize, Serialize};

// ============================================================================
// ATTENDANCE THRESHOLDS (percent, most institutions require 75%)
// ============================================================================

/// Below this = critical, +4 severity
pub const ATTENDANCE_CRITICAL: f32 = 50.0;

/// Below this = very low, +3 severity
pub const ATTENDANCE_VERY_LOW: f32 = 65.0;

/// Below this = under the institutional minimum, +2 severity
pub const ATTENDANCE_MINIMUM: f32 = 75.0;

/// Below this = mild concern, +1 severity
pub const ATTENDANCE_COMFORTABLE: f32 = 85.0;

// ============================================================================
// CGPA THRESHOLDS (0-10 scale, below 5.0 is typically failing)
// ============================================================================

/// Below this = failing territory, +4 severity
pub const CGPA_CRITICAL: f32 = 4.0;

/// Below this = at risk of failing, +3 severity
pub const CGPA_VERY_LOW: f32 = 5.0;

/// Below this = below average, +2 severity
pub const CGPA_BELOW_AVERAGE: f32 = 6.0;

/// Below this = could improve, +1 severity
pub const CGPA_TARGET: f32 = 7.0;

// ============================================================================
// BACKLOG THRESHOLDS (pending subjects delay graduation)
// ============================================================================

/// At or above this many backlogs, +4 severity
pub const BACKLOGS_HIGH: u32 = 5;

/// At or above this many backlogs, +3 severity
pub const BACKLOGS_MULTIPLE: u32 = 3;

// ============================================================================
// FEE THRESHOLDS (rupees due; financial stress is a major dropout driver)
// ============================================================================

/// Above this amount pending, +4 severity
pub const FEES_MAJOR: f32 = 100_000.0;

/// Above this amount pending, +3 severity
pub const FEES_SIGNIFICANT: f32 = 50_000.0;

/// Above this amount pending, +2 severity (any pending fee is at least +1)
pub const FEES_NOTABLE: f32 = 20_000.0;

// ============================================================================
// ENGAGEMENT & QUIZ THRESHOLDS
// ============================================================================

/// Engagement (0-10) below this, +2 severity
pub const ENGAGEMENT_VERY_LOW: f32 = 2.0;

/// Engagement (0-10) below this, +1 severity
pub const ENGAGEMENT_LOW: f32 = 4.0;

/// Quiz average (percent) below this, +1 severity
pub const QUIZ_POOR: f32 = 30.0;

// ============================================================================
// TIER CUTOFFS (Constants - defaults for the configurable struct below)
// ============================================================================

/// Total severity at or above this = red
pub const RED_SEVERITY_MIN: u8 = 8;

/// Total severity at or above this = yellow
pub const YELLOW_SEVERITY_MIN: u8 = 4;

// ============================================================================
// CONFIGURABLE CUTOFFS (for per-deployment tuning)
// ============================================================================

/// Severity cutoffs for the baseline tier (configurable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleThresholds {
    /// Severity at or above this = red
    pub red_severity_min: u8,
    /// Severity at or above this = yellow
    pub yellow_severity_min: u8,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            red_severity_min: RED_SEVERITY_MIN,
            yellow_severity_min: YELLOW_SEVERITY_MIN,
        }
    }
}

impl RuleThresholds {
    /// High sensitivity - lower cutoffs, more students flagged
    pub fn high_sensitivity() -> Self {
        Self {
            red_severity_min: 7,
            yellow_severity_min: 3,
        }
    }

    /// Low sensitivity - higher cutoffs, fewer students flagged
    pub fn low_sensitivity() -> Self {
        Self {
            red_severity_min: 10,
            yellow_severity_min: 5,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.yellow_severity_min > 0 && self.yellow_severity_min < self.red_severity_min
    }
}

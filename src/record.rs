//! External input shapes
//!
//! The engine consumes student records the persistence layer hands over and
//! does not validate referential existence, only field shape. Optional
//! fields absent here take the documented neutral defaults during
//! aggregation.

use serde::{Deserialize, Serialize};

/// A student record as supplied by the storage layer. Identity plus the
/// academic, financial, and behavioral signals the engine scores on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentRecord {
    /// External student identifier, e.g. "S001". Required and non-empty.
    pub student_id: String,

    // Profile context, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<u32>,

    // Academic indicators.
    #[serde(default)]
    pub attendance_percentage: Option<f32>,
    #[serde(default)]
    pub cgpa: Option<f32>,
    #[serde(default)]
    pub backlogs: Option<u32>,

    // Fee indicators.
    #[serde(default)]
    pub fees_pending: Option<bool>,
    #[serde(default)]
    pub fees_amount_due: Option<f32>,

    // Behavioral indicators.
    #[serde(default)]
    pub quiz_score_avg: Option<f32>,
    #[serde(default)]
    pub bot_engagement_score: Option<f32>,
    #[serde(default)]
    pub counselling_sessions: Option<u32>,
}

impl StudentRecord {
    pub fn new(student_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            ..Default::default()
        }
    }
}

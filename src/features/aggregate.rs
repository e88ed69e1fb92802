//! Feature Aggregator
//!
//! Normalizes a raw student record into the canonical feature vector. Pure
//! and deterministic: the same record always produces the same vector.
//! Missing optional fields take neutral defaults so a sparse record is not
//! mistaken for a failing student; a missing attendance figure in
//! particular falls back to the institution mean, not zero.

use serde::{Deserialize, Serialize};

use super::vector::StudentFeatures;
use crate::error::AnalysisError;
use crate::record::StudentRecord;

/// Neutral defaults applied when a record field is absent. The values are
/// mid-scale on purpose: an unreported signal must neither inflate nor mask
/// risk on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorDefaults {
    /// Stand-in for unknown attendance, typically the institution mean.
    pub attendance_mean: f32,
    /// Mid-band CGPA on the 0-10 scale.
    pub cgpa_neutral: f32,
    /// Mid-band quiz average on the 0-100 scale.
    pub quiz_neutral: f32,
    /// Mid-band engagement on the 0-10 scale.
    pub engagement_neutral: f32,
}

impl Default for AggregatorDefaults {
    fn default() -> Self {
        Self {
            attendance_mean: 75.0,
            cgpa_neutral: 6.0,
            quiz_neutral: 50.0,
            engagement_neutral: 5.0,
        }
    }
}

/// Build the feature vector for one record.
///
/// Fails only when a required field has no documented default; today that
/// is a blank `student_id`. Counts and amounts absent from the record
/// default to zero, which for those fields genuinely is neutral.
pub fn aggregate(
    record: &StudentRecord,
    defaults: &AggregatorDefaults,
) -> Result<StudentFeatures, AnalysisError> {
    if record.student_id.trim().is_empty() {
        return Err(AnalysisError::MissingField {
            field: "student_id",
        });
    }

    let attendance = record
        .attendance_percentage
        .unwrap_or(defaults.attendance_mean)
        .clamp(0.0, 100.0);
    let cgpa = record.cgpa.unwrap_or(defaults.cgpa_neutral).clamp(0.0, 10.0);
    let backlogs = record.backlogs.unwrap_or(0);
    let fees_pending = record.fees_pending.unwrap_or(false);
    let fees_amount_due = record.fees_amount_due.unwrap_or(0.0).max(0.0);
    let quiz_score_avg = record
        .quiz_score_avg
        .unwrap_or(defaults.quiz_neutral)
        .clamp(0.0, 100.0);
    let engagement = record
        .bot_engagement_score
        .unwrap_or(defaults.engagement_neutral)
        .clamp(0.0, 10.0);
    let counselling_sessions = record.counselling_sessions.unwrap_or(0);

    Ok(StudentFeatures::from_values([
        attendance,
        cgpa,
        backlogs as f32,
        if fees_pending { 1.0 } else { 0.0 },
        fees_amount_due,
        quiz_score_avg,
        engagement,
        counselling_sessions as f32,
    ]))
}

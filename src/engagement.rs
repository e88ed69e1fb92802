//! Engagement Score Updater
//!
//! Folds each daily check-in into the student's rolling engagement
//! score (0-10). The score moves toward a per-event target by a
//! smoothing factor with a hard step cap, so weeks of silence fade it
//! gradually and one enthusiastic evening cannot max it out.

use serde::{Deserialize, Serialize};

use crate::checkin::CheckinEvent;

/// Neutral starting score for students with no check-in history.
pub const NEUTRAL_ENGAGEMENT: f32 = 5.0;

/// Component weights for the per-event target. Sum to 1.
const MOOD_WEIGHT: f32 = 0.35;
const CALM_WEIGHT: f32 = 0.25;
const HOURS_WEIGHT: f32 = 0.25;
const COMPLETENESS_WEIGHT: f32 = 0.15;

/// Smoothing and step-cap parameters (configurable).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngagementConfig {
    /// Fraction of the gap to the target covered per event, in (0,1].
    pub smoothing: f32,
    /// Hard cap on how far one event can move the score.
    pub max_step: f32,
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.3,
            max_step: 1.5,
        }
    }
}

impl EngagementConfig {
    pub fn is_valid(&self) -> bool {
        self.smoothing > 0.0 && self.smoothing <= 1.0 && self.max_step > 0.0
    }
}

/// Fold one check-in into the score. Pure; the registry owns the state.
pub fn update_engagement(previous: f32, event: &CheckinEvent, config: &EngagementConfig) -> f32 {
    let target = event_target(event);
    let step = (config.smoothing * (target - previous)).clamp(-config.max_step, config.max_step);
    (previous + step).clamp(0.0, 10.0)
}

/// Target score for one event, in [0,10]. Missing answers take the
/// neutral midpoint; completeness separately rewards answering at all.
fn event_target(event: &CheckinEvent) -> f32 {
    let mood_score = match event.mood {
        Some(mood) => (mood.clamp(1.0, 5.0) - 1.0) / 4.0 * 10.0,
        None => NEUTRAL_ENGAGEMENT,
    };
    let calm_score = match event.stress {
        Some(stress) => (5.0 - stress.clamp(1.0, 5.0)) / 4.0 * 10.0,
        None => NEUTRAL_ENGAGEMENT,
    };
    let hours_score = match event.study_hours {
        Some(hours) => hours.clamp(0.0, 10.0),
        None => NEUTRAL_ENGAGEMENT,
    };
    let completeness_score = event.completeness() * 10.0;

    MOOD_WEIGHT * mood_score
        + CALM_WEIGHT * calm_score
        + HOURS_WEIGHT * hours_score
        + COMPLETENESS_WEIGHT * completeness_score
}

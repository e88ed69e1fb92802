//! Daily Check-ins
//!
//! The support bot asks every student a short daily question set; the
//! answers come back as a `CheckinEvent` and feed the engagement score.
//! Prompt selection is engine logic (it depends on the student's
//! cluster); delivery belongs to the bot layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cluster::ClusterId;
use crate::stage::Stage;

/// One question the bot can ask, with its answer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityPrompt {
    pub kind: &'static str,
    pub code: &'static str,
    pub question: &'static str,
    pub min_value: u8,
    pub max_value: u8,
}

const MOOD_PROMPT: ActivityPrompt = ActivityPrompt {
    kind: "mood",
    code: "MOOD_1_5",
    question: "On a scale 1-5, how is your mood today? (1=Very bad, 5=Great)",
    min_value: 1,
    max_value: 5,
};

const STUDY_HOURS_PROMPT: ActivityPrompt = ActivityPrompt {
    kind: "study_hours",
    code: "STUDY_HOURS_0_10",
    question: "How many hours did you study yesterday? (0-10)",
    min_value: 0,
    max_value: 10,
};

const STRESS_PROMPT: ActivityPrompt = ActivityPrompt {
    kind: "stress",
    code: "STRESS_1_5",
    question: "On a scale 1-5, how stressed do you feel about studies? (1=No stress, 5=Very high)",
    min_value: 1,
    max_value: 5,
};

const DOUBT_PROMPT: ActivityPrompt = ActivityPrompt {
    kind: "doubt_clearing",
    code: "DOUBT_0_1",
    question: "Do you have unresolved doubts in any subject? (0=No, 1=Yes)",
    min_value: 0,
    max_value: 1,
};

const FINANCIAL_WORRY_PROMPT: ActivityPrompt = ActivityPrompt {
    kind: "financial_worry",
    code: "FIN_WORRY_1_5",
    question: "On a scale 1-5, how worried are you about fees/finances?",
    min_value: 1,
    max_value: 5,
};

const MOTIVATION_PROMPT: ActivityPrompt = ActivityPrompt {
    kind: "engagement",
    code: "ENG_1_5",
    question: "On a scale 1-5, how motivated do you feel to attend classes today?",
    min_value: 1,
    max_value: 5,
};

/// Select today's question set: three base prompts for everyone plus
/// one keyed to the student's archetype.
pub fn select_prompts(cluster: Option<ClusterId>) -> Vec<ActivityPrompt> {
    let mut prompts = vec![MOOD_PROMPT, STUDY_HOURS_PROMPT, STRESS_PROMPT];
    prompts.push(match cluster {
        Some(ClusterId::AcademicStrugglers) => DOUBT_PROMPT,
        Some(ClusterId::FinanciallyStressed) => FINANCIAL_WORRY_PROMPT,
        _ => MOTIVATION_PROMPT,
    });
    prompts
}

/// Complete daily question set for one student, with the stage and
/// cluster context the bot layer echoes back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCheckup {
    pub student_id: String,
    pub stage: Stage,
    pub cluster: Option<ClusterId>,
    pub activities: Vec<ActivityPrompt>,
}

impl DailyCheckup {
    pub fn build(student_id: &str, stage: Stage, cluster: Option<ClusterId>) -> Self {
        Self {
            student_id: student_id.to_string(),
            stage,
            cluster,
            activities: select_prompts(cluster),
        }
    }
}

/// One answered prompt inside a check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptResponse {
    pub code: String,
    pub score: f32,
}

/// A student's answers for one day, as reported by the bot layer.
/// Unanswered prompts arrive as `None`; out-of-range answers are
/// clamped by the engagement updater, not rejected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinEvent {
    pub student_id: String,
    /// Mood, 1-5.
    #[serde(default)]
    pub mood: Option<f32>,
    /// Study stress, 1-5. Higher is worse.
    #[serde(default)]
    pub stress: Option<f32>,
    /// Hours studied yesterday, 0-10.
    #[serde(default)]
    pub study_hours: Option<f32>,
    /// Cluster-specific answers, keyed by prompt code.
    #[serde(default)]
    pub responses: Vec<PromptResponse>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl CheckinEvent {
    pub fn new(student_id: &str) -> Self {
        Self {
            student_id: student_id.to_string(),
            mood: None,
            stress: None,
            study_hours: None,
            responses: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Fraction of the core prompts answered, in [0,1].
    pub fn completeness(&self) -> f32 {
        let answered = [
            self.mood.is_some(),
            self.stress.is_some(),
            self.study_hours.is_some(),
        ]
        .iter()
        .filter(|&&a| a)
        .count();
        answered as f32 / 3.0
    }
}

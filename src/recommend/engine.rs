//! Recommendation Engine
//!
//! Turns a finished analysis into the action list counselors see.
//! Templates are keyed off the same threshold bands the baseline rules
//! use, plus cluster profile and stage context. Yellow and red verdicts
//! are guaranteed at least one actionable item.

use crate::baseline::rules::{
    ATTENDANCE_CRITICAL, ATTENDANCE_MINIMUM, ATTENDANCE_VERY_LOW, BACKLOGS_HIGH,
    BACKLOGS_MULTIPLE, CGPA_BELOW_AVERAGE, CGPA_CRITICAL, CGPA_VERY_LOW, FEES_MAJOR,
    FEES_SIGNIFICANT,
};
use crate::cluster::ClusterId;
use crate::features::StudentFeatures;
use crate::risk::RiskLevel;
use crate::stage::Stage;

/// Engagement (0-10) below this triggers the full re-engagement push.
const ENGAGEMENT_OUTREACH: f32 = 3.0;

/// Engagement (0-10) below this triggers lighter nudges.
const ENGAGEMENT_NUDGE: f32 = 5.0;

/// Quiz average (percent) below this triggers practice drills.
const QUIZ_DRILL: f32 = 40.0;

/// Counselling is nudged until this many sessions are on record.
const COUNSELLING_TARGET_SESSIONS: u32 = 3;

/// Fail-closed default so a flagged student never leaves with an empty
/// action list.
pub const FALLBACK_RECOMMENDATION: &str = "Schedule monitoring check-in";

/// Build the recommendation list for one verdict. Order: priority
/// header, per-band actions, counselling nudges, stage context, cluster
/// profile.
pub fn recommend(
    features: &StudentFeatures,
    final_risk: RiskLevel,
    cluster: ClusterId,
    stage: Stage,
) -> Vec<String> {
    let mut recs: Vec<String> = Vec::new();

    // ========================================================================
    // ATTENDANCE
    // ========================================================================

    let attendance = features.attendance();
    if attendance < ATTENDANCE_CRITICAL {
        recs.extend([
            "URGENT: Schedule immediate meeting with student".to_string(),
            "Set up daily attendance alerts to parent".to_string(),
            "Assign a peer buddy to accompany student to classes".to_string(),
            "Investigate root cause (health, transport, family issues)".to_string(),
            "Parent phone call within 24 hours".to_string(),
        ]);
    } else if attendance < ATTENDANCE_VERY_LOW {
        recs.extend([
            "Schedule parent-teacher meeting within 3 days".to_string(),
            "Weekly attendance monitoring with class teacher".to_string(),
            "Counselling session to understand absence reasons".to_string(),
            "Enable attendance notifications to student".to_string(),
        ]);
    } else if attendance < ATTENDANCE_MINIMUM {
        recs.extend([
            "Weekly attendance check-ins".to_string(),
            "Set attendance improvement target (80%)".to_string(),
            "Discuss importance of attendance with student".to_string(),
        ]);
    }

    // ========================================================================
    // ACADEMICS
    // ========================================================================

    let cgpa = features.cgpa();
    if cgpa < CGPA_CRITICAL {
        recs.extend([
            "Enroll in intensive remedial program".to_string(),
            "Assign dedicated faculty mentor".to_string(),
            "Daily supervised study hours (2-3 hrs)".to_string(),
            "Focus on clearing current subjects before backlogs".to_string(),
        ]);
    } else if cgpa < CGPA_VERY_LOW {
        recs.extend([
            "Mandatory remedial classes for weak subjects".to_string(),
            "Pair with high-performing peer tutor".to_string(),
            "Create personalized study timetable".to_string(),
            "Set target: clear all current subjects".to_string(),
        ]);
    } else if cgpa < CGPA_BELOW_AVERAGE {
        recs.extend([
            "Identify and focus on 2-3 weak subjects".to_string(),
            "Connect with subject teachers for extra help".to_string(),
            "Recommend online resources and tutorials".to_string(),
        ]);
    }

    let backlogs = features.backlogs();
    if backlogs >= BACKLOGS_HIGH {
        recs.extend([
            "Create backlog clearance plan (prioritize by difficulty)".to_string(),
            "Register for upcoming supplementary exams".to_string(),
            "Assign subject-specific mentors".to_string(),
            "Consider course load reduction if allowed".to_string(),
        ]);
    } else if backlogs >= BACKLOGS_MULTIPLE {
        recs.extend([
            "Prioritize backlog subjects for next exam".to_string(),
            "Provide previous year question papers".to_string(),
            "Form study group with students having same backlogs".to_string(),
        ]);
    } else if backlogs >= 1 {
        recs.push(format!(
            "Focus on clearing {} backlog(s) in next attempt",
            backlogs
        ));
        recs.push("Mark supplementary exam dates".to_string());
    }

    // ========================================================================
    // FINANCES
    // ========================================================================

    if features.fees_pending() {
        let due = features.fees_amount_due();
        if due > FEES_MAJOR {
            recs.extend([
                "Urgent meeting with accounts department".to_string(),
                "Check eligibility for government scholarships".to_string(),
                "Discuss education loan options".to_string(),
                "Apply for fee waiver/reduction (if eligible)".to_string(),
                "Connect with alumni assistance programs".to_string(),
            ]);
        } else if due > FEES_SIGNIFICANT {
            recs.extend([
                "Set up fee installment plan".to_string(),
                "Apply for merit/need-based scholarships".to_string(),
                "Check state government fee reimbursement schemes".to_string(),
            ]);
        } else {
            recs.extend([
                "Remind about fee payment deadline".to_string(),
                "Share scholarship/financial aid information".to_string(),
            ]);
        }
    }

    // ========================================================================
    // ENGAGEMENT & QUIZZES
    // ========================================================================

    let engagement = features.engagement();
    if engagement < ENGAGEMENT_OUTREACH {
        recs.extend([
            "Personalized outreach with interesting content".to_string(),
            "Introduce gamified learning challenges".to_string(),
            "Offer small rewards for engagement milestones".to_string(),
            "Send motivational messages and success stories".to_string(),
        ]);
    } else if engagement < ENGAGEMENT_NUDGE {
        recs.extend([
            "Set daily engagement targets".to_string(),
            "Send reminders for pending activities".to_string(),
            "Highlight leaderboard position to motivate".to_string(),
        ]);
    }

    if features.quiz_score_avg() < QUIZ_DRILL {
        recs.extend([
            "Daily micro-quizzes on weak topics".to_string(),
            "Quiz competitions with peers".to_string(),
            "Track quiz improvement weekly".to_string(),
        ]);
    }

    // ========================================================================
    // COUNSELLING
    // ========================================================================

    let sessions = features.counselling_sessions();
    if sessions == 0 {
        recs.push("Schedule first counselling session this week".to_string());
    } else if sessions < COUNSELLING_TARGET_SESSIONS && final_risk != RiskLevel::Green {
        recs.push(format!("Continue counselling (session {} due)", sessions + 1));
    }

    // ========================================================================
    // STAGE CONTEXT
    // ========================================================================

    match stage {
        Stage::Monitor => {}
        Stage::AutomatedSupport => {
            recs.push("Enroll student in automated daily check-in reminders".to_string());
        }
        Stage::CounselorLed => {
            recs.push("Assign a counselor as case owner with weekly reviews".to_string());
        }
    }

    // Flagged student with nothing actionable fired: fail closed.
    if recs.is_empty() && final_risk != RiskLevel::Green {
        recs.push(FALLBACK_RECOMMENDATION.to_string());
    }

    // ========================================================================
    // CLUSTER PROFILE & PRIORITY HEADER
    // ========================================================================

    let profile = cluster.profile();
    recs.push(format!("Student profile: {}", profile.name));
    recs.push(format!("Recommended focus: {}", profile.recommended_focus));

    match final_risk {
        RiskLevel::Red => {
            recs.insert(0, "PRIORITY HIGH: action needed within 24 hours".to_string());
        }
        RiskLevel::Yellow => {
            recs.insert(0, "PRIORITY MEDIUM: action needed within 1 week".to_string());
        }
        RiskLevel::Green => {}
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::StudentFeaturesBuilder;

    fn healthy() -> StudentFeatures {
        StudentFeaturesBuilder::new()
            .attendance(92.0)
            .cgpa(8.5)
            .backlogs(0)
            .fees_pending(false)
            .fees_amount_due(0.0)
            .quiz_score_avg(75.0)
            .engagement(8.0)
            .counselling_sessions(3)
            .build()
    }

    #[test]
    fn test_red_verdict_gets_priority_header_first() {
        let features = StudentFeaturesBuilder::new()
            .attendance(45.0)
            .cgpa(5.2)
            .backlogs(3)
            .fees_pending(true)
            .fees_amount_due(15_000.0)
            .quiz_score_avg(60.0)
            .engagement(2.0)
            .counselling_sessions(1)
            .build();
        let recs = recommend(
            &features,
            RiskLevel::Red,
            ClusterId::Disengaged,
            Stage::CounselorLed,
        );
        assert!(recs[0].starts_with("PRIORITY HIGH"));
        assert!(recs.iter().any(|r| r.starts_with("URGENT")));
        assert!(recs.iter().any(|r| r.contains("counselling (session 2 due)")));
        assert!(recs.iter().any(|r| r.contains("case owner")));
        assert!(recs.iter().any(|r| r.contains("Disengaged Students")));
    }

    #[test]
    fn test_green_healthy_student_gets_profile_only() {
        let recs = recommend(
            &healthy(),
            RiskLevel::Green,
            ClusterId::HighPerformers,
            Stage::Monitor,
        );
        assert_eq!(recs.len(), 2);
        assert!(recs[0].starts_with("Student profile"));
        assert!(recs[1].starts_with("Recommended focus"));
    }

    #[test]
    fn test_model_escalated_yellow_falls_back_to_check_in() {
        // Healthy features but the model flagged the student: no band
        // fires, the fallback must.
        let recs = recommend(
            &healthy(),
            RiskLevel::Yellow,
            ClusterId::HighPerformers,
            Stage::AutomatedSupport,
        );
        assert!(recs[0].starts_with("PRIORITY MEDIUM"));
        assert!(recs.iter().any(|r| r.contains("automated daily check-in")));
    }

    #[test]
    fn test_fallback_fires_when_nothing_else_does() {
        // Monitor stage + healthy features + yellow verdict leaves no
        // actionable template, so the generic check-in appears.
        let recs = recommend(
            &healthy(),
            RiskLevel::Yellow,
            ClusterId::HighPerformers,
            Stage::Monitor,
        );
        assert!(recs.contains(&FALLBACK_RECOMMENDATION.to_string()));
    }

    #[test]
    fn test_first_counselling_session_nudge() {
        let features = StudentFeaturesBuilder::new()
            .attendance(92.0)
            .cgpa(8.5)
            .quiz_score_avg(75.0)
            .engagement(8.0)
            .counselling_sessions(0)
            .build();
        let recs = recommend(
            &features,
            RiskLevel::Green,
            ClusterId::HighPerformers,
            Stage::Monitor,
        );
        assert!(recs.iter().any(|r| r.contains("first counselling session")));
    }

    #[test]
    fn test_financial_band_scales_with_amount() {
        let base = StudentFeaturesBuilder::new()
            .attendance(92.0)
            .cgpa(8.5)
            .quiz_score_avg(75.0)
            .engagement(8.0)
            .counselling_sessions(3)
            .fees_pending(true);

        let major = recommend(
            &base.clone().fees_amount_due(150_000.0).build(),
            RiskLevel::Yellow,
            ClusterId::FinanciallyStressed,
            Stage::AutomatedSupport,
        );
        assert!(major.iter().any(|r| r.contains("accounts department")));

        let minor = recommend(
            &base.fees_amount_due(5_000.0).build(),
            RiskLevel::Yellow,
            ClusterId::FinanciallyStressed,
            Stage::AutomatedSupport,
        );
        assert!(minor.iter().any(|r| r.contains("fee payment deadline")));
        assert!(!minor.iter().any(|r| r.contains("accounts department")));
    }
}

//! Intervention Playbooks
//!
//! Ordered phase checklists per risk tier, rendered verbatim in the
//! counselor UI. Static catalog data.

use serde::Serialize;

use crate::risk::RiskLevel;

/// One phase of an intervention playbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaybookPhase {
    pub step: u8,
    pub name: &'static str,
    pub timeline: &'static str,
    pub actions: &'static [&'static str],
}

const RED_PLAYBOOK: &[PlaybookPhase] = &[
    PlaybookPhase {
        step: 1,
        name: "Immediate Contact",
        timeline: "Within 24 hours",
        actions: &[
            "Call student",
            "Call parent/guardian",
            "Email class teacher",
            "Document contact attempts",
        ],
    },
    PlaybookPhase {
        step: 2,
        name: "Assessment Meeting",
        timeline: "Within 48 hours",
        actions: &[
            "Face-to-face meeting with student",
            "Identify root causes",
            "Assess mental health status",
            "Create immediate action plan",
        ],
    },
    PlaybookPhase {
        step: 3,
        name: "Parent Meeting",
        timeline: "Within 1 week",
        actions: &[
            "Schedule parent meeting",
            "Discuss concerns and plan",
            "Get parent commitment",
            "Set up monitoring agreement",
        ],
    },
    PlaybookPhase {
        step: 4,
        name: "Intensive Support",
        timeline: "Ongoing - 1 month",
        actions: &[
            "Weekly check-ins",
            "Academic support activation",
            "Financial aid processing",
            "Progress monitoring",
        ],
    },
];

const YELLOW_PLAYBOOK: &[PlaybookPhase] = &[
    PlaybookPhase {
        step: 1,
        name: "Initial Outreach",
        timeline: "Within 1 week",
        actions: &[
            "Send personalized message",
            "Schedule counselling session",
            "Notify class teacher",
        ],
    },
    PlaybookPhase {
        step: 2,
        name: "Counselling Session",
        timeline: "Within 2 weeks",
        actions: &[
            "Conduct assessment",
            "Identify specific issues",
            "Create improvement plan",
        ],
    },
    PlaybookPhase {
        step: 3,
        name: "Monitoring",
        timeline: "Ongoing - 2 weeks",
        actions: &[
            "Bi-weekly check-ins",
            "Track attendance and grades",
            "Adjust plan if needed",
        ],
    },
];

const GREEN_PLAYBOOK: &[PlaybookPhase] = &[PlaybookPhase {
    step: 1,
    name: "Periodic Check",
    timeline: "Monthly",
    actions: &[
        "Monitor dashboard metrics",
        "Celebrate achievements",
        "Maintain engagement",
    ],
}];

/// Playbook for a tier, most urgent phases first.
pub fn intervention_playbook(risk: RiskLevel) -> &'static [PlaybookPhase] {
    match risk {
        RiskLevel::Red => RED_PLAYBOOK,
        RiskLevel::Yellow => YELLOW_PLAYBOOK,
        RiskLevel::Green => GREEN_PLAYBOOK,
    }
}

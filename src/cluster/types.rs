//! Cluster Types
//!
//! Archetype identifiers and their counselor-facing profiles. Cluster
//! indices are part of the stored-artifact contract (centroid files
//! address clusters by index), so the mapping here never changes
//! between releases without a layout version bump.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The four student archetypes the centroid model assigns to.
///
/// Indices match the centroid artifact ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ClusterId {
    HighPerformers,
    AcademicStrugglers,
    FinanciallyStressed,
    Disengaged,
}

pub const CLUSTER_COUNT: usize = 4;

impl ClusterId {
    pub const ALL: [ClusterId; CLUSTER_COUNT] = [
        ClusterId::HighPerformers,
        ClusterId::AcademicStrugglers,
        ClusterId::FinanciallyStressed,
        ClusterId::Disengaged,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<ClusterId> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterId::HighPerformers => "high_performers",
            ClusterId::AcademicStrugglers => "academic_strugglers",
            ClusterId::FinanciallyStressed => "financially_stressed",
            ClusterId::Disengaged => "disengaged",
        }
    }

    /// Tie-break ordering for near-equal centroid distances: the more
    /// worrying archetype wins. Disengagement is the strongest dropout
    /// precursor, so it ranks highest.
    pub fn severity_rank(&self) -> u8 {
        match self {
            ClusterId::HighPerformers => 0,
            ClusterId::AcademicStrugglers => 1,
            ClusterId::FinanciallyStressed => 2,
            ClusterId::Disengaged => 3,
        }
    }

    pub fn profile(&self) -> &'static ClusterProfile {
        &CLUSTER_CATALOG[self.index()]
    }
}

impl From<ClusterId> for u8 {
    fn from(id: ClusterId) -> u8 {
        id.index() as u8
    }
}

impl TryFrom<u8> for ClusterId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ClusterId::from_index(value as usize)
            .ok_or_else(|| format!("cluster index out of range: {}", value))
    }
}

impl std::fmt::Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Counselor-facing description of an archetype. Static catalog data,
/// not part of any trained artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterProfile {
    pub id: ClusterId,
    pub name: String,
    pub description: String,
    pub typical_issues: Vec<String>,
    pub recommended_focus: String,
}

static CLUSTER_CATALOG: Lazy<[ClusterProfile; CLUSTER_COUNT]> = Lazy::new(|| {
    [
        ClusterProfile {
            id: ClusterId::HighPerformers,
            name: "High Performers".to_string(),
            description: "Students with strong academics and good engagement".to_string(),
            typical_issues: vec![
                "May face burnout from overwork".to_string(),
                "Peer pressure to maintain performance".to_string(),
                "May neglect extracurriculars".to_string(),
            ],
            recommended_focus: "Maintain motivation, offer leadership opportunities, ensure work-life balance"
                .to_string(),
        },
        ClusterProfile {
            id: ClusterId::AcademicStrugglers,
            name: "Academic Strugglers".to_string(),
            description: "Students with low CGPA and multiple backlogs".to_string(),
            typical_issues: vec![
                "Learning difficulties or gaps".to_string(),
                "Wrong course/stream choice".to_string(),
                "Lack of study skills".to_string(),
                "Possible learning disabilities".to_string(),
            ],
            recommended_focus:
                "Academic mentoring, remedial classes, peer tutoring, study skill workshops"
                    .to_string(),
        },
        ClusterProfile {
            id: ClusterId::FinanciallyStressed,
            name: "Financially Stressed".to_string(),
            description: "Students with pending fees and financial constraints".to_string(),
            typical_issues: vec![
                "Family financial problems".to_string(),
                "May be working part-time".to_string(),
                "Stress affecting studies".to_string(),
                "May skip classes for work".to_string(),
            ],
            recommended_focus:
                "Scholarship information, fee installment plans, work-study programs, financial counselling"
                    .to_string(),
        },
        ClusterProfile {
            id: ClusterId::Disengaged,
            name: "Disengaged Students".to_string(),
            description: "Low attendance, low engagement, disconnected from college".to_string(),
            typical_issues: vec![
                "Lack of interest in course".to_string(),
                "Personal or family problems".to_string(),
                "Mental health issues".to_string(),
                "Peer group influence".to_string(),
            ],
            recommended_focus:
                "One-on-one counselling, interest assessment, parent meeting, mental health support"
                    .to_string(),
        },
    ]
});

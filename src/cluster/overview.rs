//! Cluster Overview
//!
//! Folds per-student observations into the per-cluster totals the
//! counselor dashboard renders. Pure aggregation; the caller supplies
//! whatever population it is looking at.

use serde::{Deserialize, Serialize};

use super::types::{ClusterId, CLUSTER_COUNT};
use crate::risk::RiskLevel;
use crate::stage::Stage;

/// Dashboard summary for one cluster. Every cluster appears even when
/// empty so the dashboard layout is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterOverview {
    pub cluster_id: ClusterId,
    pub name: String,
    pub description: String,
    pub typical_issues: Vec<String>,
    pub recommended_focus: String,
    pub total_students: usize,
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
    pub stage1: usize,
    pub stage2: usize,
    pub stage3: usize,
}

impl ClusterOverview {
    fn empty(id: ClusterId) -> Self {
        let profile = id.profile();
        Self {
            cluster_id: id,
            name: profile.name.clone(),
            description: profile.description.clone(),
            typical_issues: profile.typical_issues.clone(),
            recommended_focus: profile.recommended_focus.clone(),
            total_students: 0,
            green: 0,
            yellow: 0,
            red: 0,
            stage1: 0,
            stage2: 0,
            stage3: 0,
        }
    }

    fn record(&mut self, risk: RiskLevel, stage: Stage) {
        self.total_students += 1;
        match risk {
            RiskLevel::Green => self.green += 1,
            RiskLevel::Yellow => self.yellow += 1,
            RiskLevel::Red => self.red += 1,
        }
        match stage {
            Stage::Monitor => self.stage1 += 1,
            Stage::AutomatedSupport => self.stage2 += 1,
            Stage::CounselorLed => self.stage3 += 1,
        }
    }
}

/// Build the overview for one population snapshot, ordered by cluster
/// index.
pub fn cluster_overview(
    observations: impl IntoIterator<Item = (ClusterId, RiskLevel, Stage)>,
) -> Vec<ClusterOverview> {
    let mut summaries: Vec<ClusterOverview> =
        ClusterId::ALL.iter().map(|&id| ClusterOverview::empty(id)).collect();

    for (cluster, risk, stage) in observations {
        summaries[cluster.index()].record(risk, stage);
    }

    debug_assert_eq!(summaries.len(), CLUSTER_COUNT);
    summaries
}

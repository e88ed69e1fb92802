//! Student State Registry
//!
//! The only mutable state in the engine: per-student stage record,
//! engagement score and last assigned cluster, plus the stage
//! transition audit log. Same-student updates serialize on the
//! student's own lock; different students never contend.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::checkin::CheckinEvent;
use crate::cluster::ClusterId;
use crate::engagement::{update_engagement, EngagementConfig, NEUTRAL_ENGAGEMENT};
use crate::risk::RiskLevel;
use crate::stage::{Stage, StageRecord, StageTransition};

/// Mutable per-student state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentState {
    pub stage: StageRecord,
    pub engagement: f32,
    pub last_cluster: Option<ClusterId>,
    pub last_risk: Option<RiskLevel>,
}

impl Default for StudentState {
    fn default() -> Self {
        Self {
            stage: StageRecord::new(),
            engagement: NEUTRAL_ENGAGEMENT,
            last_cluster: None,
            last_risk: None,
        }
    }
}

/// Read-only copy of one student's state for callers and logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSnapshot {
    pub student_id: String,
    pub stage: Stage,
    pub engagement: f32,
    pub last_cluster: Option<ClusterId>,
    pub last_risk: Option<RiskLevel>,
}

/// Registry of per-student state. Owned by the engine, never global.
#[derive(Debug, Default)]
pub struct StudentRegistry {
    students: RwLock<HashMap<String, Arc<Mutex<StudentState>>>>,
    transitions: Mutex<Vec<StageTransition>>,
}

impl StudentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for one student, created on first sight.
    fn handle(&self, student_id: &str) -> Arc<Mutex<StudentState>> {
        if let Some(existing) = self.students.read().get(student_id) {
            return Arc::clone(existing);
        }
        let mut students = self.students.write();
        Arc::clone(
            students
                .entry(student_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(StudentState::default()))),
        )
    }

    /// Fold one verdict into the student's stage and remember the
    /// cluster. Returns the stage after the update.
    pub fn observe_risk(&self, student_id: &str, risk: RiskLevel, cluster: ClusterId) -> Stage {
        let handle = self.handle(student_id);
        let (stage_after, transition) = {
            let mut state = handle.lock();
            state.last_cluster = Some(cluster);
            state.last_risk = Some(risk);
            let transition = state.stage.apply(student_id, risk);
            (state.stage.current_stage, transition)
        };
        if let Some(t) = transition {
            log::info!(
                "Stage transition for {}: {} -> {} ({})",
                student_id,
                t.from_stage,
                t.to_stage,
                t.risk
            );
            self.transitions.lock().push(t);
        }
        stage_after
    }

    /// Fold one check-in into the student's engagement score. Returns
    /// the new score.
    pub fn record_checkin(&self, event: &CheckinEvent, config: &EngagementConfig) -> f32 {
        let handle = self.handle(&event.student_id);
        let mut state = handle.lock();
        state.engagement = update_engagement(state.engagement, event, config);
        state.engagement
    }

    /// Engagement score fed into analysis when the record carries none.
    pub fn engagement(&self, student_id: &str) -> Option<f32> {
        let students = self.students.read();
        students.get(student_id).map(|s| s.lock().engagement)
    }

    /// Stage and cluster context for building a daily check-up.
    /// Unknown students get the defaults.
    pub fn checkup_context(&self, student_id: &str) -> (Stage, Option<ClusterId>) {
        let students = self.students.read();
        match students.get(student_id) {
            Some(handle) => {
                let state = handle.lock();
                (state.stage.current_stage, state.last_cluster)
            }
            None => (Stage::Monitor, None),
        }
    }

    pub fn snapshot(&self, student_id: &str) -> Option<StudentSnapshot> {
        let handle = {
            let students = self.students.read();
            students.get(student_id).cloned()
        }?;
        let state = handle.lock();
        Some(StudentSnapshot {
            student_id: student_id.to_string(),
            stage: state.stage.current_stage,
            engagement: state.engagement,
            last_cluster: state.last_cluster,
            last_risk: state.last_risk,
        })
    }

    /// Every tracked student's snapshot, unordered.
    pub fn snapshots(&self) -> Vec<StudentSnapshot> {
        let handles: Vec<(String, Arc<Mutex<StudentState>>)> = {
            let students = self.students.read();
            students
                .iter()
                .map(|(id, handle)| (id.clone(), Arc::clone(handle)))
                .collect()
        };
        handles
            .into_iter()
            .map(|(student_id, handle)| {
                let state = handle.lock();
                StudentSnapshot {
                    student_id,
                    stage: state.stage.current_stage,
                    engagement: state.engagement,
                    last_cluster: state.last_cluster,
                    last_risk: state.last_risk,
                }
            })
            .collect()
    }

    /// Copy of the stage transition audit log, oldest first.
    pub fn transition_log(&self) -> Vec<StageTransition> {
        self.transitions.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.students.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.read().is_empty()
    }
}

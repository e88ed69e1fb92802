//! Risk Engine
//!
//! The full analysis pipeline behind one handle:
//!
//! record -> features -> rule baseline -> model score -> cluster
//!        -> fused tier -> stage update -> recommendations -> verdict
//!
//! Artifacts sit behind RwLock'd Arcs: a reload builds the replacement
//! completely, then swaps the handle, so in-flight calls finish on the
//! generation they started with.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

use crate::baseline::BaselineClassifier;
use crate::checkin::{CheckinEvent, DailyCheckup};
use crate::cluster::{cluster_overview, CentroidSet, ClusterEngine, ClusterOverview};
use crate::config::EngineConfig;
use crate::error::{AnalysisError, ConfigError};
use crate::features::{aggregate, LayoutInfo};
use crate::model::{FeatureImportance, RiskModel};
use crate::record::StudentRecord;
use crate::recommend::recommend;
use crate::registry::{StudentRegistry, StudentSnapshot};
use crate::risk::{fuse, BatchOutcome, RiskVerdict};
use crate::stage::StageTransition;

/// Engine health for dashboards and startup logs.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub model_source: String,
    pub model_loaded_at: DateTime<Utc>,
    pub students_tracked: usize,
    pub layout: LayoutInfo,
}

/// One engine instance: immutable config, swappable artifacts, owned
/// student state. Shareable across threads behind an `Arc`.
#[derive(Debug)]
pub struct RiskEngine {
    config: EngineConfig,
    classifier: BaselineClassifier,
    model: RwLock<Arc<RiskModel>>,
    clusters: RwLock<Arc<ClusterEngine>>,
    registry: StudentRegistry,
}

impl RiskEngine {
    /// Build an engine from validated parts. Fails fast on a bad
    /// config; artifact validation already happened in the loaders.
    pub fn new(
        config: EngineConfig,
        model: RiskModel,
        centroids: CentroidSet,
    ) -> Result<Self, ConfigError> {
        config.validate("engine config")?;
        let clusters = ClusterEngine::with_epsilon(centroids, config.assignment_epsilon);
        let classifier = BaselineClassifier::with_thresholds(config.rules);

        log::info!(
            "Risk engine up (model: {}, layout v{})",
            model.source(),
            LayoutInfo::current().version
        );

        Ok(Self {
            config,
            classifier,
            model: RwLock::new(Arc::new(model)),
            clusters: RwLock::new(Arc::new(clusters)),
            registry: StudentRegistry::new(),
        })
    }

    /// Run the full pipeline for one student.
    pub fn analyze(&self, record: &StudentRecord) -> Result<RiskVerdict, AnalysisError> {
        // A record without an engagement figure falls back to the score
        // this engine has been tracking from check-ins.
        let mut record = record.clone();
        if record.bot_engagement_score.is_none() {
            record.bot_engagement_score = self.registry.engagement(&record.student_id);
        }

        let features = aggregate(&record, &self.config.aggregator)?;

        let baseline = self.classifier.assess(&features);

        let model = Arc::clone(&self.model.read());
        let score = model.score(&features);

        let clusters = Arc::clone(&self.clusters.read());
        let assignment = clusters.assign(&features);

        let final_risk = fuse(baseline.risk, score.dropout_probability, &self.config.fusion);

        let stage = self
            .registry
            .observe_risk(&record.student_id, final_risk, assignment.cluster);

        let recommendations = recommend(&features, final_risk, assignment.cluster, stage);

        let profile = assignment.cluster.profile();
        let verdict = RiskVerdict {
            student_id: record.student_id.clone(),
            baseline_risk: baseline.risk,
            ml_risk_score: score.ml_risk_score,
            dropout_probability: score.dropout_probability,
            final_risk,
            cluster_id: assignment.cluster,
            cluster_name: profile.name.clone(),
            cluster_description: profile.description.clone(),
            risk_factors: baseline.factors,
            recommendations,
            stage,
            analyzed_at: Utc::now(),
        };

        log::debug!(
            "Analyzed {}: baseline {}, p={:.3}, final {}, cluster {}, stage {}",
            verdict.student_id,
            verdict.baseline_risk,
            verdict.dropout_probability,
            verdict.final_risk,
            verdict.cluster_id,
            verdict.stage
        );

        Ok(verdict)
    }

    /// Score a whole cohort, one outcome slot per input record, in
    /// input order. A bad record marks its slot and the batch goes on.
    pub fn analyze_batch(&self, records: &[StudentRecord]) -> Vec<BatchOutcome> {
        let mut outcomes = Vec::with_capacity(records.len());
        for record in records {
            match self.analyze(record) {
                Ok(verdict) => outcomes.push(BatchOutcome::Scored {
                    verdict: Box::new(verdict),
                }),
                Err(e) => {
                    log::warn!("Skipping record '{}': {}", record.student_id, e);
                    outcomes.push(BatchOutcome::Failed {
                        student_id: record.student_id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
        outcomes
    }

    /// Swap in a retrained model. In-flight analyses keep the old one.
    pub fn reload_model(&self, model: RiskModel) {
        log::info!("Swapping risk model (new source: {})", model.source());
        *self.model.write() = Arc::new(model);
    }

    /// Swap in a refreshed centroid set.
    pub fn reload_centroids(&self, centroids: CentroidSet) {
        log::info!("Swapping cluster centroids");
        let engine = ClusterEngine::with_epsilon(centroids, self.config.assignment_epsilon);
        *self.clusters.write() = Arc::new(engine);
    }

    /// Fold a daily check-in into the student's engagement score.
    /// Returns the updated score.
    pub fn record_checkin(&self, event: &CheckinEvent) -> f32 {
        self.registry.record_checkin(event, &self.config.engagement)
    }

    /// Today's question set for one student.
    pub fn daily_checkup(&self, student_id: &str) -> DailyCheckup {
        let (stage, cluster) = self.registry.checkup_context(student_id);
        DailyCheckup::build(student_id, stage, cluster)
    }

    /// Per-cluster dashboard totals over every student this engine has
    /// analyzed so far.
    pub fn cluster_overview(&self) -> Vec<ClusterOverview> {
        let observations = self.registry.snapshots().into_iter().filter_map(|snap| {
            match (snap.last_cluster, snap.last_risk) {
                (Some(cluster), Some(risk)) => Some((cluster, risk, snap.stage)),
                _ => None,
            }
        });
        cluster_overview(observations)
    }

    /// Coefficient ranking from the currently loaded model.
    pub fn feature_importance(&self) -> Vec<FeatureImportance> {
        self.model.read().feature_importance()
    }

    pub fn snapshot(&self, student_id: &str) -> Option<StudentSnapshot> {
        self.registry.snapshot(student_id)
    }

    pub fn transition_log(&self) -> Vec<StageTransition> {
        self.registry.transition_log()
    }

    pub fn status(&self) -> EngineStatus {
        let model = self.model.read();
        EngineStatus {
            model_source: model.source().to_string(),
            model_loaded_at: model.loaded_at(),
            students_tracked: self.registry.len(),
            layout: LayoutInfo::current(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{ClusterCentroid, ClusterId, CLUSTER_COUNT};
    use crate::features::{layout_hash, FEATURE_COUNT, FEATURE_VERSION};
    use crate::model::ModelArtifact;
    use crate::risk::RiskLevel;
    use crate::stage::Stage;

    /// Scaler centered on a plausible cohort; risk rises with backlogs
    /// and fees, falls with attendance, CGPA, quizzes and engagement.
    fn test_model() -> RiskModel {
        let artifact = ModelArtifact {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            weights: [-1.1, -0.9, 0.7, 0.5, 0.3, -0.4, -0.6, -0.2],
            bias: -0.5,
            feature_means: [75.0, 6.5, 1.0, 0.3, 20_000.0, 55.0, 5.0, 1.0],
            feature_stds: [15.0, 1.5, 1.5, 0.46, 30_000.0, 20.0, 2.5, 1.5],
        };
        RiskModel::new(artifact, "test-model")
    }

    /// Archetype centroids in standardized space with the weight
    /// profiles each archetype listens to.
    fn test_centroids() -> CentroidSet {
        let clusters: [ClusterCentroid; CLUSTER_COUNT] = [
            // High performers: everything healthy.
            ClusterCentroid {
                centroid: [1.0, 1.2, -0.7, -0.5, -0.5, 1.0, 0.8, -0.3],
                weights: [1.5, 2.0, 1.0, 0.5, 0.5, 1.5, 1.5, 0.25],
            },
            // Academic strugglers: CGPA and backlogs dominate.
            ClusterCentroid {
                centroid: [-0.3, -1.3, 1.5, 0.0, 0.0, -1.0, 0.0, 0.3],
                weights: [0.5, 2.0, 2.0, 0.25, 0.25, 1.5, 0.5, 0.5],
            },
            // Financially stressed: fee fields dominate.
            ClusterCentroid {
                centroid: [-0.3, 0.0, 0.2, 1.5, 1.8, 0.0, -0.2, 0.0],
                weights: [0.5, 0.5, 0.5, 2.5, 2.5, 0.5, 0.5, 0.25],
            },
            // Disengaged: attendance and engagement dominate.
            ClusterCentroid {
                centroid: [-1.5, -0.5, 0.5, 0.0, 0.0, -0.7, -1.6, -0.5],
                weights: [2.0, 0.5, 0.5, 0.25, 0.25, 1.0, 2.5, 1.0],
            },
        ];
        CentroidSet {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            feature_means: [75.0, 6.5, 1.0, 0.3, 20_000.0, 55.0, 5.0, 1.0],
            feature_stds: [15.0, 1.5, 1.5, 0.46, 30_000.0, 20.0, 2.5, 1.5],
            clusters,
        }
    }

    fn engine() -> RiskEngine {
        RiskEngine::new(EngineConfig::default(), test_model(), test_centroids()).unwrap()
    }

    fn struggling_record() -> StudentRecord {
        let mut r = StudentRecord::new("STU042");
        r.attendance_percentage = Some(45.0);
        r.cgpa = Some(5.2);
        r.backlogs = Some(3);
        r.fees_pending = Some(true);
        r.fees_amount_due = Some(15_000.0);
        r.quiz_score_avg = Some(40.0);
        r.bot_engagement_score = Some(2.0);
        r.counselling_sessions = Some(0);
        r
    }

    fn healthy_record() -> StudentRecord {
        let mut r = StudentRecord::new("STU100");
        r.attendance_percentage = Some(92.0);
        r.cgpa = Some(8.5);
        r.backlogs = Some(0);
        r.fees_pending = Some(false);
        r.quiz_score_avg = Some(80.0);
        r.bot_engagement_score = Some(8.0);
        r.counselling_sessions = Some(2);
        r
    }

    #[test]
    fn test_struggling_student_comes_out_red() {
        let verdict = engine().analyze(&struggling_record()).unwrap();
        assert_eq!(verdict.baseline_risk, RiskLevel::Red);
        assert_eq!(verdict.final_risk, RiskLevel::Red);
        assert_eq!(verdict.stage, Stage::CounselorLed);
        assert!(verdict.dropout_probability > 0.5);
        assert!(!verdict.risk_factors.is_empty());
        assert!(verdict.recommendations[0].starts_with("PRIORITY HIGH"));
    }

    #[test]
    fn test_healthy_student_comes_out_green() {
        let verdict = engine().analyze(&healthy_record()).unwrap();
        assert_eq!(verdict.baseline_risk, RiskLevel::Green);
        assert_eq!(verdict.final_risk, RiskLevel::Green);
        assert_eq!(verdict.stage, Stage::Monitor);
        assert!(verdict.dropout_probability < 0.4);
        assert_eq!(verdict.cluster_id, ClusterId::HighPerformers);
    }

    #[test]
    fn test_blank_id_fails_single_and_marks_batch() {
        let e = engine();
        let mut bad = healthy_record();
        bad.student_id = String::new();
        assert!(matches!(
            e.analyze(&bad),
            Err(AnalysisError::MissingField { field: "student_id" })
        ));

        let outcomes = e.analyze_batch(&[healthy_record(), bad, struggling_record()]);
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_scored());
        assert!(!outcomes[1].is_scored());
        assert!(outcomes[2].is_scored());
    }

    #[test]
    fn test_stage_persists_across_analyses() {
        let e = engine();
        assert_eq!(e.analyze(&struggling_record()).unwrap().stage, Stage::CounselorLed);

        // Same student recovers: stage steps down one per green verdict.
        let mut recovered = struggling_record();
        recovered.attendance_percentage = Some(92.0);
        recovered.cgpa = Some(8.5);
        recovered.backlogs = Some(0);
        recovered.fees_pending = Some(false);
        recovered.quiz_score_avg = Some(80.0);
        recovered.bot_engagement_score = Some(8.0);
        let verdict = e.analyze(&recovered).unwrap();
        assert_eq!(verdict.final_risk, RiskLevel::Green);
        assert_eq!(verdict.stage, Stage::AutomatedSupport);

        let log = e.transition_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].from_stage, Stage::CounselorLed);
        assert_eq!(log[1].to_stage, Stage::AutomatedSupport);
    }

    #[test]
    fn test_checkins_feed_later_analysis() {
        let e = engine();
        let mut event = CheckinEvent::new("STU200");
        event.mood = Some(1.0);
        event.stress = Some(5.0);
        event.study_hours = Some(0.0);
        for _ in 0..20 {
            e.record_checkin(&event);
        }
        let tracked = e.snapshot("STU200").unwrap().engagement;
        assert!(tracked < 2.0);

        // Record without an engagement figure: the tracked score is used
        // and the very-low-engagement rule fires.
        let mut record = healthy_record();
        record.student_id = "STU200".to_string();
        record.bot_engagement_score = None;
        let verdict = e.analyze(&record).unwrap();
        assert!(verdict
            .risk_factors
            .iter()
            .any(|f| f.contains("engagement with support system")));
    }

    #[test]
    fn test_overview_and_checkup_reflect_analyses() {
        let e = engine();
        e.analyze(&struggling_record()).unwrap();
        e.analyze(&healthy_record()).unwrap();

        let overview = e.cluster_overview();
        let total: usize = overview.iter().map(|c| c.total_students).sum();
        assert_eq!(total, 2);
        assert_eq!(overview[ClusterId::HighPerformers.index()].green, 1);

        let checkup = e.daily_checkup("STU042");
        assert_eq!(checkup.stage, Stage::CounselorLed);
        assert_eq!(checkup.activities.len(), 4);
    }

    #[test]
    fn test_model_swap_changes_scores_atomically() {
        let e = engine();
        let before = e.analyze(&healthy_record()).unwrap().dropout_probability;

        // A degenerate retrain that calls everyone a certain dropout.
        let artifact = ModelArtifact {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            weights: [0.0; FEATURE_COUNT],
            bias: 10.0,
            feature_means: [0.0; FEATURE_COUNT],
            feature_stds: [1.0; FEATURE_COUNT],
        };
        e.reload_model(RiskModel::new(artifact, "retrained"));

        let after = e.analyze(&healthy_record()).unwrap().dropout_probability;
        assert!(before < 0.4);
        assert!(after > 0.99);
        assert_eq!(e.status().model_source, "retrained");
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.fusion.yellow_cutoff = 0.95;
        let err = RiskEngine::new(config, test_model(), test_centroids()).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }));
    }
}

//! Risk Model Inference
//!
//! Scores a feature vector against the loaded logistic artifact:
//! standardize, dot with the coefficients, add the intercept, squash
//! through a sigmoid. Pure and deterministic; same vector in, same
//! probability out, bit for bit.

use chrono::{DateTime, Utc};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::artifact::ModelArtifact;
use crate::features::{feature_name, StudentFeatures, FEATURE_COUNT};

/// Output of one scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelScore {
    /// Raw model probability in [0,1].
    pub dropout_probability: f32,
    /// Display rescaling: probability x 100. Strictly monotonic in the
    /// probability.
    pub ml_risk_score: f32,
}

/// Which way a coefficient pushes the dropout probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportanceDirection {
    IncreasesRisk,
    DecreasesRisk,
}

/// One row of the coefficient ranking counselors see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: &'static str,
    pub importance: f32,
    pub direction: ImportanceDirection,
}

/// Loaded model plus provenance. Immutable once constructed; reloading
/// a retrained artifact means building a fresh `RiskModel` and swapping
/// the handle.
#[derive(Debug, Clone)]
pub struct RiskModel {
    artifact: ModelArtifact,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl RiskModel {
    pub fn new(artifact: ModelArtifact, source: &str) -> Self {
        Self {
            artifact,
            source: source.to_string(),
            loaded_at: Utc::now(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// Score one feature vector.
    pub fn score(&self, features: &StudentFeatures) -> ModelScore {
        let raw = features.as_array();
        let mut standardized = [0.0f32; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            standardized[i] =
                (raw[i] - self.artifact.feature_means[i]) / self.artifact.feature_stds[i];
        }

        let z = Array1::from_iter(standardized);
        let w = Array1::from_iter(self.artifact.weights);
        let logit = z.dot(&w) + self.artifact.bias;
        let probability = sigmoid(logit);

        ModelScore {
            dropout_probability: probability,
            ml_risk_score: probability * 100.0,
        }
    }

    /// Coefficient ranking, largest magnitude first. Zero-weight
    /// features still appear so the list always covers the layout.
    pub fn feature_importance(&self) -> Vec<FeatureImportance> {
        let mut ranking: Vec<FeatureImportance> = self
            .artifact
            .weights
            .iter()
            .enumerate()
            .filter_map(|(i, &coef)| {
                feature_name(i).map(|feature| FeatureImportance {
                    feature,
                    importance: coef.abs(),
                    direction: if coef > 0.0 {
                        ImportanceDirection::IncreasesRisk
                    } else {
                        ImportanceDirection::DecreasesRisk
                    },
                })
            })
            .collect();

        ranking.sort_by(|a, b| {
            b.importance
                .partial_cmp(&a.importance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranking
    }
}

fn sigmoid(logit: f32) -> f32 {
    1.0 / (1.0 + (-logit).exp())
}

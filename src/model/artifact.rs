//! Model Artifact
//!
//! Serialized logistic model produced by offline training: per-feature
//! scaler (mean/std), coefficient per feature, intercept, and the
//! feature layout it was fitted against. The engine never trains; it
//! loads, validates and scores.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::features::{is_layout_compatible, layout_hash, FEATURE_COUNT, FEATURE_VERSION};

/// Trained dropout-risk model, exactly as persisted by the training
/// pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Feature layout version this model was fitted against.
    pub version: u8,
    /// Feature layout hash this model was fitted against.
    pub layout_hash: u32,
    /// Logistic regression coefficients, one per feature, applied in
    /// standardized space.
    pub weights: [f32; FEATURE_COUNT],
    /// Intercept term.
    pub bias: f32,
    /// Per-feature scaler means from training.
    pub feature_means: [f32; FEATURE_COUNT],
    /// Per-feature scaler stddevs from training. Never zero.
    pub feature_stds: [f32; FEATURE_COUNT],
}

impl ModelArtifact {
    /// Parse and validate a model artifact. `name` is only used in
    /// error messages.
    pub fn from_json_bytes(name: &str, bytes: &[u8]) -> Result<Self, ConfigError> {
        let artifact: ModelArtifact =
            serde_json::from_slice(bytes).map_err(|e| ConfigError::Malformed {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        artifact.validate(name)?;
        Ok(artifact)
    }

    pub fn from_json_file(path: &str) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => ConfigError::ModelNotLoaded {
                path: path.to_string(),
            },
            _ => ConfigError::Io {
                path: path.to_string(),
                source,
            },
        })?;
        let artifact = Self::from_json_bytes(path, &bytes)?;
        log::info!(
            "Model artifact loaded from {} (layout v{}, {} features)",
            path,
            artifact.version,
            FEATURE_COUNT
        );
        Ok(artifact)
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if !is_layout_compatible(self.version, self.layout_hash) {
            return Err(ConfigError::LayoutMismatch {
                artifact_version: self.version,
                artifact_hash: self.layout_hash,
                engine_version: FEATURE_VERSION,
                engine_hash: layout_hash(),
            });
        }
        for (i, &w) in self.weights.iter().enumerate() {
            if !w.is_finite() {
                return Err(ConfigError::Malformed {
                    name: name.to_string(),
                    reason: format!("weight [{}] is not finite", i),
                });
            }
        }
        if !self.bias.is_finite() {
            return Err(ConfigError::Malformed {
                name: name.to_string(),
                reason: "bias is not finite".to_string(),
            });
        }
        for (i, &std) in self.feature_stds.iter().enumerate() {
            if !(std > 0.0) || !std.is_finite() {
                return Err(ConfigError::Malformed {
                    name: name.to_string(),
                    reason: format!("feature std [{}] must be positive, got {}", i, std),
                });
            }
        }
        Ok(())
    }
}

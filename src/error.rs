//! Error handling
//!
//! Two fatality classes, nothing in between: configuration problems abort
//! startup, analysis problems fail a single scoring call. The engine itself
//! has no retryable errors - it is pure computation.

use thiserror::Error;

/// Fatal at process start. The embedding service must refuse to come up if
/// artifact loading returns one of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No trained risk model artifact at the configured location.
    #[error("risk model artifact not loaded: nothing at {path}")]
    ModelNotLoaded { path: String },

    /// No cluster centroid artifact at the configured location.
    #[error("cluster centroid artifact not loaded: nothing at {path}")]
    CentroidsNotLoaded { path: String },

    /// Artifact was present but did not parse or failed validation.
    #[error("malformed artifact {name}: {reason}")]
    Malformed { name: String, reason: String },

    /// Artifact was trained against a different feature layout.
    #[error("feature layout mismatch: artifact has v{artifact_version} (hash {artifact_hash:08x}), engine expects v{engine_version} (hash {engine_hash:08x})")]
    LayoutMismatch {
        artifact_version: u8,
        artifact_hash: u32,
        engine_version: u8,
        engine_hash: u32,
    },

    /// Artifact file could not be read.
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Fails one analysis call. The caller surfaces these as data-quality
/// issues; in batch mode they occupy the failed item's slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A required field with no documented default was absent.
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_render_context() {
        let err = ConfigError::Malformed {
            name: "model.json".to_string(),
            reason: "weights length 3, expected 8".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("model.json"));
        assert!(msg.contains("expected 8"));
    }

    #[test]
    fn layout_mismatch_renders_both_sides() {
        let err = ConfigError::LayoutMismatch {
            artifact_version: 2,
            artifact_hash: 0xdeadbeef,
            engine_version: 1,
            engine_hash: 0x1234abcd,
        };
        let msg = err.to_string();
        assert!(msg.contains("v2"));
        assert!(msg.contains("v1"));
        assert!(msg.contains("deadbeef"));
    }

    #[test]
    fn missing_field_names_the_field() {
        let err = AnalysisError::MissingField { field: "student_id" };
        assert_eq!(err.to_string(), "missing required field: student_id");
    }
}

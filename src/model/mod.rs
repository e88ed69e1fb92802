//! Model Module
//!
//! Trained logistic artifact loading and deterministic inference.

pub mod artifact;
pub mod inference;

pub use artifact::ModelArtifact;
pub use inference::{FeatureImportance, ImportanceDirection, ModelScore, RiskModel};

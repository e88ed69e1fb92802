//! Baseline Module
//!
//! Rule-based risk tier: threshold constants plus the classifier that
//! applies them. This layer needs no trained artifacts and its verdict
//! can only be raised, never lowered, by the model.

pub mod classifier;
pub mod rules;

pub use classifier::{BaselineAssessment, BaselineClassifier, NO_FACTORS_NOTE};
pub use rules::RuleThresholds;

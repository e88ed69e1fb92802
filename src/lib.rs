//! EduShield Core - Student Risk & Intervention Engine
//!
//! Scores student records for dropout risk by fusing a transparent rule
//! baseline with a logistic model, places each student in a behavioral
//! cluster, walks an intervention stage ladder with hysteresis, and turns
//! the result into concrete counselor actions.
//!
//! ## Architecture
//! - `features/` - Record aggregation into the versioned feature vector
//! - `baseline/` - Threshold rules with explainable risk factors
//! - `model/` - Logistic artifact loading and inference
//! - `cluster/` - Weighted nearest-centroid student archetypes
//! - `risk/` - Tier fusion and verdict shapes
//! - `engine` - The orchestrating pipeline behind one handle

// Input and feature pipeline
pub mod features;
pub mod record;

// Scoring engines
pub mod baseline;
pub mod cluster;
pub mod model;
pub mod risk;

// Intervention side
pub mod checkin;
pub mod engagement;
pub mod recommend;
pub mod stage;

// Orchestration
pub mod config;
pub mod engine;
pub mod error;
pub mod registry;

pub use config::EngineConfig;
pub use engine::{EngineStatus, RiskEngine};
pub use error::{AnalysisError, ConfigError};
pub use record::StudentRecord;
pub use risk::{BatchOutcome, RiskLevel, RiskVerdict};

//! Risk Module
//!
//! Tier types, fusion policy and the fusion rule itself.

pub mod fusion;
pub mod policy;
pub mod types;

pub use fusion::fuse;
pub use policy::FusionThresholds;
pub use types::{BatchOutcome, RiskFactor, RiskLevel, RiskVerdict};

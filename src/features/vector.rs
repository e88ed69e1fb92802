//! Student feature vector - the one data structure every scoring stage
//! consumes. Field order is fixed by `layout.rs`; never hand a raw
//! `[f32; N]` across a module boundary.

use serde::{Deserialize, Serialize};

use super::layout::{feature_index, layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};

/// Canonical per-student feature vector, derived on demand and never
/// persisted. Carries the layout version/hash it was built under so
/// downstream consumers can verify compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentFeatures {
    pub version: u8,
    pub layout_hash: u32,
    pub values: [f32; FEATURE_COUNT],
}

impl StudentFeatures {
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: [0.0; FEATURE_COUNT],
        }
    }

    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        feature_index(name).and_then(|i| self.get(i))
    }

    pub fn set(&mut self, index: usize, value: f32) {
        if index < FEATURE_COUNT {
            self.values[index] = value;
        }
    }

    pub fn set_by_name(&mut self, name: &str, value: f32) -> bool {
        if let Some(index) = feature_index(name) {
            self.set(index, value);
            true
        } else {
            false
        }
    }

    // Named accessors for the fields rule predicates read constantly.

    pub fn attendance(&self) -> f32 {
        self.values[0]
    }

    pub fn cgpa(&self) -> f32 {
        self.values[1]
    }

    pub fn backlogs(&self) -> u32 {
        self.values[2].max(0.0).round() as u32
    }

    pub fn fees_pending(&self) -> bool {
        self.values[3] >= 0.5
    }

    pub fn fees_amount_due(&self) -> f32 {
        self.values[4]
    }

    pub fn quiz_score_avg(&self) -> f32 {
        self.values[5]
    }

    pub fn engagement(&self) -> f32 {
        self.values[6]
    }

    pub fn counselling_sessions(&self) -> u32 {
        self.values[7].max(0.0).round() as u32
    }

    /// JSON form with named values, for structured logging.
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

impl Default for StudentFeatures {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder with named setters, mainly for tests and synthetic vectors.
#[derive(Debug, Clone)]
pub struct StudentFeaturesBuilder {
    features: StudentFeatures,
}

impl StudentFeaturesBuilder {
    pub fn new() -> Self {
        Self {
            features: StudentFeatures::new(),
        }
    }

    pub fn attendance(mut self, value: f32) -> Self {
        self.features.set_by_name("attendance_percentage", value);
        self
    }

    pub fn cgpa(mut self, value: f32) -> Self {
        self.features.set_by_name("cgpa", value);
        self
    }

    pub fn backlogs(mut self, value: u32) -> Self {
        self.features.set_by_name("backlogs", value as f32);
        self
    }

    pub fn fees_pending(mut self, pending: bool) -> Self {
        self.features
            .set_by_name("fees_pending", if pending { 1.0 } else { 0.0 });
        self
    }

    pub fn fees_amount_due(mut self, value: f32) -> Self {
        self.features.set_by_name("fees_amount_due", value);
        self
    }

    pub fn quiz_score_avg(mut self, value: f32) -> Self {
        self.features.set_by_name("quiz_score_avg", value);
        self
    }

    pub fn engagement(mut self, value: f32) -> Self {
        self.features.set_by_name("bot_engagement_score", value);
        self
    }

    pub fn counselling_sessions(mut self, value: u32) -> Self {
        self.features
            .set_by_name("counselling_sessions", value as f32);
        self
    }

    pub fn build(self) -> StudentFeatures {
        self.features
    }
}

impl Default for StudentFeaturesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

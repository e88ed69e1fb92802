//! Clustering Engine
//!
//! Assigns each feature vector to the nearest archetype centroid. The
//! centroid set is a trained artifact produced offline; the engine only
//! loads, validates and applies it. Distances are weighted per cluster
//! so each archetype listens to the features that define it (the
//! academic one to CGPA and backlogs, the financial one to fees).

use serde::{Deserialize, Serialize};

use super::types::{ClusterId, CLUSTER_COUNT};
use crate::error::ConfigError;
use crate::features::{is_layout_compatible, layout_hash, StudentFeatures, FEATURE_COUNT, FEATURE_VERSION};

/// Distances closer together than this are treated as a tie and resolved
/// toward the higher-severity archetype.
pub const DEFAULT_ASSIGNMENT_EPSILON: f32 = 0.01;

/// One archetype's trained centroid, in standardized feature space, plus
/// its per-feature distance weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterCentroid {
    pub centroid: [f32; FEATURE_COUNT],
    pub weights: [f32; FEATURE_COUNT],
}

/// Complete trained centroid artifact. Indices match `ClusterId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentroidSet {
    /// Feature layout version this artifact was fitted against.
    pub version: u8,
    /// Feature layout hash this artifact was fitted against.
    pub layout_hash: u32,
    /// Per-feature standardization means from training.
    pub feature_means: [f32; FEATURE_COUNT],
    /// Per-feature standardization stddevs from training. Never zero.
    pub feature_stds: [f32; FEATURE_COUNT],
    pub clusters: [ClusterCentroid; CLUSTER_COUNT],
}

impl CentroidSet {
    /// Parse and validate a centroid artifact. `name` is only used in
    /// error messages.
    pub fn from_json_bytes(name: &str, bytes: &[u8]) -> Result<Self, ConfigError> {
        let set: CentroidSet =
            serde_json::from_slice(bytes).map_err(|e| ConfigError::Malformed {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        set.validate(name)?;
        Ok(set)
    }

    pub fn from_json_file(path: &str) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => ConfigError::CentroidsNotLoaded {
                path: path.to_string(),
            },
            _ => ConfigError::Io {
                path: path.to_string(),
                source,
            },
        })?;
        let set = Self::from_json_bytes(path, &bytes)?;
        log::info!(
            "Centroid artifact loaded from {} (layout v{}, {} clusters)",
            path,
            set.version,
            CLUSTER_COUNT
        );
        Ok(set)
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
        for (i, &std) in self.feature_stds.iter().enumerate() {
            if !(std > 0.0) || !std.is_finite() {
                return Err(ConfigError::Malformed {
                    name: name.to_string(),
                    reason: format!("feature std [{}] must be positive, got {}", i, std),
                });
            }
        }
        for (c, entry) in self.clusters.iter().enumerate() {
            let mut any_positive = false;
            for (i, &w) in entry.weights.iter().enumerate() {
                if w < 0.0 || !w.is_finite() {
                    return Err(ConfigError::Malformed {
                        name: name.to_string(),
                        reason: format!("cluster {} weight [{}] must be >= 0, got {}", c, i, w),
                    });
                }
                if w > 0.0 {
                    any_positive = true;
                }
            }
            if !any_positive {
                return Err(ConfigError::Malformed {
                    name: name.to_string(),
                    reason: format!("cluster {} has all-zero weights", c),
                });
            }
        }
        Ok(())
    }

    fn standardize(&self, features: &StudentFeatures) -> [f32; FEATURE_COUNT] {
        let mut z = [0.0f32; FEATURE_COUNT];
        let raw = features.as_array();
        for i in 0..FEATURE_COUNT {
            z[i] = (raw[i] - self.feature_means[i]) / self.feature_stds[i];
        }
        z
    }
}

/// Result of one assignment, with the full distance vector for
/// dashboards and debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    pub cluster: ClusterId,
    /// Distance to the winning centroid.
    pub distance: f32,
    /// Distance to every centroid, indexed by `ClusterId`.
    pub distances: [f32; CLUSTER_COUNT],
}

/// Nearest-centroid assignment over a validated artifact.
#[derive(Debug, Clone)]
pub struct ClusterEngine {
    set: CentroidSet,
    epsilon: f32,
}

impl ClusterEngine {
    pub fn new(set: CentroidSet) -> Self {
        Self::with_epsilon(set, DEFAULT_ASSIGNMENT_EPSILON)
    }

    pub fn with_epsilon(set: CentroidSet, epsilon: f32) -> Self {
        Self { set, epsilon }
    }

    pub fn centroid_set(&self) -> &CentroidSet {
        &self.set
    }

    /// Assign a feature vector to its nearest archetype. Total: every
    /// vector lands somewhere, ties go to the higher-severity archetype.
    pub fn assign(&self, features: &StudentFeatures) -> ClusterAssignment {
        let z = self.set.standardize(features);

        let mut distances = [0.0f32; CLUSTER_COUNT];
        for (i, entry) in self.set.clusters.iter().enumerate() {
            distances[i] = weighted_euclidean(&z, &entry.centroid, &entry.weights);
        }

        let mut best = ClusterId::HighPerformers;
        let mut best_distance = distances[best.index()];
        for id in ClusterId::ALL {
            let d = distances[id.index()];
            if d < best_distance - self.epsilon {
                best = id;
                best_distance = d;
            } else if (d - best_distance).abs() <= self.epsilon
                && id.severity_rank() > best.severity_rank()
            {
                // Tied within epsilon: the more worrying archetype wins.
                best = id;
                best_distance = best_distance.min(d);
            }
        }

        ClusterAssignment {
            cluster: best,
            distance: distances[best.index()],
            distances,
        }
    }
}

fn weighted_euclidean(a: &[f32], b: &[f32], weights: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .zip(weights.iter())
        .map(|((&ai, &bi), &wi)| wi * (ai - bi).powi(2))
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{layout_hash, StudentFeatures, FEATURE_VERSION};

    /// Identity standardization, axis-aligned centroids, unit weights.
    fn axis_set() -> CentroidSet {
        let mut clusters: Vec<ClusterCentroid> = Vec::new();
        for i in 0..CLUSTER_COUNT {
            let mut centroid = [0.0f32; FEATURE_COUNT];
            centroid[i] = 1.0;
            clusters.push(ClusterCentroid {
                centroid,
                weights: [1.0; FEATURE_COUNT],
            });
        }
        CentroidSet {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            feature_means: [0.0; FEATURE_COUNT],
            feature_stds: [1.0; FEATURE_COUNT],
            clusters: clusters.try_into().unwrap(),
        }
    }

    #[test]
    fn test_assigns_nearest_centroid() {
        let engine = ClusterEngine::new(axis_set());
        let mut values = [0.0f32; FEATURE_COUNT];
        values[1] = 1.0;
        let features = StudentFeatures::from_values(values);
        let out = engine.assign(&features);
        assert_eq!(out.cluster, ClusterId::AcademicStrugglers);
        assert_eq!(out.distance, 0.0);
        assert_eq!(out.distances[ClusterId::AcademicStrugglers.index()], 0.0);
    }

    #[test]
    fn test_exact_tie_resolves_to_higher_severity() {
        let engine = ClusterEngine::new(axis_set());
        // Origin is equidistant from all four centroids.
        let features = StudentFeatures::from_values([0.0; FEATURE_COUNT]);
        let out = engine.assign(&features);
        assert_eq!(out.cluster, ClusterId::Disengaged);
    }

    #[test]
    fn test_nearby_vectors_share_a_cluster() {
        let engine = ClusterEngine::new(axis_set());
        let mut a = [0.0f32; FEATURE_COUNT];
        a[2] = 0.9;
        let mut b = a;
        b[2] = 0.901;
        let out_a = engine.assign(&StudentFeatures::from_values(a));
        let out_b = engine.assign(&StudentFeatures::from_values(b));
        assert_eq!(out_a.cluster, out_b.cluster);
    }

    #[test]
    fn test_weights_redirect_assignment() {
        let mut values = [0.0f32; FEATURE_COUNT];
        values[0] = 0.5;
        let features = StudentFeatures::from_values(values);

        let engine = ClusterEngine::new(axis_set());
        assert_eq!(engine.assign(&features).cluster, ClusterId::HighPerformers);

        // Penalize cluster 0 heavily on feature 0 and it loses the
        // same vector to the remaining (tied) centroids.
        let mut set = axis_set();
        set.clusters[0].weights[0] = 20.0;
        let engine = ClusterEngine::new(set);
        assert_eq!(engine.assign(&features).cluster, ClusterId::Disengaged);
    }

    #[test]
    fn test_loader_rejects_zero_std() {
        let mut set = axis_set();
        set.feature_stds[3] = 0.0;
        let bytes = serde_json::to_vec(&set).unwrap();
        let err = CentroidSet::from_json_bytes("centroids.json", &bytes).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }));
        assert!(err.to_string().contains("std"));
    }

    #[test]
    fn test_loader_rejects_stale_layout() {
        let mut set = axis_set();
        set.layout_hash = set.layout_hash.wrapping_add(1);
        let bytes = serde_json::to_vec(&set).unwrap();
        let err = CentroidSet::from_json_bytes("centroids.json", &bytes).unwrap_err();
        assert!(matches!(err, ConfigError::LayoutMismatch { .. }));
    }

    #[test]
    fn test_missing_file_reports_centroids_not_loaded() {
        let err = CentroidSet::from_json_file("/nonexistent/centroids.json").unwrap_err();
        assert!(matches!(err, ConfigError::CentroidsNotLoaded { .. }));
    }

    #[test]
    fn test_loader_rejects_all_zero_weights() {
        let mut set = axis_set();
        set.clusters[2].weights = [0.0; FEATURE_COUNT];
        let bytes = serde_json::to_vec(&set).unwrap();
        let err = CentroidSet::from_json_bytes("centroids.json", &bytes).unwrap_err();
        assert!(err.to_string().contains("all-zero"));
    }
}

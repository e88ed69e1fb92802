//! Cluster Module
//!
//! Archetype assignment: trained centroid artifact, nearest-centroid
//! engine, static profile catalog, dashboard aggregation.

pub mod engine;
pub mod overview;
pub mod types;

pub use engine::{
    CentroidSet, ClusterAssignment, ClusterCentroid, ClusterEngine, DEFAULT_ASSIGNMENT_EPSILON,
};
pub use overview::{cluster_overview, ClusterOverview};
pub use types::{ClusterId, ClusterProfile, CLUSTER_COUNT};

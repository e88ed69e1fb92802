//! Features Module - Feature Aggregation
//!
//! Turns raw student records into the fixed-layout numeric vector every
//! downstream stage (rules, model, clustering) consumes.

pub mod aggregate;
pub mod layout;
pub mod vector;

pub use aggregate::{aggregate, AggregatorDefaults};
pub use layout::{
    feature_index, feature_name, is_layout_compatible, layout_hash, LayoutInfo, FEATURE_COUNT,
    FEATURE_LAYOUT, FEATURE_VERSION,
};
pub use vector::{StudentFeatures, StudentFeaturesBuilder};

//! Feature Layout - Centralized Feature Definition
//!
//! Single source of truth for the order of features handed to the risk
//! model and the cluster centroids. Trained artifacts embed the version and
//! layout hash they were fitted against; the loaders reject anything else.
//!
//! Rules:
//! 1. Add a feature -> increment FEATURE_VERSION
//! 2. Reorder features -> increment FEATURE_VERSION
//! 3. Remove a feature -> increment FEATURE_VERSION

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

/// Current feature layout version.
pub const FEATURE_VERSION: u8 = 1;

/// Feature names in the exact order they appear in the vector.
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Academic (0-2) ===
    "attendance_percentage", // 0: Attendance percent, 0-100
    "cgpa",                  // 1: Cumulative grade point average, 0-10
    "backlogs",              // 2: Count of failed subjects pending clearance

    // === Financial (3-4) ===
    "fees_pending",          // 3: 1.0 if fees overdue, else 0.0
    "fees_amount_due",       // 4: Outstanding fee amount, currency units

    // === Behavioral (5-7) ===
    "quiz_score_avg",        // 5: Mean quiz score percent, 0-100
    "bot_engagement_score",  // 6: Rolling check-in engagement, 0-10
    "counselling_sessions",  // 7: Counselling sessions attended
];

/// Total number of features. Must match FEATURE_LAYOUT.len().
pub const FEATURE_COUNT: usize = 8;

/// CRC32 hash over version + ordered feature names. Used to detect layout
/// mismatches against persisted artifacts at load time.
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
}

/// Complete layout information for serialization and logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// Check whether an artifact's recorded layout matches the compiled one.
pub fn is_layout_compatible(version: u8, hash: u32) -> bool {
    version == FEATURE_VERSION && hash == layout_hash()
}

/// Get feature index by name (O(n) but features are few).
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index.
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 8);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_hash_consistency() {
        assert_eq!(layout_hash(), layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_layout_compatibility() {
        assert!(is_layout_compatible(FEATURE_VERSION, layout_hash()));
        assert!(!is_layout_compatible(FEATURE_VERSION + 1, layout_hash()));
        assert!(!is_layout_compatible(FEATURE_VERSION, layout_hash().wrapping_add(1)));
    }

    #[test]
    fn test_feature_index_lookup() {
        assert_eq!(feature_index("attendance_percentage"), Some(0));
        assert_eq!(feature_index("fees_pending"), Some(3));
        assert_eq!(feature_index("counselling_sessions"), Some(7));
        assert_eq!(feature_index("semester"), None);
    }

    #[test]
    fn test_feature_name_lookup() {
        assert_eq!(feature_name(0), Some("attendance_percentage"));
        assert_eq!(feature_name(7), Some("counselling_sessions"));
        assert_eq!(feature_name(8), None);
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_count, FEATURE_COUNT);
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
    }
}

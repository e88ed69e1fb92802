//! Recommendation Module
//!
//! Action templates and counselor playbooks.

pub mod engine;
pub mod playbook;

pub use engine::{recommend, FALLBACK_RECOMMENDATION};
pub use playbook::{intervention_playbook, PlaybookPhase};

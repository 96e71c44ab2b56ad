//! Coverage classification: rule-based scoring of clause text, label
//! normalization onto the policy taxonomy, and per-plan aggregation.

pub mod aggregate;
pub mod classifier;
pub mod normalizer;

pub use aggregate::{ClauseRecord, aggregate_plan, build_report, unmapped_labels};
pub use classifier::{CoverageClassifier, assess_coverage};
pub use normalizer::{LabelMatch, normalize_label};

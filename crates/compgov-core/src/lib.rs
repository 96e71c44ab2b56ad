pub mod config;
pub mod coverage;
pub mod deliverable;
pub mod document;
pub mod draft;
pub mod gap;
pub mod library;
pub mod plan;
pub mod taxonomy;

pub use config::Config;
pub use coverage::{Coverage, CoverageAssessment, CoverageStats, PolicyCoverage, merge_best};
pub use document::DocBlock;
pub use plan::{AnalysisReport, MatrixPlan, PlanAnalysis, PlanDataReport, PlanMetadata, PlanNameMatch};
pub use taxonomy::{POLICY_AREAS, RiskImpact};

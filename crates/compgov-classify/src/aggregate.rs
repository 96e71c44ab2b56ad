//! Per-plan aggregation of clause records into policy coverage.

use std::collections::BTreeSet;
use std::path::Path;

use compgov_core::coverage::{CoverageAssessment, CoverageStats, PolicyCoverage, merge_best, round1};
use compgov_core::plan::{AnalysisMetadata, AnalysisReport, GlobalStats, PlanAnalysis, PlanMetadata};
use compgov_core::taxonomy::{POLICY_AREAS, standard_areas};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classifier::CoverageClassifier;
use crate::normalizer::normalize_label;

/// One entry of a `plan*_clause_extract.json` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseRecord {
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub policy: String,
    #[serde(default)]
    pub details: String,
}

/// Classify and reduce one file's records into a [`PlanAnalysis`].
///
/// The plan name comes from the first record. Each record's label is
/// normalized, its details classified, and the result reduced with
/// [`merge_best`]. Stats count only the areas the plan mentions.
/// Returns `None` for an empty file.
pub fn aggregate_plan(
    records: &[ClauseRecord],
    source_file: &str,
    classifier: &CoverageClassifier,
) -> Option<PlanAnalysis> {
    let first = records.first()?;
    let plan_name = if first.plan.trim().is_empty() {
        let stem = Path::new(source_file)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("Unknown Plan {stem}")
    } else {
        first.plan.clone()
    };

    let mut policy_coverage = PolicyCoverage::new();
    for record in records {
        let label = normalize_label(&record.policy);
        if !label.is_mapped() {
            warn!(plan = %plan_name, label = %record.policy, "unmapped policy label kept verbatim");
        }
        let coverage = classifier.assess(&record.details);
        let replaced = merge_best(
            &mut policy_coverage,
            label.area(),
            CoverageAssessment {
                coverage,
                details: record.details.clone(),
                original_policy: record.policy.clone(),
            },
        );
        debug!(plan = %plan_name, area = label.area(), %coverage, replaced, "clause classified");
    }

    let coverage_stats = CoverageStats::from_policy_coverage(&policy_coverage);
    Some(PlanAnalysis {
        plan_name,
        source_file: source_file.to_string(),
        metadata: PlanMetadata::default(),
        policy_coverage,
        coverage_stats,
    })
}

/// Labels in `records` that resolve to no standard area.
pub fn unmapped_labels<'a>(records: impl IntoIterator<Item = &'a ClauseRecord>) -> BTreeSet<String> {
    records
        .into_iter()
        .filter(|r| !normalize_label(&r.policy).is_mapped())
        .map(|r| r.policy.clone())
        .collect()
}

/// Assemble `json-plan-analysis.json` from parsed plans.
pub fn build_report(
    plans: Vec<PlanAnalysis>,
    source: &str,
    total_files: usize,
    unmapped: BTreeSet<String>,
) -> AnalysisReport {
    let average_coverage = if plans.is_empty() {
        0.0
    } else {
        let sum: f64 = plans.iter().map(|p| p.coverage_stats.percentage).sum();
        round1(sum / plans.len() as f64)
    };

    AnalysisReport {
        metadata: AnalysisMetadata {
            source: source.to_string(),
            total_files,
            standard_policy_areas: standard_areas(),
            unmapped_labels: unmapped.into_iter().collect(),
        },
        global_stats: GlobalStats {
            total_plans: plans.len(),
            total_policy_areas_tracked: POLICY_AREAS.len(),
            average_coverage,
        },
        plans,
    }
}

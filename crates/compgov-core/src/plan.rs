//! Plan records and the JSON intermediates that carry them between operations.
//!
//! Two independently sourced views of a plan exist:
//!
//! - [`PlanAnalysis`]: built from per-plan clause-extraction JSON, coverage is
//!   a classified [`CoverageAssessment`] per standard area
//!   (`json-plan-analysis.json`).
//! - [`MatrixPlan`]: one column of the master workbook's coverage matrix,
//!   coverage is a bare level per policy item (`henryschein-plan-data.json`).
//!
//! Metadata is joined across sources by plan name via [`merge_metadata`].

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::coverage::{Coverage, CoverageStats, LevelCounts, PolicyCoverage};

pub const UNKNOWN: &str = "Unknown";

/// Optional descriptive attributes of a plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geography: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_risk: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_risk: Option<String>,
}

impl PlanMetadata {
    pub fn business_unit(&self) -> &str {
        self.business_unit.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn plan_type(&self) -> &str {
        self.plan_type.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn geography(&self) -> &str {
        self.geography.as_deref().unwrap_or(UNKNOWN)
    }

    /// Set a field by its executive-summary attribute label.
    ///
    /// Returns `false` for labels outside the known attribute set.
    pub fn set_attribute(&mut self, label: &str, value: String) -> bool {
        let slot = match label {
            "Plan Type" => &mut self.plan_type,
            "Geography" => &mut self.geography,
            "Effective Date" => &mut self.effective_date,
            "Business Unit" => &mut self.business_unit,
            "Overall Legal Risk" => &mut self.legal_risk,
            "Financial Liability Risk" => &mut self.financial_risk,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Copy fields from `other` that are unset here.
    pub fn fill_missing(&mut self, other: &PlanMetadata) {
        fn fill(dst: &mut Option<String>, src: &Option<String>) {
            if dst.is_none() {
                dst.clone_from(src);
            }
        }
        fill(&mut self.business_unit, &other.business_unit);
        fill(&mut self.plan_type, &other.plan_type);
        fill(&mut self.geography, &other.geography);
        fill(&mut self.effective_date, &other.effective_date);
        fill(&mut self.legal_risk, &other.legal_risk);
        fill(&mut self.financial_risk, &other.financial_risk);
    }
}

/// One plan parsed from a clause-extraction file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanAnalysis {
    pub plan_name: String,
    #[serde(default)]
    pub source_file: String,
    #[serde(flatten)]
    pub metadata: PlanMetadata,
    #[serde(default)]
    pub policy_coverage: PolicyCoverage,
    #[serde(default)]
    pub coverage_stats: CoverageStats,
}

impl PlanAnalysis {
    /// Level for `area`; areas the plan never mentions are NO.
    pub fn coverage_for(&self, area: &str) -> Coverage {
        self.policy_coverage
            .get(area)
            .map(|a| a.coverage)
            .unwrap_or(Coverage::No)
    }

    /// Whether the plan mentions `area` at NO or LIMITED.
    ///
    /// Areas absent from the plan are not counted as gaps here.
    pub fn has_recorded_gap(&self, area: &str) -> bool {
        self.policy_coverage
            .get(area)
            .is_some_and(|a| a.coverage.is_gap())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    pub source: String,
    pub total_files: usize,
    pub standard_policy_areas: Vec<String>,
    /// Labels that matched no table entry and were kept verbatim as areas.
    #[serde(default)]
    pub unmapped_labels: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_plans: usize,
    pub total_policy_areas_tracked: usize,
    pub average_coverage: f64,
}

/// `json-plan-analysis.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub metadata: AnalysisMetadata,
    #[serde(default)]
    pub global_stats: GlobalStats,
    #[serde(default)]
    pub plans: Vec<PlanAnalysis>,
}

/// One plan column from the master workbook's coverage matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixPlan {
    pub plan_name: String,
    #[serde(flatten)]
    pub metadata: PlanMetadata,
    #[serde(default)]
    pub policy_coverage: BTreeMap<String, Coverage>,
}

impl MatrixPlan {
    pub fn new(plan_name: impl Into<String>) -> Self {
        Self {
            plan_name: plan_name.into(),
            metadata: PlanMetadata::default(),
            policy_coverage: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDataMetadata {
    pub source: String,
    pub extraction_date: String,
    pub total_plans: usize,
    pub total_policy_areas: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixCoverageStats {
    pub total_policy_coverage: BTreeMap<String, LevelCounts>,
    pub plan_coverage_percentages: BTreeMap<String, CoverageStats>,
}

/// `henryschein-plan-data.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDataReport {
    pub metadata: PlanDataMetadata,
    pub policy_areas: Vec<String>,
    pub plans: Vec<MatrixPlan>,
    #[serde(default)]
    pub coverage_stats: MatrixCoverageStats,
}

impl PlanDataReport {
    /// Assemble the report and its per-policy and per-plan statistics.
    ///
    /// Plan percentages use the number of policy items as denominator, so an
    /// item missing from a plan counts as NO.
    pub fn build(
        source: String,
        extraction_date: String,
        policy_areas: Vec<String>,
        plans: Vec<MatrixPlan>,
    ) -> Self {
        let mut stats = MatrixCoverageStats::default();

        for policy in &policy_areas {
            let counts = stats
                .total_policy_coverage
                .entry(policy.clone())
                .or_default();
            for plan in &plans {
                counts.record(
                    plan.policy_coverage
                        .get(policy)
                        .copied()
                        .unwrap_or(Coverage::No),
                );
            }
        }

        for plan in &plans {
            let plan_stats = CoverageStats::tally(
                plan.policy_coverage.values().copied(),
                policy_areas.len(),
            );
            stats
                .plan_coverage_percentages
                .insert(plan.plan_name.clone(), plan_stats);
        }

        Self {
            metadata: PlanDataMetadata {
                source,
                extraction_date,
                total_plans: plans.len(),
                total_policy_areas: policy_areas.len(),
            },
            policy_areas,
            plans,
            coverage_stats: stats,
        }
    }
}

/// How plan names from different sources are compared when joining metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlanNameMatch {
    /// Byte-for-byte equality.
    Exact,
    /// Trimmed, internal whitespace collapsed, case-folded.
    #[default]
    Normalized,
}

impl PlanNameMatch {
    pub fn key(&self, name: &str) -> String {
        match self {
            Self::Exact => name.to_string(),
            Self::Normalized => name
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase(),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown plan name match mode '{0}' (expected 'exact' or 'normalized')")]
pub struct ParseNameMatchError(String);

impl FromStr for PlanNameMatch {
    type Err = ParseNameMatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "normalized" | "normalised" => Ok(Self::Normalized),
            other => Err(ParseNameMatchError(other.to_string())),
        }
    }
}

/// A plan record that can receive metadata from another source.
pub trait NamedPlan {
    fn plan_name(&self) -> &str;
    fn metadata_mut(&mut self) -> &mut PlanMetadata;
}

impl NamedPlan for PlanAnalysis {
    fn plan_name(&self) -> &str {
        &self.plan_name
    }

    fn metadata_mut(&mut self) -> &mut PlanMetadata {
        &mut self.metadata
    }
}

impl NamedPlan for MatrixPlan {
    fn plan_name(&self) -> &str {
        &self.plan_name
    }

    fn metadata_mut(&mut self) -> &mut PlanMetadata {
        &mut self.metadata
    }
}

/// Fill missing metadata on `plans` from `details`, keyed by plan name.
///
/// Returns the number of plans that found a match. Existing values on a plan
/// are never overwritten.
pub fn merge_metadata<P: NamedPlan>(
    plans: &mut [P],
    details: &BTreeMap<String, PlanMetadata>,
    mode: PlanNameMatch,
) -> usize {
    let index: HashMap<String, &PlanMetadata> = details
        .iter()
        .map(|(name, meta)| (mode.key(name), meta))
        .collect();

    let mut matched = 0;
    for plan in plans.iter_mut() {
        match index.get(&mode.key(plan.plan_name())) {
            Some(meta) => {
                plan.metadata_mut().fill_missing(meta);
                matched += 1;
            }
            None => debug!(plan = plan.plan_name(), "no metadata for plan"),
        }
    }

    if matched < plans.len() {
        warn!(
            matched,
            total = plans.len(),
            ?mode,
            "some plans had no metadata match by name"
        );
    }
    matched
}

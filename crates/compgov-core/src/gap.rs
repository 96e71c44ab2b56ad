//! Gap extraction and DRAFT policy applicability.
//!
//! A gap is a (plan, policy area) pair rated LIMITED or NO. These rules feed
//! the "Gap Details" and "BHG Policy Applicability" tabs of the matrix workbook.

use std::fmt;

use crate::coverage::Coverage;
use crate::plan::PlanAnalysis;
use crate::taxonomy::{DRAFT_POLICY_AREAS, RiskImpact, draft_policy_for_area};

pub const NOT_ADDRESSED_DETAILS: &str = "Policy area not addressed in plan documentation";
pub const NO_DRAFT_POLICY: &str = "Not addressed by BHG policies";
const DETAILS_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapPriority {
    High,
    Medium,
}

impl GapPriority {
    pub fn for_coverage(coverage: Coverage) -> Self {
        if coverage == Coverage::No {
            Self::High
        } else {
            Self::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
        }
    }
}

impl fmt::Display for GapPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GapRow {
    pub plan_name: String,
    pub policy_area: String,
    pub coverage: Coverage,
    /// What the plan says today, capped at 200 characters.
    pub details: String,
    pub addressed_by: Option<&'static str>,
    pub priority: GapPriority,
    pub risk: RiskImpact,
}

impl GapRow {
    pub fn addressed_by_label(&self) -> &str {
        self.addressed_by.unwrap_or(NO_DRAFT_POLICY)
    }
}

/// Every NO/LIMITED (plan, area) pair, plan-major in `areas` order.
///
/// Areas a plan never mentions are reported as NO.
pub fn collect_gaps(plans: &[PlanAnalysis], areas: &[String]) -> Vec<GapRow> {
    let mut rows = Vec::new();
    for plan in plans {
        for area in areas {
            let (coverage, details): (Coverage, String) = match plan.policy_coverage.get(area) {
                Some(a) => (a.coverage, a.details.chars().take(DETAILS_CHARS).collect()),
                None => (Coverage::No, NOT_ADDRESSED_DETAILS.to_string()),
            };
            if !coverage.is_gap() {
                continue;
            }
            rows.push(GapRow {
                plan_name: plan.plan_name.clone(),
                policy_area: area.clone(),
                coverage,
                details,
                addressed_by: draft_policy_for_area(area),
                priority: GapPriority::for_coverage(coverage),
                risk: RiskImpact::for_area(area),
            });
        }
    }
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdoptionPriority {
    MustHave,
    ShouldHave,
    NiceToHave,
}

impl AdoptionPriority {
    /// MUST HAVE above 70 % of plans, SHOULD HAVE above 40 %.
    pub fn for_share(needing: usize, total: usize) -> Self {
        if total == 0 {
            return Self::NiceToHave;
        }
        let pct = needing as f64 / total as f64 * 100.0;
        if pct > 70.0 {
            Self::MustHave
        } else if pct > 40.0 {
            Self::ShouldHave
        } else {
            Self::NiceToHave
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MustHave => "MUST HAVE",
            Self::ShouldHave => "SHOULD HAVE",
            Self::NiceToHave => "NICE TO HAVE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    High,
    Medium,
}

impl Complexity {
    pub fn for_policy(policy: &str) -> Self {
        let lower = policy.to_lowercase();
        if ["windfall", "clawback", "409a"].iter().any(|k| lower.contains(k)) {
            Self::High
        } else {
            Self::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
        }
    }
}

/// How many plans a DRAFT policy would close gaps for.
#[derive(Debug, Clone, PartialEq)]
pub struct Applicability {
    pub policy: &'static str,
    pub areas: &'static [&'static str],
    pub plans_needing: Vec<String>,
    pub priority: AdoptionPriority,
    pub complexity: Complexity,
}

/// Applicability of each DRAFT policy across `plans`.
///
/// A plan needs a policy when any covered area is recorded at NO or LIMITED;
/// areas the plan never mentions do not count.
pub fn draft_applicability(plans: &[PlanAnalysis]) -> Vec<Applicability> {
    DRAFT_POLICY_AREAS
        .iter()
        .map(|&(policy, areas)| {
            let plans_needing: Vec<String> = plans
                .iter()
                .filter(|plan| areas.iter().any(|area| plan.has_recorded_gap(area)))
                .map(|plan| plan.plan_name.clone())
                .collect();
            Applicability {
                policy,
                areas,
                priority: AdoptionPriority::for_share(plans_needing.len(), plans.len()),
                complexity: Complexity::for_policy(policy),
                plans_needing,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{CoverageAssessment, CoverageStats, PolicyCoverage};
    use crate::plan::PlanMetadata;
    use crate::taxonomy::standard_areas;

    fn plan(name: &str, entries: &[(&str, Coverage, &str)]) -> PlanAnalysis {
        let mut coverage = PolicyCoverage::new();
        for &(area, level, details) in entries {
            coverage.insert(
                area.to_string(),
                CoverageAssessment {
                    coverage: level,
                    details: details.to_string(),
                    original_policy: area.to_string(),
                },
            );
        }
        PlanAnalysis {
            plan_name: name.into(),
            source_file: String::new(),
            metadata: PlanMetadata::default(),
            coverage_stats: CoverageStats::from_policy_coverage(&coverage),
            policy_coverage: coverage,
        }
    }

    #[test]
    fn gaps_include_absent_areas_as_no() {
        let p = plan("A", &[("Clawback/Recovery", Coverage::Full, "clear process")]);
        let gaps = collect_gaps(&[p], &standard_areas());
        assert_eq!(gaps.len(), 15);
        assert!(gaps.iter().all(|g| g.coverage == Coverage::No));
        assert!(gaps.iter().all(|g| g.details == NOT_ADDRESSED_DETAILS));
        assert!(gaps.iter().all(|g| g.priority == GapPriority::High));
    }

    #[test]
    fn limited_gap_is_medium_priority_with_draft_policy() {
        let p = plan("A", &[("Quota Management", Coverage::Limited, "may adjust")]);
        let areas = vec!["Quota Management".to_string()];
        let gaps = collect_gaps(&[p], &areas);
        assert_eq!(gaps.len(), 1);
        let gap = &gaps[0];
        assert_eq!(gap.priority, GapPriority::Medium);
        assert_eq!(gap.risk, RiskImpact::High);
        assert_eq!(gap.addressed_by_label(), "Quota Management Policy");
    }

    #[test]
    fn gap_details_are_truncated() {
        let long = "x".repeat(500);
        let p = plan("A", &[("Leave of Absence", Coverage::Limited, long.as_str())]);
        let gaps = collect_gaps(&[p], &["Leave of Absence".to_string()]);
        assert_eq!(gaps[0].details.len(), 200);
        assert_eq!(gaps[0].addressed_by_label(), NO_DRAFT_POLICY);
    }

    #[test]
    fn adoption_priority_thresholds() {
        assert_eq!(AdoptionPriority::for_share(8, 10), AdoptionPriority::MustHave);
        assert_eq!(AdoptionPriority::for_share(7, 10), AdoptionPriority::ShouldHave);
        assert_eq!(AdoptionPriority::for_share(4, 10), AdoptionPriority::NiceToHave);
        assert_eq!(AdoptionPriority::for_share(0, 0), AdoptionPriority::NiceToHave);
    }

    #[test]
    fn complexity_by_name() {
        assert_eq!(Complexity::for_policy("Windfall Large Deal Policy"), Complexity::High);
        assert_eq!(Complexity::for_policy("Section 409A Compliance Policy"), Complexity::High);
        assert_eq!(Complexity::for_policy("Spif Governance Policy"), Complexity::Medium);
    }

    #[test]
    fn applicability_counts_recorded_gaps_only() {
        let plans = vec![
            plan("A", &[("Clawback/Recovery", Coverage::No, "")]),
            plan("B", &[("Clawback/Recovery", Coverage::Full, "")]),
            plan("C", &[]),
        ];
        let result = draft_applicability(&plans);
        assert_eq!(result.len(), DRAFT_POLICY_AREAS.len());

        let clawback = &result[0];
        assert_eq!(clawback.policy, "Clawback And Recovery Policy");
        assert_eq!(clawback.plans_needing, vec!["A"]);
        assert_eq!(clawback.priority, AdoptionPriority::NiceToHave);
        assert_eq!(clawback.complexity, Complexity::High);

        let spif = &result[3];
        assert!(spif.plans_needing.is_empty());
    }
}

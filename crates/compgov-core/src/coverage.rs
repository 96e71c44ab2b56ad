//! Coverage levels, per-area assessments, and coverage statistics.
//!
//! A plan's treatment of a policy area is rated on a three-level scale.
//! Levels are totally ordered (`No < Limited < Full`) so that duplicate
//! assessments for the same area can be reduced with [`merge_best`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How thoroughly a plan document addresses a policy area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Coverage {
    /// Silent on the area, or disclaimer language only.
    No,
    /// Mentions the area but lacks thresholds, workflow, or clear process.
    Limited,
    /// Detailed, enforceable language with thresholds, workflows, or SLAs.
    Full,
}

impl Coverage {
    pub const ALL: [Coverage; 3] = [Coverage::Full, Coverage::Limited, Coverage::No];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "FULL",
            Self::Limited => "LIMITED",
            Self::No => "NO",
        }
    }

    /// Map a master-workbook matrix cell (`YES` / `PARTIAL` / anything) to a level.
    pub fn from_matrix_cell(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "YES" => Self::Full,
            "PARTIAL" => Self::Limited,
            _ => Self::No,
        }
    }

    /// LIMITED and NO are documentation gaps.
    pub fn is_gap(&self) -> bool {
        !matches!(self, Self::Full)
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified coverage for one policy area of one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageAssessment {
    pub coverage: Coverage,
    #[serde(default)]
    pub details: String,
    /// Label as it appeared in the source document, before normalization.
    #[serde(default)]
    pub original_policy: String,
}

/// Standard policy area → assessment.
pub type PolicyCoverage = BTreeMap<String, CoverageAssessment>;

/// Reduce a new assessment into `coverage`.
///
/// The first assessment seen for an area is kept; a later one replaces it only
/// when its level is strictly higher. Returns `true` when the map changed.
pub fn merge_best(
    coverage: &mut PolicyCoverage,
    area: impl Into<String>,
    assessment: CoverageAssessment,
) -> bool {
    use std::collections::btree_map::Entry;

    match coverage.entry(area.into()) {
        Entry::Vacant(slot) => {
            slot.insert(assessment);
            true
        }
        Entry::Occupied(mut slot) => {
            if assessment.coverage > slot.get().coverage {
                slot.insert(assessment);
                true
            } else {
                false
            }
        }
    }
}

/// Per-plan tally of coverage levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub full: usize,
    pub limited: usize,
    pub no: usize,
    #[serde(default)]
    pub total: usize,
    pub percentage: f64,
}

impl CoverageStats {
    /// Tally `levels` against a denominator of `total` areas.
    ///
    /// `no` is whatever remains of `total` after FULL and LIMITED, so areas
    /// absent from `levels` count as NO.
    pub fn tally(levels: impl IntoIterator<Item = Coverage>, total: usize) -> Self {
        let mut full = 0;
        let mut limited = 0;
        for level in levels {
            match level {
                Coverage::Full => full += 1,
                Coverage::Limited => limited += 1,
                Coverage::No => {}
            }
        }
        Self {
            full,
            limited,
            no: total.saturating_sub(full + limited),
            total,
            percentage: coverage_percentage(full, limited, total),
        }
    }

    /// Stats over the entries present in `coverage`.
    pub fn from_policy_coverage(coverage: &PolicyCoverage) -> Self {
        Self::tally(coverage.values().map(|a| a.coverage), coverage.len())
    }
}

/// `(full + 0.5 × limited) / total` as a percentage rounded to one decimal.
pub fn coverage_percentage(full: usize, limited: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1((full as f64 + 0.5 * limited as f64) / total as f64 * 100.0)
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Count of plans at each level for a single policy area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    #[serde(rename = "FULL")]
    pub full: usize,
    #[serde(rename = "LIMITED")]
    pub limited: usize,
    #[serde(rename = "NO")]
    pub no: usize,
}

impl LevelCounts {
    pub fn record(&mut self, level: Coverage) {
        match level {
            Coverage::Full => self.full += 1,
            Coverage::Limited => self.limited += 1,
            Coverage::No => self.no += 1,
        }
    }
}

//! Deliverables checklist enhancement: file status, policy area, affected
//! plans, and the risk-dollar estimate per deliverable.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::plan::{PlanAnalysis, UNKNOWN};

pub const FILE_PATH_COLUMN: &str = "Deliverable File Path";
pub const PRIORITY_COLUMN: &str = "Priority";
pub const TYPE_COLUMN: &str = "Deliverable Type";
pub const ITEM_COLUMN: &str = "Readout Item";
pub const STATUS_COLUMN: &str = "Deliverable Exists?";

const DEFAULT_PRIORITY: &str = "MEDIUM";
const UNKNOWN_TYPE_RISK: u64 = 10_000;
const MAX_LISTED_PLANS: usize = 5;

/// Base risk exposure by priority, then deliverable type.
const RISK_VALUES: &[(&str, &[(&str, u64)])] = &[
    ("CRITICAL", &[("Policy", 500_000), ("Framework", 300_000), ("Assessment", 200_000), ("Procedure", 100_000)]),
    ("IMMEDIATE", &[("Policy", 500_000), ("Framework", 300_000), ("Assessment", 200_000), ("Procedure", 100_000)]),
    ("HIGH", &[("Policy", 250_000), ("Framework", 150_000), ("Assessment", 100_000), ("Procedure", 50_000)]),
    ("MEDIUM", &[("Policy", 100_000), ("Framework", 50_000), ("Assessment", 25_000), ("Procedure", 10_000)]),
];

/// Filename keyword → policy area. Matched against the upper-cased path.
const DELIVERABLE_AREAS: &[(&str, &str)] = &[
    ("CLAWBACK_AND_RECOVERY_POLICY", "Clawback/Recovery"),
    ("QUOTA_MANAGEMENT_POLICY", "Quota Management"),
    ("WINDFALL_LARGE_DEAL_POLICY", "Windfall/Large Deals"),
    ("SPIF_GOVERNANCE_POLICY", "SPIF Governance"),
    ("SECTION_409A_COMPLIANCE_POLICY", "Compliance (409A, State Wage)"),
    ("STATE_WAGE_LAW_COMPLIANCE_POLICY", "Compliance (409A, State Wage)"),
    ("SALES_CREDITING_POLICY", "Sales Crediting"),
    ("TERMINATION_POLICY", "Termination/Final Pay"),
    ("PAYMENT_TIMING_POLICY", "Payment Timing"),
    ("MID_PERIOD_CHANGE_POLICY", "Mid-Period Changes"),
    ("LEAVE_OF_ABSENCE_POLICY", "Leave of Absence"),
    ("DRAWS_AND_GUARANTEES_POLICY", "Draws/Guarantees"),
    ("DISPUTE_RESOLUTION", "Exceptions/Disputes"),
    ("EXCEPTION_REQUEST", "Exceptions/Disputes"),
];

/// Base risk for a (priority, type) pair.
///
/// Unknown priorities fall back to the MEDIUM row; unknown types to 10 000.
pub fn base_risk(priority: &str, deliverable_type: &str) -> u64 {
    let row = RISK_VALUES
        .iter()
        .find(|(p, _)| *p == priority)
        .or_else(|| RISK_VALUES.iter().find(|(p, _)| *p == DEFAULT_PRIORITY))
        .map(|(_, row)| *row)
        .unwrap_or(&[]);
    row.iter()
        .find(|(t, _)| *t == deliverable_type)
        .map(|(_, value)| *value)
        .unwrap_or(UNKNOWN_TYPE_RISK)
}

/// `base × (1 + 0.1 × plans_affected)`, each affected plan adding 10 %.
pub fn risk_mitigated(priority: &str, deliverable_type: &str, plans_affected: usize) -> u64 {
    let base = base_risk(priority, deliverable_type);
    base * (10 + plans_affected as u64) / 10
}

/// Policy area a deliverable addresses, from keywords in its file path.
pub fn policy_area_for_path(path: &str) -> Option<&'static str> {
    let upper = path.to_uppercase();
    DELIVERABLE_AREAS
        .iter()
        .find(|(key, _)| upper.contains(key))
        .map(|(_, area)| *area)
}

/// Plans recording NO or LIMITED coverage for `area`.
pub fn plans_needing(area: &str, plans: &[PlanAnalysis]) -> Vec<String> {
    plans
        .iter()
        .filter(|plan| plan.has_recorded_gap(area))
        .map(|plan| plan.plan_name.clone())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliverableStatus {
    Yes,
    /// Missing, but the declared path marks it as a draft.
    Draft,
    Missing,
    NoPath,
}

impl DeliverableStatus {
    pub fn classify(declared_path: &str, exists: bool) -> Self {
        if declared_path.is_empty() {
            Self::NoPath
        } else if exists {
            Self::Yes
        } else if declared_path.contains("DRAFT") {
            Self::Draft
        } else {
            Self::Missing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "YES",
            Self::Draft => "DRAFT",
            Self::Missing => "MISSING",
            Self::NoPath => "NO PATH",
        }
    }
}

impl fmt::Display for DeliverableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of looking for a declared deliverable on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileProbe {
    pub exists: bool,
    pub size: u64,
    pub resolved: PathBuf,
}

/// One checklist row, columns in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistRow {
    pub columns: Vec<(String, String)>,
}

impl ChecklistRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn file_path(&self) -> &str {
        self.get(FILE_PATH_COLUMN).unwrap_or_default()
    }

    pub fn priority(&self) -> &str {
        self.get(PRIORITY_COLUMN).unwrap_or(DEFAULT_PRIORITY)
    }

    pub fn deliverable_type(&self) -> &str {
        self.get(TYPE_COLUMN).unwrap_or(UNKNOWN)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Count(u64),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

/// A checklist row plus validation and risk columns.
#[derive(Debug, Clone, PartialEq)]
pub struct EnhancedDeliverable {
    pub row: ChecklistRow,
    pub status: DeliverableStatus,
    pub file_size: u64,
    pub actual_path: Option<PathBuf>,
    pub policy_area: Option<&'static str>,
    pub applicable_plans: Vec<String>,
    pub risk_mitigated: u64,
    pub verified_on: Option<NaiveDate>,
}

impl EnhancedDeliverable {
    pub fn item(&self) -> &str {
        self.row.get(ITEM_COLUMN).unwrap_or_default()
    }

    pub fn plans_summary(&self) -> String {
        if self.policy_area.is_none() {
            "N/A".to_string()
        } else if self.applicable_plans.is_empty() {
            "All plans have full coverage".to_string()
        } else {
            format!("{} plans need this", self.applicable_plans.len())
        }
    }

    pub fn plan_names(&self) -> String {
        let listed = self
            .applicable_plans
            .iter()
            .take(MAX_LISTED_PLANS)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        if self.applicable_plans.len() > MAX_LISTED_PLANS {
            format!("{listed}...")
        } else {
            listed
        }
    }

    /// Original columns followed by the enhancement columns.
    ///
    /// An enhancement column whose name already exists in the checklist
    /// replaces that value in place.
    pub fn columns(&self) -> Vec<(String, CellValue)> {
        let mut out: Vec<(String, CellValue)> = self
            .row
            .columns
            .iter()
            .map(|(name, value)| (name.clone(), CellValue::Text(value.clone())))
            .collect();

        let actual_path = match &self.actual_path {
            Some(path) => path.display().to_string(),
            None => "NOT FOUND".to_string(),
        };
        let note = match self.verified_on {
            Some(date) => format!("Verified {}", date.format("%Y-%m-%d")),
            None => "File not found in delivery package".to_string(),
        };

        let added = [
            (STATUS_COLUMN, CellValue::Text(self.status.as_str().to_string())),
            ("File Size", CellValue::Text(format_file_size(self.file_size))),
            ("Actual File Path", CellValue::Text(actual_path)),
            ("Policy Area", CellValue::Text(self.policy_area.unwrap_or(UNKNOWN).to_string())),
            ("Applies to Plans", CellValue::Text(self.plans_summary())),
            ("Plan Names", CellValue::Text(self.plan_names())),
            ("Plans Count", CellValue::Count(self.applicable_plans.len() as u64)),
            ("Risk Mitigated ($)", CellValue::Text(format_dollars(self.risk_mitigated))),
            ("Validation Notes", CellValue::Text(note)),
        ];

        for (name, value) in added {
            match out.iter_mut().find(|(existing, _)| existing == name) {
                Some(slot) => slot.1 = value,
                None => out.push((name.to_string(), value)),
            }
        }
        out
    }
}

/// Enhance one checklist row.
pub fn enhance(
    row: ChecklistRow,
    probe: &FileProbe,
    plans: &[PlanAnalysis],
    today: NaiveDate,
) -> EnhancedDeliverable {
    let status = DeliverableStatus::classify(row.file_path(), probe.exists);
    let policy_area = policy_area_for_path(row.file_path());
    let applicable_plans = policy_area
        .map(|area| plans_needing(area, plans))
        .unwrap_or_default();
    let risk = risk_mitigated(row.priority(), row.deliverable_type(), applicable_plans.len());
    let found = status == DeliverableStatus::Yes;

    EnhancedDeliverable {
        status,
        file_size: if found { probe.size } else { 0 },
        actual_path: found.then(|| probe.resolved.clone()),
        policy_area,
        applicable_plans,
        risk_mitigated: risk,
        verified_on: found.then_some(today),
        row,
    }
}

/// Existence counts across a checklist. NO PATH counts as missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliverableStats {
    pub exists: usize,
    pub draft: usize,
    pub missing: usize,
}

impl DeliverableStats {
    pub fn from_rows(rows: &[EnhancedDeliverable]) -> Self {
        let mut stats = Self::default();
        for row in rows {
            match row.status {
                DeliverableStatus::Yes => stats.exists += 1,
                DeliverableStatus::Draft => stats.draft += 1,
                DeliverableStatus::Missing | DeliverableStatus::NoPath => stats.missing += 1,
            }
        }
        stats
    }
}

pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    match bytes {
        0 => "0 KB".to_string(),
        b if b < KB => format!("{b} B"),
        b if b < MB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{:.1} MB", b as f64 / MB as f64),
    }
}

/// `650000` → `$650,000`.
pub fn format_dollars(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${grouped}")
}

/// Parse `$650,000` back to a number; malformed input is 0.
pub fn parse_dollars(text: &str) -> u64 {
    text.chars()
        .filter(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{Coverage, CoverageAssessment, CoverageStats, PolicyCoverage};
    use crate::plan::PlanMetadata;

    fn row(pairs: &[(&str, &str)]) -> ChecklistRow {
        ChecklistRow {
            columns: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn plan(name: &str, area: &str, level: Coverage) -> PlanAnalysis {
        let mut coverage = PolicyCoverage::new();
        coverage.insert(
            area.into(),
            CoverageAssessment {
                coverage: level,
                details: String::new(),
                original_policy: area.into(),
            },
        );
        PlanAnalysis {
            plan_name: name.into(),
            source_file: String::new(),
            metadata: PlanMetadata::default(),
            coverage_stats: CoverageStats::from_policy_coverage(&coverage),
            policy_coverage: coverage,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn critical_policy_three_plans() {
        assert_eq!(risk_mitigated("CRITICAL", "Policy", 3), 650_000);
    }

    #[test]
    fn no_plans_is_base_risk() {
        assert_eq!(risk_mitigated("HIGH", "Framework", 0), 150_000);
    }

    #[test]
    fn immediate_matches_critical() {
        assert_eq!(base_risk("IMMEDIATE", "Assessment"), base_risk("CRITICAL", "Assessment"));
    }

    #[test]
    fn unknown_priority_and_type_fallbacks() {
        assert_eq!(base_risk("LOW", "Policy"), 100_000);
        assert_eq!(base_risk("CRITICAL", "Template"), 10_000);
        assert_eq!(risk_mitigated("", "Unknown", 2), 12_000);
    }

    #[test]
    fn status_classification() {
        assert_eq!(DeliverableStatus::classify("", false), DeliverableStatus::NoPath);
        assert_eq!(DeliverableStatus::classify("a/B_DRAFT.docx", true), DeliverableStatus::Yes);
        assert_eq!(DeliverableStatus::classify("a/B_DRAFT.docx", false), DeliverableStatus::Draft);
        assert_eq!(DeliverableStatus::classify("a/b_draft.docx", false), DeliverableStatus::Missing);
    }

    #[test]
    fn area_from_path_keywords() {
        assert_eq!(
            policy_area_for_path("02_POLICIES/DRAFT_FOR_REVIEW/spif_governance_policy_DRAFT.docx"),
            Some("SPIF Governance")
        );
        assert_eq!(
            policy_area_for_path("04_PROCEDURES/EXCEPTION_REQUEST_FORM.docx"),
            Some("Exceptions/Disputes")
        );
        assert_eq!(policy_area_for_path("README.md"), None);
    }

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 KB");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024 + 512 * 1024), "3.5 MB");
    }

    #[test]
    fn dollars_round_trip_through_formatting() {
        assert_eq!(format_dollars(650_000), "$650,000");
        assert_eq!(format_dollars(1_000), "$1,000");
        assert_eq!(format_dollars(999), "$999");
        assert_eq!(format_dollars(1_234_567), "$1,234,567");
        assert_eq!(parse_dollars("$1,234,567"), 1_234_567);
    }

    #[test]
    fn enhance_found_deliverable() {
        let plans = vec![
            plan("A", "Clawback/Recovery", Coverage::No),
            plan("B", "Clawback/Recovery", Coverage::Limited),
            plan("C", "Clawback/Recovery", Coverage::Full),
            plan("D", "Clawback/Recovery", Coverage::No),
        ];
        let checklist = row(&[
            ("Readout Item", "Clawback policy"),
            ("Priority", "CRITICAL"),
            ("Deliverable Type", "Policy"),
            ("Deliverable File Path", "02_POLICIES/CLAWBACK_AND_RECOVERY_POLICY_DRAFT.docx"),
        ]);
        let probe = FileProbe {
            exists: true,
            size: 2048,
            resolved: PathBuf::from("/pkg/02_POLICIES/CLAWBACK_AND_RECOVERY_POLICY_DRAFT.docx"),
        };

        let enhanced = enhance(checklist, &probe, &plans, today());
        assert_eq!(enhanced.status, DeliverableStatus::Yes);
        assert_eq!(enhanced.applicable_plans, vec!["A", "B", "D"]);
        assert_eq!(enhanced.risk_mitigated, 650_000);
        assert_eq!(enhanced.item(), "Clawback policy");

        let cols = enhanced.columns();
        assert_eq!(cols.len(), 13);
        let get = |name: &str| {
            cols.iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.to_string())
                .unwrap()
        };
        assert_eq!(get("Deliverable Exists?"), "YES");
        assert_eq!(get("File Size"), "2.0 KB");
        assert_eq!(get("Policy Area"), "Clawback/Recovery");
        assert_eq!(get("Applies to Plans"), "3 plans need this");
        assert_eq!(get("Plan Names"), "A, B, D");
        assert_eq!(get("Plans Count"), "3");
        assert_eq!(get("Risk Mitigated ($)"), "$650,000");
        assert_eq!(get("Validation Notes"), "Verified 2026-10-18");
    }

    #[test]
    fn enhance_missing_deliverable() {
        let checklist = row(&[
            ("Priority", "HIGH"),
            ("Deliverable Type", "Procedure"),
            ("Deliverable File Path", "05_TRAINING/overview.pptx"),
        ]);
        let probe = FileProbe {
            exists: false,
            size: 0,
            resolved: PathBuf::from("/pkg/05_TRAINING/overview.pptx"),
        };
        let enhanced = enhance(checklist, &probe, &[], today());
        assert_eq!(enhanced.status, DeliverableStatus::Missing);
        assert!(enhanced.actual_path.is_none());
        assert_eq!(enhanced.plans_summary(), "N/A");
        assert_eq!(enhanced.risk_mitigated, 50_000);

        let cols = enhanced.columns();
        let note = cols.iter().find(|(k, _)| k == "Validation Notes").unwrap();
        assert_eq!(note.1, CellValue::Text("File not found in delivery package".into()));
        let path = cols.iter().find(|(k, _)| k == "Actual File Path").unwrap();
        assert_eq!(path.1, CellValue::Text("NOT FOUND".into()));
    }

    #[test]
    fn existing_enhancement_column_is_replaced_in_place() {
        let checklist = row(&[
            ("Deliverable Exists?", "stale"),
            ("Deliverable File Path", ""),
        ]);
        let enhanced = enhance(checklist, &FileProbe::default(), &[], today());
        let cols = enhanced.columns();
        assert_eq!(cols[0].0, "Deliverable Exists?");
        assert_eq!(cols[0].1, CellValue::Text("NO PATH".into()));
        assert_eq!(cols.len(), 10);
    }

    #[test]
    fn plan_names_are_capped_at_five() {
        let plans: Vec<_> = (1..=7)
            .map(|i| plan(&format!("P{i}"), "Payment Timing", Coverage::No))
            .collect();
        let checklist = row(&[("Deliverable File Path", "PAYMENT_TIMING_POLICY.docx")]);
        let enhanced = enhance(checklist, &FileProbe::default(), &plans, today());
        assert_eq!(enhanced.plan_names(), "P1, P2, P3, P4, P5...");
        assert_eq!(enhanced.plans_summary(), "7 plans need this");
    }

    #[test]
    fn stats_count_no_path_as_missing() {
        let mk = |path: &str, exists: bool| {
            enhance(
                row(&[("Deliverable File Path", path)]),
                &FileProbe {
                    exists,
                    ..Default::default()
                },
                &[],
                today(),
            )
        };
        let rows = vec![mk("", false), mk("X_DRAFT.docx", false), mk("y.docx", true), mk("z.docx", false)];
        let stats = DeliverableStats::from_rows(&rows);
        assert_eq!(stats, DeliverableStats { exists: 1, draft: 1, missing: 2 });
    }
}

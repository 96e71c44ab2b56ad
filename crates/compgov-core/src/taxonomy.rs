//! The 16-area compensation-policy taxonomy and the hand-authored tables keyed on it.

use std::fmt;

use serde::Serialize;

/// Standard policy areas, in canonical column order.
pub const POLICY_AREAS: [&str; 16] = [
    "Windfall/Large Deals",
    "Quota Management",
    "Territory Management",
    "Sales Crediting",
    "Clawback/Recovery",
    "SPIF Governance",
    "Termination/Final Pay",
    "New Hire/Onboarding",
    "Leave of Absence",
    "Payment Timing",
    "Compliance (409A, State Wage)",
    "Exceptions/Disputes",
    "Data/Systems/Controls",
    "Draws/Guarantees",
    "Mid-Period Changes",
    "International Requirements",
];

pub fn is_standard_area(label: &str) -> bool {
    POLICY_AREAS.contains(&label)
}

pub fn standard_areas() -> Vec<String> {
    POLICY_AREAS.iter().map(|s| s.to_string()).collect()
}

/// DRAFT policy → the policy areas it addresses.
///
/// Authored by hand from the policy texts; order matters for
/// [`draft_policy_for_area`], which returns the first hit.
pub const DRAFT_POLICY_AREAS: &[(&str, &[&str])] = &[
    (
        "Clawback And Recovery Policy",
        &["Clawback/Recovery", "Termination/Final Pay"],
    ),
    (
        "Quota Management Policy",
        &["Quota Management", "Mid-Period Changes"],
    ),
    (
        "Windfall Large Deal Policy",
        &["Windfall/Large Deals", "Exceptions/Disputes"],
    ),
    ("Spif Governance Policy", &["SPIF Governance"]),
    (
        "Section 409A Compliance Policy",
        &[
            "Compliance (409A, State Wage)",
            "Payment Timing",
            "Termination/Final Pay",
        ],
    ),
    (
        "State Wage Law Compliance Policy",
        &["Compliance (409A, State Wage)", "Payment Timing"],
    ),
];

/// First DRAFT policy that addresses `area`, if any.
pub fn draft_policy_for_area(area: &str) -> Option<&'static str> {
    DRAFT_POLICY_AREAS
        .iter()
        .find(|(_, areas)| areas.contains(&area))
        .map(|(policy, _)| *policy)
}

const CRITICAL_AREAS: &[&str] = &[
    "Windfall/Large Deals",
    "Compliance (409A, State Wage)",
    "Clawback/Recovery",
];

const HIGH_AREAS: &[&str] = &["Quota Management", "SPIF Governance", "Termination/Final Pay"];

/// Static risk bucket for a policy area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskImpact {
    Critical,
    High,
    Medium,
}

impl RiskImpact {
    pub fn for_area(area: &str) -> Self {
        if CRITICAL_AREAS.contains(&area) {
            Self::Critical
        } else if HIGH_AREAS.contains(&area) {
            Self::High
        } else {
            Self::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
        }
    }
}

impl fmt::Display for RiskImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

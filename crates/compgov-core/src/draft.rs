//! DRAFT policy summaries extracted from policy document text.

use serde::{Deserialize, Serialize};

/// DRAFT policy documents pending legal review.
pub const DRAFT_POLICY_FILES: [&str; 6] = [
    "CLAWBACK_AND_RECOVERY_POLICY_DRAFT.docx",
    "QUOTA_MANAGEMENT_POLICY_DRAFT.docx",
    "WINDFALL_LARGE_DEAL_POLICY_DRAFT.docx",
    "SPIF_GOVERNANCE_POLICY_DRAFT.docx",
    "SECTION_409A_COMPLIANCE_POLICY_DRAFT.docx",
    "STATE_WAGE_LAW_COMPLIANCE_POLICY_DRAFT.docx",
];

const PROVISION_KEYWORDS: &[&str] = &["threshold", "requirement", "approval", "process", "sla"];
const MAX_PROVISIONS: usize = 10;
const SECTION_CHARS: usize = 500;
const FULL_TEXT_CHARS: usize = 2000;
const NOT_EXTRACTED: &str = "Not extracted";

/// Plan families a policy applies to, detected by keyword in its text.
const PLAN_FAMILIES: &[(&str, &[&str])] = &[
    ("Medical", &["medical", "med surg"]),
    ("Dental", &["dental"]),
    ("Surgical", &["surgical", "surg"]),
    ("Specialty", &["specialty", "equipment"]),
    ("All Plans", &["all plans", "all compensation"]),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPolicySummary {
    pub file_name: String,
    pub policy_name: String,
    pub word_count: usize,
    pub purpose: String,
    pub scope: String,
    pub key_provisions: Vec<String>,
    pub applicable_plans: Vec<String>,
    pub full_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSummaryMetadata {
    pub source: String,
    pub total_policies: usize,
}

/// `draft-policies-summary.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSummaryReport {
    pub metadata: DraftSummaryMetadata,
    pub policies: Vec<DraftPolicySummary>,
}

/// `SECTION_409A_COMPLIANCE_POLICY_DRAFT` → `Section 409A Compliance Policy`.
pub fn policy_name_from_file(stem: &str) -> String {
    title_case(&stem.replace("_DRAFT", "").replace('_', " "))
}

/// Upper-case a letter when it follows a non-letter, lower-case it otherwise.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Summarize a policy document's purpose, scope, and key provisions.
pub fn analyze_policy_text(file_name: &str, text: &str) -> DraftPolicySummary {
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name);
    let lines: Vec<&str> = text.split('\n').collect();

    let mut purpose = String::new();
    let mut scope = String::new();
    let mut key_provisions = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        let len = line.chars().count();
        let following = || lines[(i + 1).min(lines.len())..(i + 4).min(lines.len())].join("\n");

        if lower.contains("purpose") && len < 100 {
            purpose = following();
        } else if lower.contains("scope") && len < 100 {
            scope = following();
        } else if PROVISION_KEYWORDS.iter().any(|k| lower.contains(k)) && len > 30 && len < 200 {
            key_provisions.push(line.trim().to_string());
        }
    }
    key_provisions.truncate(MAX_PROVISIONS);

    let lower_text = text.to_lowercase();
    let mut applicable_plans: Vec<String> = PLAN_FAMILIES
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lower_text.contains(k)))
        .map(|(family, _)| family.to_string())
        .collect();
    if applicable_plans.is_empty() {
        applicable_plans.push(crate::plan::UNKNOWN.to_string());
    }

    let section = |s: String| {
        if s.is_empty() {
            NOT_EXTRACTED.to_string()
        } else {
            truncate_chars(&s, SECTION_CHARS)
        }
    };

    DraftPolicySummary {
        file_name: file_name.to_string(),
        policy_name: policy_name_from_file(stem),
        word_count: text.split_whitespace().count(),
        purpose: section(purpose),
        scope: section(scope),
        key_provisions,
        applicable_plans,
        full_text: truncate_chars(text, FULL_TEXT_CHARS),
    }
}

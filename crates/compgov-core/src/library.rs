//! Policy library catalogue: the DRAFT and TEMPLATE policy documents and
//! the codes they are published under.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolicyStatus {
    /// Pending legal review.
    Draft,
    /// Ready to use.
    Template,
}

impl PolicyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Template => "TEMPLATE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryEntry {
    /// Source `.docx` file name.
    pub file_name: &'static str,
    pub code: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub framework_area: &'static str,
    pub status: PolicyStatus,
}

impl LibraryEntry {
    pub fn legal_review_required(&self) -> bool {
        self.status == PolicyStatus::Draft
    }

    pub fn markdown_file_name(&self) -> String {
        format!("{}.md", self.code)
    }
}

const fn entry(
    file_name: &'static str,
    code: &'static str,
    name: &'static str,
    category: &'static str,
    framework_area: &'static str,
    status: PolicyStatus,
) -> LibraryEntry {
    LibraryEntry {
        file_name,
        code,
        name,
        category,
        framework_area,
        status,
    }
}

use PolicyStatus::{Draft, Template};

pub const POLICY_LIBRARY: &[LibraryEntry] = &[
    entry("CLAWBACK_AND_RECOVERY_POLICY_DRAFT.docx", "SCP-001", "Clawback and Recovery Policy", "Financial Controls", "Clawback/Recovery", Draft),
    entry("QUOTA_MANAGEMENT_POLICY_DRAFT.docx", "SCP-002", "Quota Management Policy", "Performance Management", "Quota Management", Draft),
    entry("WINDFALL_LARGE_DEAL_POLICY_DRAFT.docx", "SCP-003", "Windfall and Large Deal Policy", "Deal Governance", "Windfall/Large Deals", Draft),
    entry("SPIF_GOVERNANCE_POLICY_DRAFT.docx", "SCP-004", "SPIF Governance Policy", "Incentive Programs", "SPIF Governance", Draft),
    entry("SECTION_409A_COMPLIANCE_POLICY_DRAFT.docx", "SCP-005", "Section 409A Compliance Policy", "Legal Compliance", "Compliance (409A, State Wage)", Draft),
    entry("STATE_WAGE_LAW_COMPLIANCE_POLICY_DRAFT.docx", "SCP-006", "State Wage Law Compliance Policy", "Legal Compliance", "Compliance (409A, State Wage)", Draft),
    entry("SALES_CREDITING_POLICY.docx", "SCP-007", "Sales Crediting Policy", "Commission Rules", "Sales Crediting", Template),
    entry("DRAWS_AND_GUARANTEES_POLICY.docx", "SCP-008", "Draws and Guarantees Policy", "Financial Controls", "Draws/Guarantees", Template),
    entry("LEAVE_OF_ABSENCE_POLICY.docx", "SCP-009", "Leave of Absence Policy", "HR Policies", "Leave of Absence", Template),
    entry("MID_PERIOD_CHANGE_POLICY.docx", "SCP-010", "Mid-Period Change Policy", "Plan Administration", "Mid-Period Changes", Template),
    entry("PAYMENT_TIMING_POLICY.docx", "SCP-011", "Payment Timing Policy", "Payroll", "Payment Timing", Template),
    entry("TERMINATION_POLICY.docx", "SCP-012", "Termination and Final Pay Policy", "HR Policies", "Termination/Final Pay", Template),
    entry("DATA_RETENTION_POLICY.docx", "SCP-013", "Data and Systems Controls Policy", "IT Governance", "Data/Systems/Controls", Template),
    entry("CAP_AND_THRESHOLD_GUIDELINES.docx", "SCP-014", "Territory Management Guidelines", "Territory Rules", "Territory Management", Template),
    entry("STANDARD_TERMS_AND_CONDITIONS.docx", "SCP-015", "Exception and Dispute Resolution Policy", "Governance", "Exceptions/Disputes", Template),
];

/// One published policy in `index.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub code: String,
    pub name: String,
    pub category: String,
    pub framework_area: String,
    pub status: PolicyStatus,
    pub legal_review_required: bool,
    pub file_path: String,
    pub word_count: usize,
}

impl IndexEntry {
    pub fn new(entry: &LibraryEntry, file_path: String, word_count: usize) -> Self {
        Self {
            code: entry.code.to_string(),
            name: entry.name.to_string(),
            category: entry.category.to_string(),
            framework_area: entry.framework_area.to_string(),
            status: entry.status,
            legal_review_required: entry.legal_review_required(),
            file_path,
            word_count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub total_policies: usize,
    pub draft_policies: usize,
    pub template_policies: usize,
    pub extracted_date: String,
}

/// `index.json` of the policy library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryIndex {
    pub policies: Vec<IndexEntry>,
    pub metadata: IndexMetadata,
}

impl LibraryIndex {
    pub fn new(policies: Vec<IndexEntry>, extracted_date: String) -> Self {
        let count = |status: PolicyStatus| policies.iter().filter(|p| p.status == status).count();
        let metadata = IndexMetadata {
            total_policies: policies.len(),
            draft_policies: count(PolicyStatus::Draft),
            template_policies: count(PolicyStatus::Template),
            extracted_date,
        };
        Self { policies, metadata }
    }
}

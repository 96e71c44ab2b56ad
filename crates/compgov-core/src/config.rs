//! Shared configuration: input and output locations for every operation.
//!
//! Built once by the binary and passed by reference; nothing reads the
//! environment or the working directory after that.

use std::path::{Path, PathBuf};

use crate::plan::PlanNameMatch;

pub const DEFAULT_ARCHIVE_ROOT: &str = "data/henryschein-archive";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_REPORT_DIR: &str = ".";
pub const DEFAULT_LIBRARY_DIR: &str = "lib/data/policies";
pub const DEFAULT_DELIVERABLES_CSV: &str = "Henry_Schein_Readout_Deliverables_Mapping.csv";

pub const PLAN_ANALYSIS_JSON: &str = "json-plan-analysis.json";
pub const DRAFT_SUMMARY_JSON: &str = "draft-policies-summary.json";
pub const PLAN_DATA_JSON: &str = "henryschein-plan-data.json";
pub const LIBRARY_INDEX_JSON: &str = "index.json";
pub const MATRIX_WORKBOOK: &str = "Henry_Schein_Policy_Coverage_Matrix.xlsx";
pub const DELIVERABLES_WORKBOOK: &str = "Henry_Schein_Deliverables_Mapping_CORRECTED.xlsx";

const MASTER_WORKBOOK: &str = "Analysis/Comp Analysis/workbooks/master/BHG_01_HS_Comp_Plan_Analysis_FINAL.xlsx";
const CLAUSE_DIR: &str = "Analysis/Comp Analysis/plan_analysis/medical";
const DELIVERY_PACKAGE: &str = "CLIENT_DELIVERY_PACKAGE";
const POLICIES_DIR: &str = "02_POLICIES";
const DRAFTS_DIR: &str = "DRAFT_FOR_REVIEW";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the client archive holding workbooks, clause extracts and the
    /// delivery package.
    pub archive_root: PathBuf,
    /// JSON intermediates.
    pub output_dir: PathBuf,
    /// Generated workbooks.
    pub report_dir: PathBuf,
    /// Markdown policy library.
    pub library_dir: PathBuf,
    /// Deliverables checklist CSV.
    pub deliverables_csv: PathBuf,
    pub plan_name_match: PlanNameMatch,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive_root: PathBuf::from(DEFAULT_ARCHIVE_ROOT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            library_dir: PathBuf::from(DEFAULT_LIBRARY_DIR),
            deliverables_csv: PathBuf::from(DEFAULT_DELIVERABLES_CSV),
            plan_name_match: PlanNameMatch::default(),
        }
    }
}

impl Config {
    pub fn master_workbook(&self) -> PathBuf {
        self.archive_root.join(MASTER_WORKBOOK)
    }

    pub fn clause_dir(&self) -> PathBuf {
        self.archive_root.join(CLAUSE_DIR)
    }

    pub fn delivery_package(&self) -> PathBuf {
        self.archive_root.join(DELIVERY_PACKAGE)
    }

    pub fn policies_dir(&self) -> PathBuf {
        self.delivery_package().join(POLICIES_DIR)
    }

    pub fn drafts_dir(&self) -> PathBuf {
        self.policies_dir().join(DRAFTS_DIR)
    }

    pub fn plan_analysis_json(&self) -> PathBuf {
        self.output_dir.join(PLAN_ANALYSIS_JSON)
    }

    pub fn draft_summary_json(&self) -> PathBuf {
        self.output_dir.join(DRAFT_SUMMARY_JSON)
    }

    pub fn plan_data_json(&self) -> PathBuf {
        self.output_dir.join(PLAN_DATA_JSON)
    }

    pub fn library_index_json(&self) -> PathBuf {
        self.library_dir.join(LIBRARY_INDEX_JSON)
    }

    pub fn matrix_workbook(&self) -> PathBuf {
        self.report_dir.join(MATRIX_WORKBOOK)
    }

    pub fn deliverables_workbook(&self) -> PathBuf {
        self.report_dir.join(DELIVERABLES_WORKBOOK)
    }

    /// Where a library document lives: DRAFTs under DRAFT_FOR_REVIEW,
    /// templates directly under the policies folder.
    pub fn library_source(&self, file_name: &str, draft: bool) -> PathBuf {
        let dir = if draft {
            self.drafts_dir()
        } else {
            self.policies_dir()
        };
        dir.join(file_name)
    }

    /// Render a path relative to the archive root when possible.
    pub fn display_relative<'a>(&self, path: &'a Path) -> std::path::Display<'a> {
        path.strip_prefix(&self.archive_root)
            .unwrap_or(path)
            .display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.archive_root, PathBuf::from("data/henryschein-archive"));
        assert_eq!(config.plan_name_match, PlanNameMatch::Normalized);
        assert_eq!(config.plan_data_json(), PathBuf::from("output/henryschein-plan-data.json"));
        assert_eq!(
            config.matrix_workbook(),
            PathBuf::from("./Henry_Schein_Policy_Coverage_Matrix.xlsx")
        );
    }

    #[test]
    fn derived_archive_paths() {
        let config = Config {
            archive_root: PathBuf::from("/archive"),
            ..Config::default()
        };
        assert_eq!(
            config.drafts_dir(),
            PathBuf::from("/archive/CLIENT_DELIVERY_PACKAGE/02_POLICIES/DRAFT_FOR_REVIEW")
        );
        assert_eq!(
            config.clause_dir(),
            PathBuf::from("/archive/Analysis/Comp Analysis/plan_analysis/medical")
        );
        assert!(config.master_workbook().ends_with("BHG_01_HS_Comp_Plan_Analysis_FINAL.xlsx"));
        assert_eq!(
            config.library_source("TERMINATION_POLICY.docx", false),
            PathBuf::from("/archive/CLIENT_DELIVERY_PACKAGE/02_POLICIES/TERMINATION_POLICY.docx")
        );
    }

    #[test]
    fn relative_display() {
        let config = Config {
            archive_root: PathBuf::from("/archive"),
            ..Config::default()
        };
        let path = config.master_workbook();
        assert_eq!(
            config.display_relative(&path).to_string(),
            "Analysis/Comp Analysis/workbooks/master/BHG_01_HS_Comp_Plan_Analysis_FINAL.xlsx"
        );
    }
}

//! Input pipelines: master workbook extraction and clause-extract parsing.

use std::collections::BTreeSet;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use compgov_classify::{CoverageClassifier, aggregate_plan, build_report, unmapped_labels};
use compgov_core::plan::merge_metadata;
use compgov_core::{AnalysisReport, Config, PlanDataReport};
use compgov_store::{MasterWorkbook, find_clause_files, read_clause_file, write_json};
use tracing::{error, info, warn};

pub struct WorkbookExtract {
    pub sheets: Vec<String>,
    pub metadata_matched: usize,
    pub report: PlanDataReport,
}

/// Master workbook → `henryschein-plan-data.json`.
pub fn run_extract_workbook(config: &Config, today: NaiveDate) -> anyhow::Result<WorkbookExtract> {
    let path = config.master_workbook();
    eprintln!("  Source: {}", path.display());

    let mut workbook = MasterWorkbook::open(&path).context("opening master workbook")?;
    let sheets = workbook.sheet_names();

    let (mut plans, policy_areas) = workbook
        .coverage_matrix()
        .context("reading coverage matrix")?;
    if plans.is_empty() {
        bail!("no plans extracted from coverage matrix in {}", path.display());
    }
    eprintln!(
        "  Extracted {} policy areas for {} plans",
        policy_areas.len(),
        plans.len()
    );

    let details = workbook
        .executive_summary()
        .context("reading executive summary")?;
    let metadata_matched = merge_metadata(&mut plans, &details, config.plan_name_match);
    if metadata_matched < plans.len() {
        warn!(
            matched = metadata_matched,
            plans = plans.len(),
            "executive summary has no row for some plans"
        );
    }

    let report = PlanDataReport::build(
        path.display().to_string(),
        today.format("%Y-%m-%d").to_string(),
        policy_areas,
        plans,
    );
    write_json(&config.plan_data_json(), &report).context("writing plan data")?;

    Ok(WorkbookExtract {
        sheets,
        metadata_matched,
        report,
    })
}

/// Clause extracts → `json-plan-analysis.json`.
///
/// A file that cannot be read is logged and skipped; no files at all is an
/// error.
pub fn run_parse_plans(config: &Config) -> anyhow::Result<AnalysisReport> {
    let dir = config.clause_dir();
    eprintln!("  Source: {}", dir.display());

    let files = find_clause_files(&dir).context("locating clause extracts")?;
    if files.is_empty() {
        bail!("no clause extract files found in {}", dir.display());
    }
    eprintln!("  Found {} clause extract files", files.len());

    let classifier = CoverageClassifier::new().context("compiling coverage indicators")?;
    let mut plans = Vec::with_capacity(files.len());
    let mut unmapped = BTreeSet::new();

    for path in &files {
        let records = match read_clause_file(path) {
            Ok(records) => records,
            Err(e) => {
                error!(path = %path.display(), error = %e, "skipping unreadable clause file");
                continue;
            }
        };
        unmapped.extend(unmapped_labels(&records));
        let source_file = config.display_relative(path).to_string();
        match aggregate_plan(&records, &source_file, &classifier) {
            Some(plan) => plans.push(plan),
            None => warn!(path = %path.display(), "clause file has no records"),
        }
    }
    eprintln!("  Parsed {} plans", plans.len());
    if !unmapped.is_empty() {
        warn!(count = unmapped.len(), "labels outside the standard policy areas");
    }

    let report = build_report(plans, &dir.display().to_string(), files.len(), unmapped);
    write_json(&config.plan_analysis_json(), &report).context("writing plan analysis")?;
    info!(
        plans = report.global_stats.total_plans,
        average = report.global_stats.average_coverage,
        "plan analysis complete"
    );
    Ok(report)
}

//! Workbook pipelines: coverage matrix and deliverables mapping.

use std::collections::BTreeMap;
use std::fs;

use anyhow::Context;
use chrono::NaiveDate;
use compgov_core::deliverable::{DeliverableStats, EnhancedDeliverable, enhance};
use compgov_core::plan::merge_metadata;
use compgov_core::taxonomy::standard_areas;
use compgov_core::{AnalysisReport, Config, PlanAnalysis, PlanDataReport, PlanMetadata};
use compgov_report::{MatrixSummary, build_deliverables_workbook, build_matrix_workbook};
use compgov_store::{StoreError, probe_file, read_checklist, read_json};
use tracing::{info, warn};

/// `json-plan-analysis.json` → coverage matrix workbook.
///
/// Business unit and plan type come from `henryschein-plan-data.json` when
/// it has been extracted.
pub fn run_build_matrix(config: &Config, today: NaiveDate) -> anyhow::Result<MatrixSummary> {
    let source = config.plan_analysis_json();
    let report: AnalysisReport = read_json(&source).context("loading plan analysis")?;
    let mut plans = report.plans;
    let mut areas = report.metadata.standard_policy_areas;
    if areas.is_empty() {
        areas = standard_areas();
    }
    eprintln!("  Loaded {} plans and {} policy areas", plans.len(), areas.len());

    match read_json::<PlanDataReport>(&config.plan_data_json()) {
        Ok(data) => {
            let details: BTreeMap<String, PlanMetadata> = data
                .plans
                .into_iter()
                .map(|p| (p.plan_name, p.metadata))
                .collect();
            let matched = merge_metadata(&mut plans, &details, config.plan_name_match);
            info!(matched, plans = plans.len(), "merged workbook metadata");
        }
        Err(e) if e.is_not_found() => {
            warn!("plan data not extracted; business unit and plan type left Unknown");
        }
        Err(e) => return Err(e).context("loading plan data"),
    }

    let target = config.matrix_workbook();
    fs::create_dir_all(&config.report_dir)
        .with_context(|| format!("creating {}", config.report_dir.display()))?;
    build_matrix_workbook(&plans, &areas, today, &target).context("writing coverage matrix")
}

pub struct EnhancedChecklist {
    pub rows: Vec<EnhancedDeliverable>,
    pub stats: DeliverableStats,
}

/// Checklist CSV + delivery package + plan analysis → deliverables workbook.
///
/// The checklist is required. Without plan analysis every row is scored
/// with no affected plans.
pub fn run_enhance_deliverables(
    config: &Config,
    today: NaiveDate,
) -> anyhow::Result<EnhancedChecklist> {
    let (headers, checklist) =
        read_checklist(&config.deliverables_csv).context("reading deliverables checklist")?;
    eprintln!(
        "  Loaded {} deliverables ({} columns)",
        checklist.len(),
        headers.len()
    );

    let plans = load_plans(config)?;
    let package = config.delivery_package();
    let rows: Vec<EnhancedDeliverable> = checklist
        .into_iter()
        .map(|row| {
            let probe = probe_file(&package, row.file_path());
            enhance(row, &probe, &plans, today)
        })
        .collect();
    let stats = DeliverableStats::from_rows(&rows);

    let target = config.deliverables_workbook();
    fs::create_dir_all(&config.report_dir)
        .with_context(|| format!("creating {}", config.report_dir.display()))?;
    build_deliverables_workbook(&rows, stats, today, &target)
        .context("writing deliverables workbook")?;
    Ok(EnhancedChecklist { rows, stats })
}

fn load_plans(config: &Config) -> anyhow::Result<Vec<PlanAnalysis>> {
    match read_json::<AnalysisReport>(&config.plan_analysis_json()) {
        Ok(report) => Ok(report.plans),
        Err(StoreError::InputNotFound(path)) => {
            warn!(path = %path.display(), "plan analysis not found; plan counts will be zero");
            Ok(Vec::new())
        }
        Err(e) => Err(e).context("loading plan analysis"),
    }
}

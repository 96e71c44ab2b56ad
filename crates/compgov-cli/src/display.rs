//! Console summaries printed after each subcommand.
//!
//! Pipelines report progress on stderr; the summaries here go to stdout.

use std::path::Path;

use compgov_core::deliverable::{EnhancedDeliverable, format_dollars};
use compgov_core::draft::DraftSummaryReport;
use compgov_core::library::LibraryIndex;
use compgov_core::{AnalysisReport, CoverageStats};
use compgov_report::MatrixSummary;
use compgov_report::matrix::{APPLICABILITY_SHEET, DETAILS_SHEET, GAPS_SHEET, SUMMARY_SHEET};

use crate::extract::WorkbookExtract;
use crate::reports::EnhancedChecklist;

const RULE_WIDTH: usize = 90;
const NAME_WIDTH: usize = 42;
const TOP_RISKS: usize = 10;

// ── Public API ──

pub fn print_workbook_extract(extract: &WorkbookExtract) {
    let report = &extract.report;
    println!("=== Plan data ===");
    print_field("Sheets", extract.sheets.len());
    print_field("Plans", report.metadata.total_plans);
    print_field("Policy areas", report.metadata.total_policy_areas);
    print_field("Metadata matched", extract.metadata_matched);
    println!();

    println!("Plan coverage");
    rule();
    for plan in &report.plans {
        if let Some(stats) = report.coverage_stats.plan_coverage_percentages.get(&plan.plan_name) {
            println!("{}", coverage_line(&plan.plan_name, stats));
        }
    }
    rule();
}

pub fn print_plan_ranking(report: &AnalysisReport) {
    let stats = &report.global_stats;
    println!("=== Plan analysis ===");
    print_field("Plans", stats.total_plans);
    print_field("Policy areas", stats.total_policy_areas_tracked);
    print_field("Average coverage", format!("{:.1}%", stats.average_coverage));
    if !report.metadata.unmapped_labels.is_empty() {
        print_field("Unmapped labels", report.metadata.unmapped_labels.join(", "));
    }
    println!();

    println!("Plan coverage ranking");
    rule();
    for (name, stats) in ranking(report) {
        println!("{}", coverage_line(name, stats));
    }
    rule();
}

pub fn print_draft_summary(report: &DraftSummaryReport) {
    println!("=== DRAFT policies ({}) ===", report.metadata.total_policies);
    rule();
    for policy in &report.policies {
        println!(
            "  {:<52} | {:>5} words",
            truncate(&policy.policy_name, 50),
            policy.word_count
        );
    }
    rule();
}

pub fn print_library_index(index: &LibraryIndex) {
    let meta = &index.metadata;
    println!("=== Policy library ===");
    print_field("Policies", meta.total_policies);
    print_field("DRAFT", meta.draft_policies);
    print_field("TEMPLATE", meta.template_policies);
    println!();
    for policy in &index.policies {
        println!(
            "  {:<8} {:<45} {:<9} {:>6} words",
            policy.code,
            truncate(&policy.name, 44),
            policy.status.as_str(),
            policy.word_count
        );
    }
}

pub fn print_matrix_summary(summary: &MatrixSummary, path: &Path) {
    println!("=== Policy coverage matrix ===");
    print_field("Workbook", path.display());
    println!(
        "  1. {SUMMARY_SHEET} ({} x {} matrix)",
        summary.plans, summary.policy_areas
    );
    println!("  2. {GAPS_SHEET} ({} NO and LIMITED rows)", summary.gaps);
    println!(
        "  3. {APPLICABILITY_SHEET} ({} DRAFT policies)",
        summary.draft_policies
    );
    println!("  4. {DETAILS_SHEET} ({} plans)", summary.plans);
}

pub fn print_deliverables(checklist: &EnhancedChecklist) {
    let stats = &checklist.stats;
    println!("=== Deliverables mapping ===");
    print_field("Total", checklist.rows.len());
    print_field("Exists", stats.exists);
    print_field("Draft", stats.draft);
    print_field("Missing", stats.missing);
    println!();

    println!("Top {TOP_RISKS} risk mitigation");
    rule();
    for row in top_risks(&checklist.rows, TOP_RISKS) {
        println!(
            "  {:<50} {:>12}  {}",
            truncate(row.item(), 48),
            format_dollars(row.risk_mitigated),
            row.plans_summary()
        );
    }
    rule();
}

// ── Helpers ──

fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("  {label:<26} {value}");
}

fn rule() {
    println!("{}", "═".repeat(RULE_WIDTH));
}

fn coverage_line(name: &str, stats: &CoverageStats) -> String {
    format!(
        "  {:<width$} | Full: {:2} | Limited: {:2} | No: {:2} | {:5.1}%",
        truncate(name, NAME_WIDTH - 2),
        stats.full,
        stats.limited,
        stats.no,
        stats.percentage,
        width = NAME_WIDTH
    )
}

/// Plans by descending coverage; ties keep file order.
fn ranking(report: &AnalysisReport) -> Vec<(&str, &CoverageStats)> {
    let mut ranked: Vec<_> = report
        .plans
        .iter()
        .map(|p| (p.plan_name.as_str(), &p.coverage_stats))
        .collect();
    ranked.sort_by(|a, b| b.1.percentage.total_cmp(&a.1.percentage));
    ranked
}

/// Highest risk first; ties keep checklist order.
fn top_risks(rows: &[EnhancedDeliverable], n: usize) -> Vec<&EnhancedDeliverable> {
    let mut sorted: Vec<_> = rows.iter().collect();
    sorted.sort_by(|a, b| b.risk_mitigated.cmp(&a.risk_mitigated));
    sorted.truncate(n);
    sorted
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

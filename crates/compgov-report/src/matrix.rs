//! Policy coverage matrix workbook.
//!
//! Four tabs: plan × area coverage summary, gap details, DRAFT policy
//! applicability, and plan inventory.

use std::path::Path;

use chrono::NaiveDate;
use compgov_core::gap::{Applicability, GapPriority, GapRow, collect_gaps, draft_applicability};
use compgov_core::plan::PlanAnalysis;
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};
use tracing::info;

use crate::ReportError;
use crate::style::{self, FULL_GREEN, LIMITED_YELLOW, NO_RED};

pub const SUMMARY_SHEET: &str = "Plan Coverage Summary";
pub const GAPS_SHEET: &str = "Gap Details";
pub const APPLICABILITY_SHEET: &str = "BHG Policy Applicability";
pub const DETAILS_SHEET: &str = "Plan Details";

const MAX_LISTED_PLANS: usize = 10;

/// Counts reported after the workbook is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatrixSummary {
    pub plans: usize,
    pub policy_areas: usize,
    pub gaps: usize,
    pub draft_policies: usize,
}

/// Render the four-tab matrix workbook and save it to `path`.
pub fn build_matrix_workbook(
    plans: &[PlanAnalysis],
    areas: &[String],
    generated: NaiveDate,
    path: &Path,
) -> Result<MatrixSummary, ReportError> {
    let gaps = collect_gaps(plans, areas);
    let applicability = draft_applicability(plans);

    let mut workbook = Workbook::new();
    write_summary(workbook.add_worksheet().set_name(SUMMARY_SHEET)?, plans, areas, generated)?;
    write_gaps(workbook.add_worksheet().set_name(GAPS_SHEET)?, &gaps)?;
    write_applicability(
        workbook.add_worksheet().set_name(APPLICABILITY_SHEET)?,
        &applicability,
    )?;
    write_details(workbook.add_worksheet().set_name(DETAILS_SHEET)?, plans)?;
    workbook.save(path)?;

    let summary = MatrixSummary {
        plans: plans.len(),
        policy_areas: areas.len(),
        gaps: gaps.len(),
        draft_policies: applicability.len(),
    };
    info!(path = %path.display(), ?summary, "wrote coverage matrix workbook");
    Ok(summary)
}

// ── Tab 1: coverage summary ──

fn write_summary(
    ws: &mut Worksheet,
    plans: &[PlanAnalysis],
    areas: &[String],
    generated: NaiveDate,
) -> Result<(), ReportError> {
    ws.merge_range(
        0,
        0,
        0,
        17,
        "Henry Schein Compensation Plans - Policy Coverage Matrix",
        &style::title(),
    )?;
    ws.merge_range(
        1,
        0,
        1,
        17,
        &format!(
            "Total Plans: {} | Policy Areas: {} | Generated: {}",
            plans.len(),
            areas.len(),
            generated.format("%Y-%m")
        ),
        &style::subtitle(),
    )?;

    let header_row = 3;
    let pct_col = (areas.len() + 1) as u16;
    ws.write_string_with_format(
        header_row,
        0,
        "Plan Name",
        &style::header()
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter),
    )?;
    let area_header = style::header()
        .set_font_size(9)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap();
    for (i, area) in areas.iter().enumerate() {
        ws.write_string_with_format(header_row, (i + 1) as u16, area, &area_header)?;
    }
    ws.write_string_with_format(
        header_row,
        pct_col,
        "Coverage %",
        &style::header().set_align(FormatAlign::Center),
    )?;

    let mut last_row = header_row;
    for (i, plan) in plans.iter().enumerate() {
        let row = header_row + 1 + i as u32;
        last_row = row;

        ws.write_string_with_format(row, 0, &plan.plan_name, &style::zebra(Format::new().set_font_size(10), i))?;
        for (j, area) in areas.iter().enumerate() {
            let coverage = plan.coverage_for(area);
            let format = Format::new()
                .set_font_size(9)
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_background_color(style::coverage_color(coverage));
            ws.write_string_with_format(row, (j + 1) as u16, coverage.as_str(), &format)?;
        }
        let pct_format = style::zebra(
            Format::new()
                .set_font_size(10)
                .set_bold()
                .set_align(FormatAlign::Center),
            i,
        );
        ws.write_string_with_format(
            row,
            pct_col,
            style::percent(plan.coverage_stats.percentage),
            &pct_format,
        )?;
    }

    ws.set_column_width(0, 35)?;
    for col in 1..=pct_col {
        ws.set_column_width(col, 12)?;
    }

    let legend = last_row + 3;
    ws.write_string_with_format(legend, 0, "Legend:", &Format::new().set_bold())?;
    let entries = [
        (FULL_GREEN, "FULL", "Detailed enforceable policy with thresholds, workflows, SLAs"),
        (LIMITED_YELLOW, "LIMITED", "Mentions policy area but lacks detail or clear process"),
        (NO_RED, "NO", "Silent on policy area or only disclaimer language"),
    ];
    for (k, (rgb, label, meaning)) in entries.into_iter().enumerate() {
        let col = 1 + 2 * k as u16;
        ws.write_string_with_format(
            legend,
            col,
            label,
            &Format::new().set_background_color(style::fill(rgb)),
        )?;
        ws.write_string(legend, col + 1, meaning)?;
    }
    Ok(())
}

// ── Tab 2: gaps ──

const GAP_HEADERS: [&str; 7] = [
    "Plan Name",
    "Policy Area",
    "Current Coverage",
    "What's Missing",
    "BHG Policy That Addresses This",
    "Priority",
    "Risk Impact",
];

fn write_gaps(ws: &mut Worksheet, gaps: &[GapRow]) -> Result<(), ReportError> {
    ws.merge_range(
        0,
        0,
        0,
        6,
        "Policy Gap Analysis - NO and LIMITED Coverage Details",
        &style::title(),
    )?;
    write_headers(ws, 2, &GAP_HEADERS, &style::header_wrapped())?;

    let body = style::body_top();
    let high = style::body_top().set_background_color(style::fill(NO_RED));
    for (i, gap) in gaps.iter().enumerate() {
        let row = 3 + i as u32;
        ws.write_string_with_format(row, 0, &gap.plan_name, &body)?;
        ws.write_string_with_format(row, 1, &gap.policy_area, &body)?;
        ws.write_string_with_format(row, 2, gap.coverage.as_str(), &body)?;
        ws.write_string_with_format(row, 3, &gap.details, &body)?;
        ws.write_string_with_format(row, 4, gap.addressed_by_label(), &body)?;
        let priority_format = if gap.priority == GapPriority::High { &high } else { &body };
        ws.write_string_with_format(row, 5, gap.priority.as_str(), priority_format)?;
        ws.write_string_with_format(row, 6, gap.risk.as_str(), &body)?;
    }

    for (col, width) in [30, 20, 12, 50, 30, 10, 12].into_iter().enumerate() {
        ws.set_column_width(col as u16, width)?;
    }
    Ok(())
}

// ── Tab 3: DRAFT policy applicability ──

const APPLICABILITY_HEADERS: [&str; 6] = [
    "BHG DRAFT Policy",
    "Policy Areas Addressed",
    "# Plans Needing This",
    "Plan Names",
    "Priority",
    "Implementation Complexity",
];

fn listed_plans(names: &[String]) -> String {
    let listed = names
        .iter()
        .take(MAX_LISTED_PLANS)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");
    if names.len() > MAX_LISTED_PLANS {
        format!("{listed}...")
    } else {
        listed
    }
}

fn write_applicability(ws: &mut Worksheet, rows: &[Applicability]) -> Result<(), ReportError> {
    use compgov_core::gap::AdoptionPriority;

    ws.merge_range(0, 0, 0, 5, "BHG DRAFT Policy Applicability Analysis", &style::title())?;
    write_headers(ws, 2, &APPLICABILITY_HEADERS, &style::header_wrapped())?;

    let body = style::body_top();
    for (i, item) in rows.iter().enumerate() {
        let row = 3 + i as u32;
        ws.write_string_with_format(row, 0, item.policy, &body)?;
        ws.write_string_with_format(row, 1, item.areas.join("\n"), &body)?;
        ws.write_number_with_format(row, 2, item.plans_needing.len() as f64, &body)?;
        ws.write_string_with_format(row, 3, listed_plans(&item.plans_needing), &body)?;
        let rgb = match item.priority {
            AdoptionPriority::MustHave => NO_RED,
            AdoptionPriority::ShouldHave => LIMITED_YELLOW,
            AdoptionPriority::NiceToHave => FULL_GREEN,
        };
        ws.write_string_with_format(
            row,
            4,
            item.priority.as_str(),
            &style::body_top().set_background_color(style::fill(rgb)),
        )?;
        ws.write_string_with_format(row, 5, item.complexity.as_str(), &body)?;
    }

    for (col, width) in [35, 30, 15, 40, 15, 20].into_iter().enumerate() {
        ws.set_column_width(col as u16, width)?;
    }
    Ok(())
}

// ── Tab 4: plan inventory ──

const DETAIL_HEADERS: [&str; 8] = [
    "Plan Name",
    "Business Unit",
    "Plan Type",
    "Coverage %",
    "Full Policies",
    "Limited Policies",
    "No Policies",
    "Source File",
];

fn write_details(ws: &mut Worksheet, plans: &[PlanAnalysis]) -> Result<(), ReportError> {
    ws.merge_range(0, 0, 0, 7, "Henry Schein Compensation Plan Inventory", &style::title())?;
    write_headers(ws, 2, &DETAIL_HEADERS, &style::header().set_align(FormatAlign::Center))?;

    for (i, plan) in plans.iter().enumerate() {
        let row = 3 + i as u32;
        let format = style::zebra(
            Format::new()
                .set_font_size(9)
                .set_align(FormatAlign::VerticalCenter),
            i,
        );
        let stats = &plan.coverage_stats;
        ws.write_string_with_format(row, 0, &plan.plan_name, &format)?;
        ws.write_string_with_format(row, 1, plan.metadata.business_unit(), &format)?;
        ws.write_string_with_format(row, 2, plan.metadata.plan_type(), &format)?;
        ws.write_string_with_format(row, 3, style::percent(stats.percentage), &format)?;
        ws.write_number_with_format(row, 4, stats.full as f64, &format)?;
        ws.write_number_with_format(row, 5, stats.limited as f64, &format)?;
        ws.write_number_with_format(row, 6, stats.no as f64, &format)?;
        ws.write_string_with_format(row, 7, &plan.source_file, &format)?;
    }

    for (col, width) in [35, 20, 25, 12, 12, 15, 12, 40].into_iter().enumerate() {
        ws.set_column_width(col as u16, width)?;
    }
    Ok(())
}

// ── Helpers ──

pub(crate) fn write_headers(
    ws: &mut Worksheet,
    row: u32,
    headers: &[&str],
    format: &Format,
) -> Result<(), ReportError> {
    for (col, header) in headers.iter().enumerate() {
        ws.write_string_with_format(row, col as u16, *header, format)?;
    }
    Ok(())
}

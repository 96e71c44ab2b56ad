//! Enhanced deliverables mapping workbook.

use std::path::Path;

use chrono::NaiveDate;
use compgov_core::deliverable::{
    CellValue, DeliverableStats, DeliverableStatus, EnhancedDeliverable, STATUS_COLUMN,
};
use rust_xlsxwriter::{Format, FormatAlign, Workbook};
use tracing::info;

use crate::ReportError;
use crate::matrix::write_headers;
use crate::style::{self, FULL_GREEN, LIMITED_YELLOW, NO_RED};

pub const DELIVERABLES_SHEET: &str = "Deliverables Mapping";

const LAST_TITLE_COL: u16 = 16;
const HEADER_ROW: u32 = 3;
const COLUMN_WIDTHS: [u16; 18] = [20, 35, 25, 40, 10, 15, 50, 20, 15, 15, 10, 50, 20, 20, 40, 10, 15, 30];

fn status_fill(status: DeliverableStatus) -> u32 {
    match status {
        DeliverableStatus::Yes => FULL_GREEN,
        DeliverableStatus::Draft => LIMITED_YELLOW,
        DeliverableStatus::Missing | DeliverableStatus::NoPath => NO_RED,
    }
}

/// Write the enhanced checklist to a single-sheet workbook.
///
/// Headers come from the first row's columns; an empty checklist gets the
/// title and stats lines only.
pub fn build_deliverables_workbook(
    rows: &[EnhancedDeliverable],
    stats: DeliverableStats,
    today: NaiveDate,
    path: &Path,
) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet().set_name(DELIVERABLES_SHEET)?;

    ws.merge_range(
        0,
        0,
        0,
        LAST_TITLE_COL,
        "Henry Schein Deliverables Mapping - CORRECTED & ENHANCED",
        &style::title(),
    )?;
    ws.merge_range(
        1,
        0,
        1,
        LAST_TITLE_COL,
        &format!(
            "Total: {} | Exists: {} | Missing: {} | Draft: {} | Generated: {}",
            rows.len(),
            stats.exists,
            stats.missing,
            stats.draft,
            today.format("%Y-%m-%d")
        ),
        &style::subtitle(),
    )?;

    if let Some(first) = rows.first() {
        let columns = first.columns();
        let headers: Vec<&str> = columns.iter().map(|(name, _)| name.as_str()).collect();
        write_headers(ws, HEADER_ROW, &headers, &style::header_wrapped())?;

        let body = Format::new()
            .set_align(FormatAlign::Top)
            .set_text_wrap();
        for (i, deliverable) in rows.iter().enumerate() {
            let row = HEADER_ROW + 1 + i as u32;
            for (col, (name, value)) in deliverable.columns().into_iter().enumerate() {
                let col = col as u16;
                if name == STATUS_COLUMN {
                    let fill = body
                        .clone()
                        .set_background_color(style::fill(status_fill(deliverable.status)));
                    ws.write_string_with_format(row, col, value.to_string(), &fill)?;
                    continue;
                }
                match value {
                    CellValue::Count(n) => ws.write_number_with_format(row, col, n as f64, &body)?,
                    CellValue::Text(text) => ws.write_string_with_format(row, col, text, &body)?,
                };
            }
        }
    }

    for (col, width) in COLUMN_WIDTHS.into_iter().enumerate() {
        ws.set_column_width(col as u16, width)?;
    }
    workbook.save(path)?;
    info!(path = %path.display(), rows = rows.len(), "wrote deliverables workbook");
    Ok(())
}

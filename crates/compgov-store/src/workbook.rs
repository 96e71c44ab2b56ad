//! Master analysis workbook reader.
//!
//! Two sheets matter: the plan coverage matrix (policy items down, plans
//! across, YES/PARTIAL/NO cells) and the executive summary (an `Attribute`
//! header row naming plans, attribute rows below it).

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, DataType, Range, Reader, Xlsx, open_workbook};
use compgov_core::coverage::Coverage;
use compgov_core::plan::{MatrixPlan, PlanMetadata};
use tracing::{debug, info, warn};

use crate::StoreError;

pub const COVERAGE_MATRIX_SHEET: &str = "12) Plan Coverage Matrix";
pub const EXECUTIVE_SUMMARY_SHEET: &str = "1) Executive Summary";

const HEADER_ROW: u32 = 0;
const FIRST_PLAN_COL: u32 = 2;
const FIRST_POLICY_ROW: u32 = 1;
const LAST_POLICY_ROW: u32 = 15;
const SUMMARY_SCAN_ROWS: u32 = 30;
const TOTALS_LABEL: &str = "% Coverage by Plan";
const ATTRIBUTE_LABEL: &str = "Attribute";
const NON_PLAN_HEADERS: &[&str] = &["Policy Area", "Item"];

/// Text of a cell, trimmed; `None` when empty.
///
/// Integral floats render without a decimal point and dates as
/// `YYYY-MM-DD HH:MM:SS`.
pub fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        other => match other.as_datetime() {
            Some(dt) => dt.to_string(),
            None => other.to_string().trim().to_string(),
        },
    };
    (!text.is_empty()).then_some(text)
}

fn text_at(range: &Range<Data>, row: u32, col: u32) -> Option<String> {
    range.get_value((row, col)).and_then(cell_text)
}

fn last_col(range: &Range<Data>) -> Option<u32> {
    range.end().map(|(_, col)| col)
}

/// Policy items and per-plan coverage from the coverage matrix sheet.
///
/// Plans are the non-empty header cells from column C on. Rows 2 to 16 hold
/// one policy item each: column B when present, else column A. The totals
/// row and rows with an empty column A are skipped. A repeated item keeps
/// its first position. Blank or unrecognized cells read as NO.
pub fn coverage_matrix(range: &Range<Data>) -> (Vec<MatrixPlan>, Vec<String>) {
    let Some(end_col) = last_col(range) else {
        return (Vec::new(), Vec::new());
    };

    let mut plan_cols: Vec<(u32, usize)> = Vec::new();
    let mut plans: Vec<MatrixPlan> = Vec::new();
    for col in FIRST_PLAN_COL..=end_col {
        let Some(name) = text_at(range, HEADER_ROW, col) else {
            continue;
        };
        if NON_PLAN_HEADERS.contains(&name.as_str()) {
            continue;
        }
        let idx = match plans.iter().position(|p| p.plan_name == name) {
            Some(idx) => {
                warn!(plan = %name, col, "duplicate plan column, later values win");
                idx
            }
            None => {
                plans.push(MatrixPlan::new(name));
                plans.len() - 1
            }
        };
        plan_cols.push((col, idx));
    }

    let mut policy_areas: Vec<String> = Vec::new();
    for row in FIRST_POLICY_ROW..=LAST_POLICY_ROW {
        let Some(area) = text_at(range, row, 0) else {
            continue;
        };
        if area == TOTALS_LABEL {
            continue;
        }
        let policy = text_at(range, row, 1).unwrap_or(area);
        if policy_areas.contains(&policy) {
            warn!(policy = %policy, row, "duplicate policy item");
        } else {
            policy_areas.push(policy.clone());
        }

        for &(col, idx) in &plan_cols {
            let coverage = text_at(range, row, col)
                .map(|v| Coverage::from_matrix_cell(&v))
                .unwrap_or(Coverage::No);
            plans[idx].policy_coverage.insert(policy.clone(), coverage);
        }
    }

    debug!(plans = plans.len(), policies = policy_areas.len(), "read coverage matrix");
    (plans, policy_areas)
}

/// Plan attributes from the executive summary sheet, keyed by plan name.
///
/// The header row is the first row within the first 30 whose column A reads
/// `Attribute`; its non-empty cells from column B on name the plans. Each
/// plan reads its attributes from its own column.
pub fn executive_summary(range: &Range<Data>) -> BTreeMap<String, PlanMetadata> {
    let mut details = BTreeMap::new();
    let Some(end_col) = last_col(range) else {
        return details;
    };

    let Some(header) = (0..SUMMARY_SCAN_ROWS)
        .find(|&row| text_at(range, row, 0).as_deref() == Some(ATTRIBUTE_LABEL))
    else {
        warn!("no Attribute row in executive summary");
        return details;
    };

    let plan_cols: Vec<(u32, String)> = (1..=end_col)
        .filter_map(|col| text_at(range, header, col).map(|name| (col, name)))
        .collect();

    for (col, name) in plan_cols {
        let mut meta = PlanMetadata::default();
        for row in header + 1..SUMMARY_SCAN_ROWS {
            let (Some(label), Some(value)) = (text_at(range, row, 0), text_at(range, row, col))
            else {
                continue;
            };
            meta.set_attribute(&label, value);
        }
        details.insert(name, meta);
    }

    debug!(plans = details.len(), "read executive summary");
    details
}

/// The master analysis workbook, opened for reading.
pub struct MasterWorkbook {
    inner: Xlsx<BufReader<File>>,
}

impl MasterWorkbook {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::InputNotFound(path.to_path_buf()));
        }
        let inner: Xlsx<_> = open_workbook(path)?;
        info!(path = %path.display(), sheets = inner.sheet_names().len(), "opened workbook");
        Ok(Self { inner })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    /// Cell range of `name`, or `None` with a warning when the sheet is absent.
    pub fn sheet(&mut self, name: &str) -> Result<Option<Range<Data>>, StoreError> {
        if !self.sheet_names().iter().any(|s| s == name) {
            warn!(sheet = name, "sheet not found");
            return Ok(None);
        }
        Ok(Some(self.inner.worksheet_range(name)?))
    }

    /// Empty when the coverage matrix sheet is missing.
    pub fn coverage_matrix(&mut self) -> Result<(Vec<MatrixPlan>, Vec<String>), StoreError> {
        Ok(self
            .sheet(COVERAGE_MATRIX_SHEET)?
            .map(|range| coverage_matrix(&range))
            .unwrap_or_default())
    }

    /// Empty when the executive summary sheet is missing.
    pub fn executive_summary(&mut self) -> Result<BTreeMap<String, PlanMetadata>, StoreError> {
        Ok(self
            .sheet(EXECUTIVE_SUMMARY_SHEET)?
            .map(|range| executive_summary(&range))
            .unwrap_or_default())
    }
}

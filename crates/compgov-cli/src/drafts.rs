//! Policy document pipelines: DRAFT summaries and the Markdown library.

use std::fs;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use compgov_core::Config;
use compgov_core::document::to_markdown;
use compgov_core::draft::{
    DRAFT_POLICY_FILES, DraftSummaryMetadata, DraftSummaryReport, analyze_policy_text,
};
use compgov_core::library::{IndexEntry, LibraryIndex, POLICY_LIBRARY};
use compgov_report::{render_policy_markdown, word_count};
use compgov_store::docx::{read_blocks, read_text};
use compgov_store::write_json;
use tracing::{error, info, warn};

/// DRAFT documents → `draft-policies-summary.json`.
///
/// The DRAFT folder is required; a missing or unreadable document is
/// logged and skipped.
pub fn run_read_drafts(config: &Config) -> anyhow::Result<DraftSummaryReport> {
    let dir = config.drafts_dir();
    eprintln!("  Source: {}", dir.display());
    if !dir.is_dir() {
        bail!("DRAFT policy directory not found: {}", dir.display());
    }

    let mut policies = Vec::with_capacity(DRAFT_POLICY_FILES.len());
    for file_name in DRAFT_POLICY_FILES {
        let path = dir.join(file_name);
        if !path.exists() {
            warn!(file = file_name, "DRAFT policy not found");
            continue;
        }
        let text = match read_text(&path) {
            Ok(text) => text,
            Err(e) => {
                error!(file = file_name, error = %e, "skipping unreadable DRAFT policy");
                continue;
            }
        };
        let summary = analyze_policy_text(file_name, &text);
        eprintln!(
            "  Read {file_name}: {} words, applies to {}",
            summary.word_count,
            summary.applicable_plans.join(", ")
        );
        policies.push(summary);
    }

    let report = DraftSummaryReport {
        metadata: DraftSummaryMetadata {
            source: dir.display().to_string(),
            total_policies: policies.len(),
        },
        policies,
    };
    write_json(&config.draft_summary_json(), &report).context("writing DRAFT summaries")?;
    Ok(report)
}

/// Library documents → one `SCP-0NN.md` per policy plus `index.json`.
pub fn run_export_policies(config: &Config, today: NaiveDate) -> anyhow::Result<LibraryIndex> {
    let policies_dir = config.policies_dir();
    eprintln!("  Source: {}", policies_dir.display());
    if !policies_dir.is_dir() {
        bail!("policies directory not found: {}", policies_dir.display());
    }
    fs::create_dir_all(&config.library_dir)
        .with_context(|| format!("creating {}", config.library_dir.display()))?;

    let mut entries = Vec::with_capacity(POLICY_LIBRARY.len());
    for entry in POLICY_LIBRARY {
        let source = config.library_source(entry.file_name, entry.legal_review_required());
        if !source.exists() {
            warn!(code = entry.code, file = entry.file_name, "library source not found");
            continue;
        }
        let content = match read_blocks(&source) {
            Ok(blocks) => to_markdown(&blocks),
            Err(e) => {
                error!(code = entry.code, error = %e, "skipping unreadable library source");
                continue;
            }
        };
        if content.trim().is_empty() {
            error!(code = entry.code, file = entry.file_name, "library source has no text");
            continue;
        }

        let target = config.library_dir.join(entry.markdown_file_name());
        fs::write(&target, render_policy_markdown(entry, &content))
            .with_context(|| format!("writing {}", target.display()))?;
        entries.push(IndexEntry::new(
            entry,
            target.display().to_string(),
            word_count(&content),
        ));
        eprintln!("  Exported {} {}", entry.code, entry.name);
    }

    let index = LibraryIndex::new(entries, today.format("%Y-%m-%d").to_string());
    write_json(&config.library_index_json(), &index).context("writing library index")?;
    info!(
        total = index.metadata.total_policies,
        drafts = index.metadata.draft_policies,
        "policy library exported"
    );
    Ok(index)
}

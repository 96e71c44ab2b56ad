//! Word document reader.
//!
//! A `.docx` file is walked body-first into [`DocBlock`]s: paragraphs keep
//! their text, paragraphs styled `HeadingN` become headings, and tables
//! become rows of cell text. Runs inside a paragraph are concatenated.

use std::fs;
use std::path::Path;

use compgov_core::document::{DocBlock, plain_text};
use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent, TableChild,
    TableRowChild, read_docx,
};
use tracing::debug;

use crate::StoreError;

const HEADING_STYLE_PREFIX: &str = "heading";

/// Read a document's body as blocks.
pub fn read_blocks(path: &Path) -> Result<Vec<DocBlock>, StoreError> {
    if !path.exists() {
        return Err(StoreError::InputNotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    let docx = read_docx(&bytes).map_err(|e| StoreError::Docx {
        path: path.to_path_buf(),
        message: format!("{e:?}"),
    })?;

    let blocks: Vec<DocBlock> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_block(p)),
            DocumentChild::Table(t) => Some(DocBlock::Table(table_rows(t))),
            _ => None,
        })
        .collect();
    debug!(path = %path.display(), blocks = blocks.len(), "read docx");
    Ok(blocks)
}

/// Paragraph text of a document, one non-empty paragraph per line.
pub fn read_text(path: &Path) -> Result<String, StoreError> {
    Ok(plain_text(&read_blocks(path)?))
}

fn paragraph_block(paragraph: &Paragraph) -> DocBlock {
    let text = paragraph_text(paragraph);
    match paragraph
        .property
        .style
        .as_ref()
        .and_then(|style| heading_level(&style.val))
    {
        Some(level) => DocBlock::Heading { level, text },
        None => DocBlock::Paragraph(text),
    }
}

/// `Heading2` → 2. Headings without a trailing digit are level 1.
fn heading_level(style_id: &str) -> Option<u8> {
    let lower = style_id.to_ascii_lowercase();
    if !lower.starts_with(HEADING_STYLE_PREFIX) {
        return None;
    }
    let level = lower
        .chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .filter(|&d| d > 0)
        .unwrap_or(1);
    Some(level as u8)
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children_text(&paragraph.children, &mut text);
    text
}

fn push_children_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for rc in &run.children {
                    match rc {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_children_text(&link.children, out),
            _ => {}
        }
    }
}

fn table_rows(table: &Table) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for child in &table.rows {
        #[allow(irrefutable_let_patterns)]
        let TableChild::TableRow(row) = child else {
            continue;
        };
        let mut cells = Vec::new();
        for cell in &row.cells {
            #[allow(irrefutable_let_patterns)]
            let TableRowChild::TableCell(cell) = cell else {
                continue;
            };
            let paragraphs: Vec<String> = cell
                .children
                .iter()
                .filter_map(|content| match content {
                    TableCellContent::Paragraph(p) => Some(paragraph_text(p)),
                    _ => None,
                })
                .collect();
            cells.push(paragraphs.join("\n"));
        }
        rows.push(cells);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Run, TableCell, TableRow};
    use std::fs::File;
    use tempfile::TempDir;

    fn para(text: &str) -> Paragraph {
        Paragraph::new().add_run(Run::new().add_text(text))
    }

    fn write_sample(path: &Path) {
        let table = Table::new(vec![
            TableRow::new(vec![
                TableCell::new().add_paragraph(para("Role")),
                TableCell::new().add_paragraph(para("Approver")),
            ]),
            TableRow::new(vec![
                TableCell::new().add_paragraph(para("AE")),
                TableCell::new().add_paragraph(para("VP Sales")),
            ]),
        ]);
        let file = File::create(path).unwrap();
        Docx::new()
            .add_paragraph(para("Quota Management Policy").style("Heading1"))
            .add_paragraph(para("1. Purpose").style("Heading2"))
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Quotas are set "))
                    .add_run(Run::new().add_text("annually.")),
            )
            .add_table(table)
            .build()
            .pack(file)
            .unwrap();
    }

    #[test]
    fn heading_levels_from_style_ids() {
        assert_eq!(heading_level("Heading1"), Some(1));
        assert_eq!(heading_level("heading3"), Some(3));
        assert_eq!(heading_level("Heading"), Some(1));
        assert_eq!(heading_level("Normal"), None);
        assert_eq!(heading_level("Title"), None);
    }

    #[test]
    fn reads_headings_paragraphs_and_tables() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("QUOTA_MANAGEMENT_POLICY_DRAFT.docx");
        write_sample(&path);

        let blocks: Vec<DocBlock> = read_blocks(&path)
            .unwrap()
            .into_iter()
            .filter(|b| !matches!(b, DocBlock::Paragraph(t) if t.is_empty()))
            .collect();
        assert_eq!(
            blocks[0],
            DocBlock::Heading {
                level: 1,
                text: "Quota Management Policy".into()
            }
        );
        assert_eq!(
            blocks[1],
            DocBlock::Heading {
                level: 2,
                text: "1. Purpose".into()
            }
        );
        assert_eq!(blocks[2], DocBlock::Paragraph("Quotas are set annually.".into()));
        assert_eq!(
            blocks[3],
            DocBlock::Table(vec![
                vec!["Role".to_string(), "Approver".to_string()],
                vec!["AE".to_string(), "VP Sales".to_string()],
            ])
        );
    }

    #[test]
    fn plain_text_excludes_tables() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("policy.docx");
        write_sample(&path);
        assert_eq!(
            read_text(&path).unwrap(),
            "Quota Management Policy\n1. Purpose\nQuotas are set annually."
        );
    }

    #[test]
    fn corrupt_file_is_a_docx_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.docx");
        fs::write(&path, b"not a zip archive").unwrap();
        let err = read_blocks(&path).unwrap_err();
        assert!(matches!(err, StoreError::Docx { .. }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        assert!(read_blocks(&tmp.path().join("absent.docx")).unwrap_err().is_not_found());
    }
}

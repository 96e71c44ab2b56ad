//! Neutral block representation of a word-processor document.

/// One top-level element of a document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocBlock {
    Heading { level: u8, text: String },
    Paragraph(String),
    /// Rows of cell text.
    Table(Vec<Vec<String>>),
}

/// Non-empty heading and paragraph text, one per line. Tables are skipped.
pub fn plain_text(blocks: &[DocBlock]) -> String {
    blocks
        .iter()
        .filter_map(|block| match block {
            DocBlock::Heading { text, .. } | DocBlock::Paragraph(text) => {
                (!text.trim().is_empty()).then_some(text.as_str())
            }
            DocBlock::Table(_) => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render blocks as Markdown.
pub fn to_markdown(blocks: &[DocBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            DocBlock::Heading { level, text } => {
                let text = text.trim();
                if !text.is_empty() {
                    let hashes = "#".repeat(usize::from((*level).max(1)));
                    out.push_str(&format!("{hashes} {text}\n"));
                }
            }
            DocBlock::Paragraph(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    out.push_str(text);
                    out.push('\n');
                }
            }
            DocBlock::Table(rows) => {
                for row in rows {
                    let cells: Vec<&str> = row.iter().map(|c| c.trim()).collect();
                    out.push_str(&format!("| {} |\n", cells.join(" | ")));
                }
                out.push('\n');
            }
        }
    }
    out
}

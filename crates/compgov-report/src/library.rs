//! Markdown rendering of policy library documents.

use compgov_core::library::LibraryEntry;

/// Front-matter block followed by the document's text.
pub fn render_policy_markdown(entry: &LibraryEntry, content: &str) -> String {
    let legal = if entry.legal_review_required() { "Yes" } else { "No" };
    format!(
        "# {name}\n\n\
         **Policy Code:** {code}  \n\
         **Category:** {category}  \n\
         **Framework Area:** {area}  \n\
         **Status:** {status}  \n\
         **Legal Review Required:** {legal}  \n\n\
         ---\n\n\
         {content}",
        name = entry.name,
        code = entry.code,
        category = entry.category,
        area = entry.framework_area,
        status = entry.status.as_str(),
    )
}

/// Whitespace-separated words.
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use compgov_core::library::POLICY_LIBRARY;

    #[test]
    fn draft_front_matter() {
        let md = render_policy_markdown(&POLICY_LIBRARY[0], "Purpose\nRecover unearned pay.");
        assert!(md.starts_with("# Clawback and Recovery Policy\n\n**Policy Code:** SCP-001  \n"));
        assert!(md.contains("**Status:** DRAFT  \n"));
        assert!(md.contains("**Legal Review Required:** Yes  \n\n---\n\nPurpose\nRecover unearned pay."));
    }

    #[test]
    fn template_needs_no_legal_review() {
        let md = render_policy_markdown(&POLICY_LIBRARY[6], "Text");
        assert!(md.contains("**Category:** Commission Rules  \n"));
        assert!(md.contains("**Legal Review Required:** No  \n"));
        assert!(md.ends_with("---\n\nText"));
    }

    #[test]
    fn counts_words() {
        assert_eq!(word_count("  Quotas are\nset annually. "), 4);
        assert_eq!(word_count(""), 0);
    }
}

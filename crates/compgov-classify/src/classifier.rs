//! Rule-based coverage classification of clause text.
//!
//! A clause is scored from three indicator lists: absence phrases force NO,
//! strong indicators (thresholds, workflows, SLAs) push towards FULL, and
//! weak indicators (discretionary language) hold it at LIMITED. Text length
//! decides the rest.

use std::sync::LazyLock;

use compgov_core::Coverage;
use regex::{Regex, RegexSet, RegexSetBuilder};

/// Phrases stating the plan is silent on the area.
pub const ABSENCE_PHRASES: &[&str] = &[
    "gap noted",
    "no clause",
    "not specified",
    "not present",
    "does not specify",
    "silent on",
    "missing",
];

/// Patterns marking specific, enforceable language. Matched case-insensitively.
pub const STRONG_INDICATORS: &[&str] = &[
    "specific threshold",
    "approval workflow",
    "defined process",
    "sla:",
    r"within \d+ days",
    r"\$[0-9,]+ threshold",
    "crb approval required",
    "formal exception request",
];

/// Discretionary phrasing that keeps coverage LIMITED.
pub const WEAK_INDICATORS: &[&str] = &[
    "may",
    "at company discretion",
    "reasonable",
    "case by case",
    "manager approval",
    "subject to",
];

const DETAILED_CHARS: usize = 100;
const VAGUE_CHARS: usize = 30;
const SUBSTANTIVE_CHARS: usize = 50;

/// Indicator counts for one piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    pub absent: bool,
    pub strong: usize,
    pub weak: usize,
    pub has_digit: bool,
    pub mentions_process: bool,
    pub chars: usize,
}

/// Coverage classifier with its indicator patterns compiled once.
pub struct CoverageClassifier {
    strong: RegexSet,
    digit: Regex,
}

impl CoverageClassifier {
    pub fn new() -> Result<Self, regex::Error> {
        let strong = RegexSetBuilder::new(STRONG_INDICATORS)
            .case_insensitive(true)
            .build()?;
        let digit = Regex::new(r"\d")?;
        Ok(Self { strong, digit })
    }

    /// Count the indicators present in `details`.
    pub fn signals(&self, details: &str) -> Signals {
        let lower = details.to_lowercase();
        Signals {
            absent: ABSENCE_PHRASES.iter().any(|p| lower.contains(p)),
            strong: self.strong.matches(details).iter().count(),
            weak: WEAK_INDICATORS.iter().filter(|w| lower.contains(*w)).count(),
            has_digit: self.digit.is_match(details),
            mentions_process: lower.contains("process"),
            chars: details.chars().count(),
        }
    }

    /// Rate how well `details` covers its policy area.
    ///
    /// Rules, first match wins:
    /// 1. any absence phrase → NO
    /// 2. over 100 chars, a digit or "process", and a strong indicator or
    ///    no weak one → FULL
    /// 3. over 30 chars with a weak indicator → LIMITED
    /// 4. over 50 chars and not exactly "gap noted." → LIMITED
    /// 5. otherwise NO
    pub fn assess(&self, details: &str) -> Coverage {
        let s = self.signals(details);
        if s.absent {
            return Coverage::No;
        }
        if s.chars > DETAILED_CHARS
            && (s.has_digit || s.mentions_process)
            && (s.strong >= 1 || s.weak == 0)
        {
            return Coverage::Full;
        }
        if s.chars > VAGUE_CHARS && s.weak > 0 {
            return Coverage::Limited;
        }
        if s.chars > SUBSTANTIVE_CHARS && details.to_lowercase() != "gap noted." {
            return Coverage::Limited;
        }
        Coverage::No
    }
}

static CLASSIFIER: LazyLock<CoverageClassifier> =
    LazyLock::new(|| CoverageClassifier::new().expect("indicator patterns are valid regexes"));

/// [`CoverageClassifier::assess`] on a shared process-wide classifier.
pub fn assess_coverage(details: &str) -> Coverage {
    CLASSIFIER.assess(details)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> CoverageClassifier {
        CoverageClassifier::new().unwrap()
    }

    fn pad_to(base: &str, chars: usize) -> String {
        let mut s = base.to_string();
        while s.chars().count() < chars {
            s.push_str(" and the plan administrator records it");
        }
        s
    }

    #[test]
    fn discretionary_sentence_is_limited() {
        assert_eq!(
            classifier().assess("Clawback may occur at company discretion."),
            Coverage::Limited
        );
    }

    #[test]
    fn gap_noted_is_no() {
        assert_eq!(classifier().assess("Gap noted."), Coverage::No);
    }

    #[test]
    fn detailed_threshold_workflow_is_full() {
        let text = pad_to(
            "Deals above the $50,000 threshold follow the approval workflow set by the CRB",
            150,
        );
        let c = classifier();
        let s = c.signals(&text);
        assert!(s.strong >= 2);
        assert_eq!(c.assess(&text), Coverage::Full);
    }

    #[test]
    fn detailed_with_weak_language_and_strong_indicator_is_full() {
        let text = pad_to(
            "Payments may be adjusted; disputes are resolved within 30 days of submission",
            120,
        );
        assert_eq!(classifier().assess(&text), Coverage::Full);
    }

    #[test]
    fn detailed_with_weak_language_only_is_limited() {
        let text = pad_to("Quota relief may be granted for 2 quarters", 120);
        assert_eq!(classifier().assess(&text), Coverage::Limited);
    }

    #[test]
    fn short_text_is_never_full() {
        let c = classifier();
        for text in ["SLA: 5 days", "$1,000 threshold", "within 10 days", "Defined process 1"] {
            assert!(text.chars().count() <= 30);
            assert_ne!(c.assess(text), Coverage::Full, "{text}");
        }
    }

    #[test]
    fn absence_phrase_overrides_everything() {
        let text = pad_to(
            "Approval workflow exists but the $10,000 threshold is not specified",
            200,
        );
        assert_eq!(classifier().assess(&text), Coverage::No);
        assert_eq!(classifier().assess("MISSING"), Coverage::No);
    }

    #[test]
    fn strong_indicators_ignore_case() {
        let c = classifier();
        assert_eq!(c.signals("SLA: 48 hours").strong, 1);
        assert_eq!(c.signals("CRB approval required").strong, 1);
        assert_eq!(c.signals("Formal Exception Request").strong, 1);
    }

    #[test]
    fn substantive_text_without_indicators_is_limited() {
        let text = "Commissions are calculated on net invoiced revenue for each territory.";
        assert!(text.chars().count() > 50);
        assert_eq!(classifier().assess(text), Coverage::Limited);
    }

    #[test]
    fn short_plain_text_is_no() {
        assert_eq!(classifier().assess("Quarterly."), Coverage::No);
        assert_eq!(classifier().assess(""), Coverage::No);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 26 chars, 52+ bytes
        let text = "éééééééééééééééééééééééééé";
        assert!(text.len() > 50);
        assert_eq!(classifier().assess(text), Coverage::No);
    }

    #[test]
    fn shared_classifier_matches_owned() {
        let text = "Clawback may occur at company discretion.";
        assert_eq!(assess_coverage(text), classifier().assess(text));
    }
}

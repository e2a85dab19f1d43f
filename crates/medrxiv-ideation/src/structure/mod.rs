//! Abstract structuring.
//!
//! Turns a flat abstract into Markdown lines grouped under bold section
//! headers. Two stages: [`segment`] splits sentences, [`classify`] decides
//! how each sentence renders. The scan in [`structure`] walks the sentence
//! list by index so a "Results" label can consume every following sentence
//! up to the next label and render them through [`bullets`].
//!
//! ```
//! use medrxiv_ideation::structure::structure;
//!
//! let doc = structure("Background: X happened. Results: A occurred. B occurred.");
//! assert_eq!(doc.sections(), ["Background", "Results"]);
//! assert!(doc.to_string().contains("- 🔹 B occurred."));
//! ```

pub mod bullets;
pub mod classify;
pub mod segment;

use std::fmt;

pub use bullets::{MARKERS, bullet_lines, bulletize};
pub use classify::{SECTION_LABELS, Sentence, classify, is_section_label};
pub use segment::{split_result_sentences, split_sentences};

/// Rendered abstract body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredDocument {
    lines: Vec<String>,
    sections: Vec<String>,
}

impl StructuredDocument {
    /// Output lines in order. Blank strings are paragraph breaks.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Section labels found, as written in the abstract.
    #[must_use]
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// True when no lines were emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn push_heading(&mut self, label: &str) {
        self.push("");
        self.push(format!("**{label}:**"));
        self.push("");
        self.sections.push(label.to_string());
    }

    fn push_body(&mut self, rest: &str) {
        if !rest.is_empty() {
            self.push(rest);
        }
    }
}

impl fmt::Display for StructuredDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Structure an abstract.
///
/// Surrounding whitespace is trimmed first, so an indented first label is
/// still a heading.
#[must_use]
pub fn structure(abstract_text: &str) -> StructuredDocument {
    let sentences = split_sentences(abstract_text.trim());
    let mut doc = StructuredDocument::default();
    let mut i = 0;

    while i < sentences.len() {
        let sentence = classify(sentences[i]);
        i += 1;

        match sentence {
            Sentence::Label { label, rest } if sentence.is_results() => {
                doc.push_heading(label);
                let mut block = Vec::new();
                if !rest.is_empty() {
                    block.push(rest);
                }
                while i < sentences.len() && !is_section_label(sentences[i]) {
                    block.push(sentences[i]);
                    i += 1;
                }
                doc.lines.extend(bullet_lines(&block.join(" ")));
            }
            Sentence::Label { label, rest } => {
                doc.push_heading(label);
                doc.push_body(rest);
            }
            Sentence::ColonHeading { heading: lead, rest } | Sentence::CapsLeadIn { lead, rest } => {
                doc.push(format!("**{lead}**"));
                doc.push_body(rest);
            }
            Sentence::Plain(text) => doc.push(text),
        }
    }

    tracing::trace!(sections = ?doc.sections, lines = doc.lines.len(), "Structured abstract");
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        structure(text).lines().to_vec()
    }

    #[test]
    fn test_labelled_abstract() {
        let doc = structure(
            "Background: X happened. Methods: Y was done. Results: A occurred. B occurred. \
             Conclusions: Z follows.",
        );
        assert_eq!(
            doc.lines(),
            [
                "",
                "**Background:**",
                "",
                "X happened.",
                "",
                "**Methods:**",
                "",
                "Y was done.",
                "",
                "**Results:**",
                "",
                "- 📌 A occurred.",
                "- 🔹 B occurred.",
                "",
                "**Conclusions:**",
                "",
                "Z follows.",
            ]
        );
        assert_eq!(doc.sections(), ["Background", "Methods", "Results", "Conclusions"]);
    }

    #[test]
    fn test_results_runs_to_end_without_next_label() {
        assert_eq!(
            lines("Objective: find X. Results: Y rose. Z fell."),
            ["", "**Objective:**", "", "find X.", "", "**Results:**", "", "- 📌 Y rose.", "- 🔹 Z fell."]
        );
    }

    #[test]
    fn test_results_label_alone_collects_following_sentences() {
        assert_eq!(
            lines("RESULTS Deaths fell. Costs rose. Conclusion: Good."),
            [
                "",
                "**RESULTS:**",
                "",
                "- 📌 Deaths fell.",
                "- 🔹 Costs rose.",
                "",
                "**Conclusion:**",
                "",
                "Good.",
            ]
        );
    }

    #[test]
    fn test_empty_results_block() {
        assert_eq!(lines("Results: Methods: none."), ["", "**Results:**", "", "- 📌 Methods: none."]);
        assert_eq!(
            lines("Methods: x. Results:"),
            ["", "**Methods:**", "", "x.", "", "**Results:**", ""]
        );
    }

    #[test]
    fn test_label_without_rest_has_no_body_line() {
        assert_eq!(lines("Methods: Plain sentence."), ["", "**Methods:**", "", "Plain sentence."]);
        assert_eq!(lines("Conclusions."), ["", "**Conclusions:**", "", "."]);
    }

    #[test]
    fn test_colon_and_caps_headings() {
        assert_eq!(
            lines("Design: Cohort study. IMPORTANCE Sleep matters. It is common."),
            ["**Design:**", "Cohort study.", "**IMPORTANCE**", "Sleep matters.", "It is common."]
        );
    }

    #[test]
    fn test_unstructured_abstract_passes_through() {
        let doc = structure("We studied sleep. It helps.");
        assert_eq!(doc.lines(), ["We studied sleep.", "It helps."]);
        assert!(doc.sections().is_empty());
        assert_eq!(doc.to_string(), "We studied sleep.\nIt helps.");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(lines("  Plain text.  \n"), ["Plain text."]);
        assert_eq!(lines(""), [""]);
    }

    #[test]
    fn test_leading_whitespace_does_not_hide_first_label() {
        let doc = structure("\n  Background: Sleep matters. Results: BP fell.");
        assert_eq!(
            doc.lines(),
            ["", "**Background:**", "", "Sleep matters.", "", "**Results:**", "", "- 📌 BP fell."]
        );
        assert_eq!(doc.sections(), ["Background", "Results"]);
    }
}

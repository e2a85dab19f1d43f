//! Sentence classification for structured abstracts.

use std::sync::LazyLock;

use regex::Regex;

/// Section labels recognised at the start of a sentence, case-insensitively.
///
/// Longer labels precede their prefixes ("Objectives" before "Objective",
/// "Methods and Results" before "Methods") so alternation picks the longest.
pub const SECTION_LABELS: &[&str] = &[
    "Background",
    "Outcomes of interest",
    "Objectives",
    "Objective",
    "Methods and Results",
    "Methods",
    "Results",
    "Conclusions",
    "Conclusion",
    "Findings",
];

/// `Label[:] rest` where the label ends on a word boundary.
///
/// A sentence must begin with the whole label, not just share its prefix:
/// "Objectively measured sleep" is plain text, not an "Objective" heading.
static LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let labels = SECTION_LABELS.iter().map(|l| regex::escape(l)).collect::<Vec<_>>().join("|");
    Regex::new(&format!(r"(?is)^({labels})\b:?\s*(.*)")).expect("valid section label regex")
});

/// `Leading phrase: rest`, the phrase being everything up to the first colon on the first line.
static COLON_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([^\n]*?:)\s*(.*)").expect("valid colon heading regex"));

/// `ABBR rest` with two or more ASCII capitals.
static CAPS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([A-Z]{2,})\s+(.*)").expect("valid caps lead-in regex"));

/// How a sentence is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentence<'a> {
    /// Starts with a known section label.
    Label {
        /// Label as written in the abstract.
        label: &'a str,
        /// Trimmed text after the label.
        rest: &'a str,
    },
    /// Starts with a phrase ending in a colon.
    ColonHeading {
        /// Phrase including the colon.
        heading: &'a str,
        /// Trimmed text after the colon.
        rest: &'a str,
    },
    /// Starts with an all-caps run.
    CapsLeadIn {
        /// The capitals.
        lead: &'a str,
        /// Trimmed text after them.
        rest: &'a str,
    },
    /// Anything else.
    Plain(&'a str),
}

impl Sentence<'_> {
    /// True for the "Results" label, which switches to bullet rendering.
    #[must_use]
    pub fn is_results(&self) -> bool {
        matches!(self, Self::Label { label, .. } if label.eq_ignore_ascii_case("results"))
    }
}

/// Classify one sentence. Checks run in priority order: label, colon heading,
/// caps lead-in, plain.
#[must_use]
pub fn classify(sentence: &str) -> Sentence<'_> {
    if let Some(caps) = LABEL_REGEX.captures(sentence) {
        return Sentence::Label { label: group(&caps, 1), rest: group(&caps, 2).trim() };
    }
    if let Some(caps) = COLON_REGEX.captures(sentence) {
        return Sentence::ColonHeading { heading: group(&caps, 1), rest: group(&caps, 2).trim() };
    }
    if let Some(caps) = CAPS_REGEX.captures(sentence) {
        return Sentence::CapsLeadIn { lead: group(&caps, 1), rest: group(&caps, 2).trim() };
    }
    Sentence::Plain(sentence)
}

/// Whether `sentence` opens a new section.
#[must_use]
pub fn is_section_label(sentence: &str) -> bool {
    LABEL_REGEX.is_match(sentence)
}

fn group<'a>(caps: &regex::Captures<'a>, index: usize) -> &'a str {
    caps.get(index).map_or("", |m| m.as_str())
}

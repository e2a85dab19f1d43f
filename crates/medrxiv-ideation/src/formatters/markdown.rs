//! Markdown idea summary.

use std::fmt::Write;

use crate::models::PaperRecord;
use crate::structure::structure;

/// Render the summary document attached to a hypothesis.
///
/// Sections: title, structured abstract, authors, DOI link, posting date and a
/// link to the versioned full text.
#[must_use]
pub fn render_summary(paper: &PaperRecord) -> String {
    let abstract_body = structure(&paper.abstract_text);
    let doi = paper.doi.trim();

    let mut output = String::new();
    let _ = writeln!(output, "# 🧪 {}", paper.title.trim());
    output.push_str("\n---\n\n");
    let _ = writeln!(output, "## 📄 Abstract\n\n{abstract_body}");
    output.push_str("\n---\n\n");

    output.push_str("## 👩‍🔬 Authors\n");
    let authors = paper.author_names.iter().map(|name| format!("- {name}")).collect::<Vec<_>>();
    output.push_str(&authors.join("\n"));
    output.push_str("\n\n");

    let _ = writeln!(output, "## 🧷 DOI\n[{doi}](https://doi.org/{doi})\n");
    let _ = writeln!(output, "## 🗓️ Published Date\n**{}**\n", paper.publication_date);
    let _ = writeln!(output, "## 🔗 [View Full Article]({})", paper.article_url());

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper() -> PaperRecord {
        PaperRecord {
            title: "Sleep and Blood Pressure".into(),
            abstract_text: "Background: Sleep matters. Results: BP fell. HR fell.".into(),
            doi: "10.1101/2024.01.01.24300001".into(),
            publication_date: "2024-01-03".into(),
            category: "cardiovascular medicine".into(),
            author_names: vec!["Ada Lovelace".into(), "Alan Turing".into()],
            version: 2,
            max_author_influence: None,
        }
    }

    #[test]
    fn test_summary_layout() {
        let summary = render_summary(&paper());
        let expected = "# 🧪 Sleep and Blood Pressure\n\n---\n\n## 📄 Abstract\n\n\n\
            **Background:**\n\nSleep matters.\n\n**Results:**\n\n- 📌 BP fell.\n- 🔹 HR fell.\n\n---\n\n\
            ## 👩‍🔬 Authors\n- Ada Lovelace\n- Alan Turing\n\n\
            ## 🧷 DOI\n[10.1101/2024.01.01.24300001](https://doi.org/10.1101/2024.01.01.24300001)\n\n\
            ## 🗓️ Published Date\n**2024-01-03**\n\n\
            ## 🔗 [View Full Article](https://www.medrxiv.org/content/10.1101/2024.01.01.24300001v2)\n";
        assert_eq!(summary, expected);
    }

    #[test]
    fn test_summary_without_authors() {
        let mut paper = paper();
        paper.author_names.clear();
        assert!(render_summary(&paper).contains("## 👩‍🔬 Authors\n\n\n## 🧷 DOI"));
    }
}

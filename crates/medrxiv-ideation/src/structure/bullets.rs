//! Bullet rendering for the Results section.

use super::segment::split_result_sentences;

/// Bullet prefixes, assigned cyclically by sentence position.
pub const MARKERS: [&str; 6] = ["- 📌", "- 🔹", "- ➤", "- ✅", "- 📝", "- 📉"];

/// One bullet line per non-blank sentence of `text`.
///
/// The marker is chosen by the sentence's position before blanks are dropped,
/// so a blank piece leaves a gap in the marker cycle.
#[must_use]
pub fn bullet_lines(text: &str) -> Vec<String> {
    split_result_sentences(text)
        .into_iter()
        .enumerate()
        .filter_map(|(i, sentence)| {
            let sentence = sentence.trim();
            (!sentence.is_empty()).then(|| format!("{} {sentence}", MARKERS[i % MARKERS.len()]))
        })
        .collect()
}

/// [`bullet_lines`] joined with newlines.
#[must_use]
pub fn bulletize(text: &str) -> String {
    bullet_lines(text).join("\n")
}

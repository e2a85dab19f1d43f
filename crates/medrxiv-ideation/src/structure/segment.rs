//! Sentence segmentation.
//!
//! Heuristic, not grammar-aware: "e.g. this" splits after "e.g.".

/// Sentence-final punctuation.
const fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '?' | '!')
}

/// Split an abstract at sentence-final punctuation followed by whitespace.
///
/// The punctuation stays with its sentence and the whitespace run is dropped.
/// Line breaks without preceding punctuation do not split. Text ending in
/// punctuation plus whitespace yields a trailing empty piece.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_terminal(c) {
            continue;
        }
        let end = i + c.len_utf8();
        let mut resume = end;
        while let Some(&(j, w)) = chars.peek() {
            if !w.is_whitespace() {
                break;
            }
            resume = j + w.len_utf8();
            chars.next();
        }
        if resume > end {
            sentences.push(&text[start..end]);
            start = resume;
        }
    }

    sentences.push(&text[start..]);
    sentences
}

/// Split a results block into sentences.
///
/// Like [`split_sentences`], plus a run of line breaks always splits, and text
/// ending in punctuation yields a trailing empty piece. Pieces keep their
/// position so callers can index them before dropping blanks.
#[must_use]
pub fn split_result_sentences(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some(&(i, c)) = chars.peek() {
        let after_terminal = prev.is_some_and(is_terminal);
        let splits_here = (after_terminal && c.is_whitespace()) || c == '\n';
        if !splits_here {
            prev = Some(c);
            chars.next();
            continue;
        }

        pieces.push(&text[start..i]);
        let mut last = c;
        while let Some(&(_, w)) = chars.peek() {
            let consumed = if after_terminal { w.is_whitespace() } else { w == '\n' };
            if !consumed {
                break;
            }
            last = w;
            chars.next();
        }
        start = chars.peek().map_or(text.len(), |&(j, _)| j);
        prev = Some(last);
    }

    pieces.push(&text[start..]);
    if prev.is_some_and(is_terminal) {
        pieces.push("");
    }
    pieces
}

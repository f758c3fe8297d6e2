use std::borrow::Cow;

/// Collapses every whitespace run (spaces, tabs, newlines) into a single
/// space and trims the ends. Upstream extractors produce ragged text;
/// scoring and indexing want one flat line.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates to at most `max_chars` characters, appending "..." when a cut
/// happened. Counts chars, not bytes, so multi-byte input never splits.
pub fn truncate_chars(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut cut = text[..byte_idx].to_string();
            cut.push_str("...");
            Cow::Owned(cut)
        }
        None => Cow::Borrowed(text),
    }
}

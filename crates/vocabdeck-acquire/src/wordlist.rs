use crate::error::WordListError;
use crate::normalize;
use regex::Regex;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

/// A letter followed by letters and combining marks; digits, apostrophes
/// and hyphens split words. Marks are needed for scripts like Devanagari,
/// where vowel signs and viramas sit inside a word.
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{L}[\p{L}\p{M}]*").expect("valid word regex"));

/// Read a text file and return its unique words, lower-cased and sorted.
pub fn read_words(path: impl AsRef<Path>) -> Result<Vec<String>, WordListError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => WordListError::NotFound {
            path: path.to_path_buf(),
        },
        _ => WordListError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let words = extract_words(&text);
    tracing::debug!(path = %path.display(), bytes = text.len(), words = words.len(), "Read word list");
    Ok(words)
}

/// Extract the sorted, deduplicated, lower-cased letter runs from `text`.
pub fn extract_words(text: &str) -> Vec<String> {
    // Compose first so combining accents don't split a word.
    let text = normalize::nfc(text);
    let unique: BTreeSet<String> = WORD_RE
        .find_iter(&text)
        .map(|m| normalize::normalize_word(m.as_str()))
        .collect();
    unique.into_iter().collect()
}

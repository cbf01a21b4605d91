use serde::{Deserialize, Serialize};

/// Extension used for every pronunciation attachment.
pub const AUDIO_EXTENSION: &str = "mp3";

/// A binary attachment embedded in the deck under `filename`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttachment {
    pub filename: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Sanitized stem for a word's attachment: lower-cased, with every
/// non-alphanumeric character replaced by `_`.
pub fn media_stem(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// Default attachment filename for a word (e.g., "rock-n-roll" -> "rock_n_roll.mp3").
///
/// Deterministic, but not injective: callers that need uniqueness across
/// several words must disambiguate collisions themselves.
pub fn media_filename(word: &str) -> String {
    format!("{}.{AUDIO_EXTENSION}", media_stem(word))
}

/// Field value that makes the card player embed the attachment.
pub fn sound_tag(filename: &str) -> String {
    format!("[sound:{filename}]")
}

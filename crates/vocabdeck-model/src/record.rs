use serde::{Deserialize, Serialize};

/// Fields extracted from one dictionary lookup, before validation.
///
/// Every field is whatever the extractor found; empty strings mean the
/// element was absent. Turning this into a [`WordRecord`] enforces the
/// non-empty definition rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFields {
    pub definition: String,
    pub pronunciation: String,
    pub example: String,
    /// Absolute URL of the pronunciation audio, if the page carried one.
    pub audio_url: Option<String>,
}

/// One successfully defined word.
///
/// A `WordRecord` only exists with a non-empty definition; construct it
/// through [`WordRecord::from_fields`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    /// Lower-cased headword as read from the word list.
    pub word: String,
    pub definition: String,
    #[serde(default)]
    pub pronunciation: String,
    #[serde(default)]
    pub example: String,
    /// Label of the dictionary the definition came from (e.g., "Cambridge").
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Downloaded pronunciation audio. Never serialized.
    #[serde(skip)]
    pub audio: Option<Vec<u8>>,
}

impl WordRecord {
    /// Build a record from extracted fields.
    ///
    /// Returns `None` when the definition is empty or whitespace-only.
    pub fn from_fields(word: &str, source: &str, fields: RawFields) -> Option<Self> {
        let definition = fields.definition.trim();
        if definition.is_empty() {
            return None;
        }

        Some(Self {
            word: word.to_lowercase(),
            definition: definition.to_string(),
            pronunciation: fields.pronunciation.trim().to_string(),
            example: fields.example.trim().to_string(),
            source: source.to_string(),
            audio_url: fields.audio_url.filter(|u| !u.trim().is_empty()),
            audio: None,
        })
    }

    /// Attach downloaded audio, consuming the record.
    pub fn with_audio(mut self, bytes: Vec<u8>) -> Self {
        self.audio = Some(bytes);
        self
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }
}

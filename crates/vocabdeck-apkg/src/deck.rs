use crate::ids;
use std::collections::{HashMap, HashSet};
use vocabdeck_model::{
    media_filename, media_stem, sound_tag, MediaAttachment, WordRecord, AUDIO_EXTENSION,
};

/// A note ready for packaging: the record plus its rendered audio field.
#[derive(Debug, Clone)]
pub struct Note {
    pub record: WordRecord,
    /// `[sound:<file>]` when the record carried audio, otherwise empty.
    pub audio_field: String,
}

impl Note {
    /// Field values in note-type order (Word, Definition, Pronunciation,
    /// Example, Source, Audio).
    pub fn fields(&self) -> [&str; 6] {
        [
            &self.record.word,
            &self.record.definition,
            &self.record.pronunciation,
            &self.record.example,
            &self.record.source,
            &self.audio_field,
        ]
    }
}

/// An in-progress deck: append-only notes plus their audio attachments.
#[derive(Debug)]
pub struct Deck {
    name: String,
    id: i64,
    model_id: i64,
    notes: Vec<Note>,
    attachments: Vec<MediaAttachment>,
    /// Word -> assigned attachment filename.
    filenames: HashMap<String, String>,
    taken: HashSet<String>,
}

impl Deck {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            id: ids::deck_id(name),
            model_id: ids::model_id(name),
            notes: Vec::new(),
            attachments: Vec::new(),
            filenames: HashMap::new(),
            taken: HashSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn model_id(&self) -> i64 {
        self.model_id
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn attachments(&self) -> &[MediaAttachment] {
        &self.attachments
    }

    /// Append a record. Its audio, if any, becomes an attachment and the
    /// note's audio field references it.
    pub fn add_record(&mut self, mut record: WordRecord) {
        let audio_field = match record.audio.take() {
            Some(bytes) => {
                let filename = self.assign_filename(&record.word);
                self.store_attachment(&filename, bytes);
                sound_tag(&filename)
            }
            None => String::new(),
        };

        tracing::debug!(word = %record.word, media = %audio_field, "Added note");
        self.notes.push(Note {
            record,
            audio_field,
        });
    }

    /// Filename for `word`'s audio. The same word always gets the same
    /// name; different words that sanitize alike get `_2`, `_3`, ... suffixes.
    fn assign_filename(&mut self, word: &str) -> String {
        if let Some(existing) = self.filenames.get(word) {
            return existing.clone();
        }

        let stem = media_stem(word);
        let mut candidate = media_filename(word);
        let mut suffix = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{stem}_{suffix}.{AUDIO_EXTENSION}");
            suffix += 1;
        }

        if suffix > 2 {
            tracing::warn!(word = %word, filename = %candidate, "Media filename collision, renamed");
        }
        self.taken.insert(candidate.clone());
        self.filenames.insert(word.to_string(), candidate.clone());
        candidate
    }

    fn store_attachment(&mut self, filename: &str, bytes: Vec<u8>) {
        match self.attachments.iter_mut().find(|a| a.filename == filename) {
            Some(existing) => existing.bytes = bytes,
            None => self.attachments.push(MediaAttachment {
                filename: filename.to_string(),
                bytes,
            }),
        }
    }
}

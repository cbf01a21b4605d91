use crate::error::{AudioError, LookupError};
use std::future::Future;
use vocabdeck_model::WordRecord;

/// A dictionary that can define a single word.
///
/// Site-specific scraping lives behind this trait so the pipeline never
/// touches markup.
pub trait DefinitionSource {
    /// Label stored on every record this source produces.
    fn name(&self) -> &str;

    /// Look up `word` and return a record with a non-empty definition.
    fn lookup(&self, word: &str) -> impl Future<Output = Result<WordRecord, LookupError>> + Send;
}

/// A host that serves pronunciation audio referenced by a [`DefinitionSource`].
pub trait MediaSource {
    /// Download the media at `url`.
    ///
    /// `Ok(None)` means there was nothing to fetch (empty URL).
    fn download(&self, url: &str) -> impl Future<Output = Result<Option<Vec<u8>>, AudioError>> + Send;
}

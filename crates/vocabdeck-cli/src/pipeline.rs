use crate::summary::RunSummary;
use std::time::Duration;
use vocabdeck_acquire::{DefinitionSource, MediaSource};
use vocabdeck_apkg::Deck;
use vocabdeck_model::WordRecord;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub include_audio: bool,
    /// Pause after every word, whatever its outcome.
    pub delay: Duration,
}

/// Look up every word in order, attach audio where possible, and append the
/// results to `deck`.
///
/// Failures are per word: a failed lookup is tallied and skipped, a failed
/// audio download only drops the audio. Nothing here aborts the run.
pub async fn run<D, M>(
    words: &[String],
    dictionary: &D,
    media: &M,
    deck: &mut Deck,
    options: &RunOptions,
) -> RunSummary
where
    D: DefinitionSource,
    M: MediaSource,
{
    let mut summary = RunSummary::new(words.len());

    for (i, word) in words.iter().enumerate() {
        println!("Processing {}/{}: {}", i + 1, words.len(), word);

        match dictionary.lookup(word).await {
            Ok(record) => {
                let record = if options.include_audio {
                    attach_audio(record, media).await
                } else {
                    record
                };
                if record.has_audio() {
                    summary.audio_included += 1;
                }
                deck.add_record(record);
                summary.succeeded += 1;
                println!("  ✓ Added: {word}");
            }
            Err(e) => {
                tracing::warn!(word = %word, source = dictionary.name(), "Lookup failed: {e}");
                summary.failed.push(word.clone());
                println!("  ✗ Failed to get definition for: {word}");
            }
        }

        tokio::time::sleep(options.delay).await;
    }

    summary
}

async fn attach_audio<M: MediaSource>(record: WordRecord, media: &M) -> WordRecord {
    let Some(url) = record.audio_url.clone() else {
        return record;
    };

    println!("  Fetching audio from: {url}");
    match media.download(&url).await {
        Ok(Some(bytes)) => {
            println!("  ✓ Audio downloaded ({} bytes)", bytes.len());
            record.with_audio(bytes)
        }
        Ok(None) => {
            println!("  ✗ Audio download failed");
            record
        }
        Err(e) => {
            tracing::warn!(word = %record.word, url = %url, "Audio download failed: {e}");
            println!("  ✗ Audio download failed");
            record
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vocabdeck_acquire::audio::check_payload;
    use vocabdeck_acquire::wordlist::extract_words;
    use vocabdeck_acquire::{AudioError, LookupError};
    use vocabdeck_model::RawFields;

    /// In-memory dictionary: word -> optional audio URL. Unknown words fail.
    struct FakeDictionary {
        entries: HashMap<String, Option<String>>,
    }

    impl FakeDictionary {
        fn new(entries: &[(&str, Option<&str>)]) -> Self {
            Self {
                entries: entries
                    .iter()
                    .map(|(w, url)| (w.to_string(), url.map(str::to_string)))
                    .collect(),
            }
        }
    }

    impl DefinitionSource for FakeDictionary {
        fn name(&self) -> &str {
            "Fake"
        }

        async fn lookup(&self, word: &str) -> Result<WordRecord, LookupError> {
            let audio_url = self
                .entries
                .get(word)
                .ok_or_else(|| LookupError::NoDefinition(word.to_string()))?
                .clone();
            let fields = RawFields {
                definition: format!("meaning of {word}"),
                audio_url,
                ..Default::default()
            };
            WordRecord::from_fields(word, self.name(), fields)
                .ok_or_else(|| LookupError::NoDefinition(word.to_string()))
        }
    }

    /// In-memory media host: URL -> payload, run through the real size floor.
    struct FakeMedia {
        payloads: HashMap<String, Vec<u8>>,
        calls: AtomicUsize,
    }

    impl FakeMedia {
        fn new(payloads: &[(&str, usize)]) -> Self {
            Self {
                payloads: payloads
                    .iter()
                    .map(|(url, len)| (url.to_string(), vec![0xAB; *len]))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl MediaSource for FakeMedia {
        async fn download(&self, url: &str) -> Result<Option<Vec<u8>>, AudioError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.payloads.get(url) {
                Some(bytes) => check_payload(bytes.clone()).map(Some),
                None => Ok(None),
            }
        }
    }

    fn options(include_audio: bool) -> RunOptions {
        RunOptions {
            include_audio,
            delay: Duration::ZERO,
        }
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[tokio::test]
    async fn test_run_tallies_outcomes() {
        let dictionary = FakeDictionary::new(&[
            ("brown", None),
            ("fox", Some("https://media/fox.mp3")),
            ("quick", Some("https://media/quick.mp3")),
            ("the", Some("https://media/missing.mp3")),
        ]);
        let media = FakeMedia::new(&[
            ("https://media/fox.mp3", 5000),
            ("https://media/quick.mp3", 1000),
        ]);
        let input = words(&["brown", "fox", "qwzx", "quick", "the", "zzyzx"]);

        let mut deck = Deck::new("Test");
        let summary = run(&input, &dictionary, &media, &mut deck, &options(true)).await;

        assert_eq!(summary.total, 6);
        assert_eq!(summary.succeeded, 4);
        assert_eq!(summary.audio_included, 1);
        let failed: HashSet<&str> = summary.failed.iter().map(String::as_str).collect();
        assert_eq!(failed, HashSet::from(["qwzx", "zzyzx"]));

        assert_eq!(deck.notes().len(), 4);
        assert_eq!(deck.attachments().len(), 1);
        assert_eq!(deck.attachments()[0].filename, "fox.mp3");
        assert_eq!(media.calls.load(Ordering::SeqCst), 3);

        // Audio failures keep the word, with an empty media field.
        let quick = deck.notes().iter().find(|n| n.record.word == "quick").unwrap();
        assert_eq!(quick.audio_field, "");
    }

    #[tokio::test]
    async fn test_run_without_audio_never_downloads() {
        let dictionary = FakeDictionary::new(&[("fox", Some("https://media/fox.mp3"))]);
        let media = FakeMedia::new(&[("https://media/fox.mp3", 5000)]);

        let mut deck = Deck::new("Test");
        let summary = run(&words(&["fox"]), &dictionary, &media, &mut deck, &options(false)).await;

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.audio_included, 0);
        assert_eq!(media.calls.load(Ordering::SeqCst), 0);
        assert_eq!(deck.notes()[0].audio_field, "");
    }

    #[tokio::test]
    async fn test_run_all_failed() {
        let dictionary = FakeDictionary::new(&[]);
        let media = FakeMedia::new(&[]);
        let input = words(&["a", "b"]);

        let mut deck = Deck::new("Test");
        let summary = run(&input, &dictionary, &media, &mut deck, &options(true)).await;

        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.failed, input);
        assert!(deck.notes().is_empty());

        let dir = tempfile::tempdir().unwrap();
        let stats = vocabdeck_apkg::finalize(&deck, dir.path().join("empty.apkg")).unwrap();
        assert_eq!(stats.notes, 0);
        assert_eq!(stats.media_files, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_follows_every_word() {
        let dictionary = FakeDictionary::new(&[
            ("fox", Some("https://media/fox.mp3")),
            ("quick", None),
        ]);
        let media = FakeMedia::new(&[("https://media/fox.mp3", 5000)]);
        let input = words(&["fox", "nope", "quick", "zilch"]);
        let options = RunOptions {
            include_audio: true,
            delay: Duration::from_millis(1500),
        };

        let mut deck = Deck::new("Test");
        let start = tokio::time::Instant::now();
        let summary = run(&input, &dictionary, &media, &mut deck, &options).await;

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed.len(), 2);
        // Failed words wait too.
        let expected = options.delay * input.len() as u32;
        let elapsed = start.elapsed();
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(10),
            "elapsed {elapsed:?}, expected {expected:?}"
        );
    }

    #[tokio::test]
    async fn test_end_to_end_from_text() {
        let input = extract_words("The quick brown fox. Fox! QUICK.");
        assert_eq!(input, words(&["brown", "fox", "quick", "the"]));

        let dictionary = FakeDictionary::new(&[
            ("brown", None),
            ("fox", Some("https://media/fox.mp3")),
            ("quick", Some("https://media/quick.mp3")),
            ("the", Some("https://media/the.mp3")),
        ]);
        let media = FakeMedia::new(&[
            ("https://media/fox.mp3", 3000),
            ("https://media/quick.mp3", 3000),
            ("https://media/the.mp3", 3000),
        ]);

        let mut deck = Deck::new("Vocabulary Deck");
        let summary = run(&input, &dictionary, &media, &mut deck, &options(true)).await;
        assert_eq!(summary.succeeded, 4);
        assert_eq!(summary.audio_included, 3);
        assert!(summary.failed.is_empty());

        let names: HashSet<&str> = deck.attachments().iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(names, HashSet::from(["fox.mp3", "quick.mp3", "the.mp3"]));
        let brown = deck.notes().iter().find(|n| n.record.word == "brown").unwrap();
        assert_eq!(brown.audio_field, "");

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("vocabulary_deck.apkg");
        let stats = vocabdeck_apkg::finalize(&deck, &out).unwrap();
        assert_eq!(stats.notes, 4);
        assert_eq!(stats.cards, 8);
        assert_eq!(stats.media_files, 3);
        assert!(out.exists());
    }
}

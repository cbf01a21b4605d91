use crate::deck::Deck;
use crate::error::PackageError;
use crate::ids;
use crate::schema;
use crate::template::TEMPLATES;
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const COLLECTION_ENTRY: &str = "collection.anki2";
const MEDIA_ENTRY: &str = "media";

/// What ended up in a written package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageStats {
    pub notes: usize,
    pub cards: usize,
    pub media_files: usize,
}

/// Write `deck` as an `.apkg` package at `output_path`.
///
/// The package is assembled in a temporary file beside the destination and
/// renamed into place, so a failure never leaves a partial file behind.
pub fn finalize(deck: &Deck, output_path: impl AsRef<Path>) -> Result<PackageStats, PackageError> {
    let output_path = output_path.as_ref();
    let now = chrono::Utc::now();

    let scratch = tempfile::tempdir()?;
    let db_path = scratch.path().join(COLLECTION_ENTRY);
    let stats = write_collection(&db_path, deck, now)?;
    let collection = fs::read(&db_path)?;

    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut staged = tempfile::Builder::new()
        .prefix(".vocabdeck-")
        .suffix(".apkg.tmp")
        .tempfile_in(dir)?;
    write_archive(staged.as_file_mut(), &collection, deck)?;
    staged.as_file().sync_all()?;
    staged.persist(output_path).map_err(|e| PackageError::Persist {
        path: output_path.to_path_buf(),
        source: e.error,
    })?;

    tracing::info!(
        path = %output_path.display(),
        notes = stats.notes,
        cards = stats.cards,
        media = stats.media_files,
        "Wrote deck package"
    );
    Ok(stats)
}

/// Create the collection database for `deck` at `path`.
fn write_collection(
    path: &Path,
    deck: &Deck,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<PackageStats, PackageError> {
    let now_secs = now.timestamp();
    let now_ms = now.timestamp_millis();

    let mut conn = Connection::open(path)?;
    conn.execute_batch(schema::SCHEMA_SQL)?;

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO col (id, crt, mod, scm, ver, dty, usn, ls, conf, models, decks, dconf, tags)
         VALUES (1, ?1, ?2, ?2, ?3, 0, 0, 0, ?4, ?5, ?6, ?7, '{}')",
        params![
            now_secs,
            now_ms,
            schema::SCHEMA_VERSION,
            schema::collection_config_json(deck.id(), deck.model_id())?,
            schema::models_json(deck.model_id(), deck.id(), now_secs)?,
            schema::decks_json(deck.id(), deck.name(), now_secs)?,
            schema::deck_config_json(now_secs)?,
        ],
    )?;

    let mut cards = 0;
    {
        let mut insert_note = tx.prepare(
            "INSERT INTO notes (id, guid, mid, mod, usn, tags, flds, sfld, csum, flags, data)
             VALUES (?1, ?2, ?3, ?4, -1, '', ?5, ?6, ?7, 0, '')",
        )?;
        let mut insert_card = tx.prepare(
            "INSERT INTO cards (id, nid, did, ord, mod, usn, type, queue, due, ivl, factor,
                                reps, lapses, left, odue, odid, flags, data)
             VALUES (?1, ?2, ?3, ?4, ?5, -1, 0, 0, ?6, 0, 0, 0, 0, 0, 0, 0, 0, '')",
        )?;

        for (position, note) in deck.notes().iter().enumerate() {
            let position = position as i64;
            let note_id = now_ms + position;
            let word = note.record.word.as_str();

            insert_note.execute(params![
                note_id,
                ids::note_guid(deck.id(), word),
                deck.model_id(),
                now_secs,
                schema::join_fields(&note.fields()),
                word,
                ids::field_checksum(word),
            ])?;

            for ord in 0..TEMPLATES.len() {
                let card_id = now_ms + position * TEMPLATES.len() as i64 + ord as i64;
                insert_card.execute(params![
                    card_id,
                    note_id,
                    deck.id(),
                    ord as i64,
                    now_secs,
                    position,
                ])?;
                cards += 1;
            }
        }
    }
    tx.commit()?;
    conn.close().map_err(|(_, e)| e)?;

    Ok(PackageStats {
        notes: deck.notes().len(),
        cards,
        media_files: deck.attachments().len(),
    })
}

/// Zip the collection, the media manifest and the numbered media files.
fn write_archive<W: Write + std::io::Seek>(
    sink: W,
    collection: &[u8],
    deck: &Deck,
) -> Result<(), PackageError> {
    let mut zip = ZipWriter::new(sink);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(COLLECTION_ENTRY, options)?;
    zip.write_all(collection)?;

    // Media entries are numbered in filename order for reproducible archives.
    let mut attachments: Vec<_> = deck.attachments().iter().collect();
    attachments.sort_by(|a, b| a.filename.cmp(&b.filename));

    let manifest: BTreeMap<String, &str> = attachments
        .iter()
        .enumerate()
        .map(|(i, a)| (i.to_string(), a.filename.as_str()))
        .collect();
    zip.start_file(MEDIA_ENTRY, options)?;
    zip.write_all(serde_json::to_string(&manifest)?.as_bytes())?;

    for (i, attachment) in attachments.iter().enumerate() {
        zip.start_file(i.to_string(), options)?;
        zip.write_all(&attachment.bytes)?;
        tracing::debug!(entry = i, filename = %attachment.filename, bytes = attachment.bytes.len(), "Embedded media");
    }

    zip.finish()?;
    Ok(())
}

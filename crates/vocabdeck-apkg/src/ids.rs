//! Identifiers that must stay stable across runs and machines.
//!
//! Everything here is derived from fixed hash functions, never from a
//! process-seeded hasher, so rebuilding a deck with the same name updates
//! the existing deck and note type on import instead of duplicating them.

use sha1::Sha1;
use sha2::{Digest, Sha256};

/// IDs land in `[ID_FLOOR, ID_FLOOR + ID_SPAN)`: well above the default
/// deck's ID 1 and well below 2^53, so JSON consumers read them exactly.
const ID_FLOOR: u64 = 1_000_000_000_000;
const ID_SPAN: u64 = 1_000_000_000_000;

fn stable_id(namespace: &str, label: &str) -> i64 {
    let digest = Sha256::new()
        .chain_update(namespace.as_bytes())
        .chain_update([0u8])
        .chain_update(label.as_bytes())
        .finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    (ID_FLOOR + u64::from_be_bytes(head) % ID_SPAN) as i64
}

pub fn deck_id(deck_name: &str) -> i64 {
    stable_id("deck", deck_name)
}

pub fn model_id(deck_name: &str) -> i64 {
    stable_id("model", deck_name)
}

/// Note GUID, unique per deck and word.
pub fn note_guid(deck_id: i64, word: &str) -> String {
    let digest = Sha256::new()
        .chain_update(deck_id.to_be_bytes())
        .chain_update(word.as_bytes())
        .finalize();
    digest[..8].iter().map(|b| format!("{b:02x}")).collect()
}

/// Duplicate-detection checksum over the sort field: the first 8 hex
/// digits of its SHA-1, read as an integer.
pub fn field_checksum(field: &str) -> i64 {
    let digest = Sha1::digest(field.as_bytes());
    let mut head = [0u8; 4];
    head.copy_from_slice(&digest[..4]);
    i64::from(u32::from_be_bytes(head))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_stable() {
        assert_eq!(deck_id("Vocabulary Deck"), deck_id("Vocabulary Deck"));
        assert_eq!(model_id("Vocabulary Deck"), model_id("Vocabulary Deck"));
    }

    #[test]
    fn test_ids_differ_by_name_and_namespace() {
        assert_ne!(deck_id("Vocabulary Deck"), deck_id("Other Deck"));
        assert_ne!(deck_id("Vocabulary Deck"), model_id("Vocabulary Deck"));
    }

    #[test]
    fn test_ids_in_range() {
        for name in ["", "a", "Vocabulary Deck", "日本語"] {
            let id = deck_id(name);
            assert!(id >= ID_FLOOR as i64 && id < (ID_FLOOR + ID_SPAN) as i64, "{id}");
        }
    }

    #[test]
    fn test_note_guid() {
        let guid = note_guid(42, "fox");
        assert_eq!(guid.len(), 16);
        assert_eq!(guid, note_guid(42, "fox"));
        assert_ne!(guid, note_guid(43, "fox"));
        assert_ne!(guid, note_guid(42, "box"));
    }

    #[test]
    fn test_field_checksum() {
        // sha1("fox") = ff0f0a8b...
        assert_eq!(field_checksum("fox"), 0xff0f0a8b);
    }
}

use unicode_normalization::UnicodeNormalization;

/// Normalize text scraped from HTML to NFC and collapse runs of whitespace.
///
/// Extracted definitions carry the page's indentation and line breaks;
/// on a card they should read as a single line.
pub fn clean_text(input: &str) -> String {
    let nfc: String = input.nfc().collect();
    nfc.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compose `input` to Unicode NFC.
pub fn nfc(input: &str) -> String {
    input.nfc().collect()
}

/// Case-fold a headword into its canonical lookup form.
pub fn normalize_word(input: &str) -> String {
    fold_case(&nfc(input))
}

/// Lower-case `input` one char at a time.
///
/// A few capitals expand to a letter plus a combining mark ("İ" becomes
/// "i" + U+0307); only the alphabetic part of such expansions is kept.
pub fn fold_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        let lower = c.to_lowercase();
        if lower.len() == 1 {
            out.extend(lower);
        } else {
            out.extend(lower.filter(|l| l.is_alphabetic()));
        }
    }
    out
}

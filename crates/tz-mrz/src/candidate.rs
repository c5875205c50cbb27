//! # MRZ Candidate Lines
//!
//! OCR output is noisy: labels, printed data, and partial reads of the MRZ
//! itself. A line qualifies as a candidate when, after removing whitespace
//! and uppercasing:
//!
//! - it begins with `P<` and has at least 40 characters (passport name line,
//!   which OCR often garbles with stray symbols), or
//! - it has at least 30 characters, all from `[A-Z0-9<]`.

/// Minimum length for a `P<`-prefixed passport line.
pub const MIN_PASSPORT_LINE_LEN: usize = 40;

/// Minimum length for a generic MRZ-charset line.
pub const MIN_MRZ_LINE_LEN: usize = 30;

/// Whether `c` belongs to the MRZ character set `[A-Z0-9<]`.
pub fn is_mrz_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '<'
}

/// Remove all whitespace and uppercase.
pub fn normalize_line(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Candidate predicate over an already-normalized line.
pub fn is_candidate(line: &str) -> bool {
    let len = line.chars().count();
    (line.starts_with("P<") && len >= MIN_PASSPORT_LINE_LEN)
        || (len >= MIN_MRZ_LINE_LEN && line.chars().all(is_mrz_char))
}

/// Normalize every line of the recognized text and keep the candidates, in
/// recognition order. Entries containing embedded newlines are split first.
pub fn candidate_lines<S: AsRef<str>>(text: &[S]) -> Vec<String> {
    text.iter()
        .flat_map(|entry| entry.as_ref().lines())
        .map(normalize_line)
        .filter(|line| is_candidate(line))
        .collect()
}

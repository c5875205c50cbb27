//! # ICAO 9303 Check Digits
//!
//! Each character maps to a value (`0-9` → 0–9, `A-Z` → 10–35, `<` → 0),
//! values are multiplied by the repeating weights 7, 3, 1, and the check
//! digit is the sum modulo 10.

const WEIGHTS: [u32; 3] = [7, 3, 1];

/// Numeric value of an MRZ character, or `None` outside `[A-Z0-9<]`.
pub fn char_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
        '<' => Some(0),
        _ => None,
    }
}

/// Compute the check digit of a field. `None` if the field contains a
/// character outside the MRZ set.
pub fn compute(field: &str) -> Option<u32> {
    field
        .chars()
        .zip(WEIGHTS.iter().cycle())
        .try_fold(0u32, |acc, (c, w)| char_value(c).map(|v| acc + v * w))
        .map(|sum| sum % 10)
}

/// Whether `declared` is the correct check digit for `field`.
///
/// A declared `<` counts as 0, which ICAO permits for empty optional fields.
pub fn verify(field: &str, declared: char) -> bool {
    let declared = match declared {
        '<' => 0,
        '0'..='9' => declared as u32 - '0' as u32,
        _ => return false,
    };
    compute(field) == Some(declared)
}

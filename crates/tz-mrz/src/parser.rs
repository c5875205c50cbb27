//! # MRZ Layout Parser
//!
//! Locates TD1, TD2 and TD3 windows in the candidate lines and slices them
//! into fields.
//!
//! ## Layouts
//!
//! ```text
//! TD3  line 1  P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<   names
//!      line 2  L898902C36UTO7408122F1204159ZE184226B<<<<<10   checked
//! TD2  line 1  I<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<            names
//!      line 2  D231458907UTO7408122F1204159<<<<<<<6            checked
//! TD1  line 1  I<UTOD231458907<<<<<<<<<<<<<<<                  checked
//!      line 2  7408122F1204159UTO<<<<<<<<<<<6                  checked
//!      line 3  ERIKSSON<<ANNA<MARIA<<<<<<<<<<                  names
//! ```
//!
//! Window selection: a TD3 machine line is exactly 44 characters and takes
//! the preceding candidate as its name line when that line starts with `P`.
//! TD2 is the same shape at 36 characters. TD1 needs two consecutive
//! 30-character lines, with an optional third for names. Name lines are
//! right-padded with `<` because OCR tends to drop trailing fillers; a
//! machine line without its name line still parses (names absent).
//!
//! Among all windows the first fully valid parse wins. When none is valid,
//! the window with the fewest failed check digits is returned so the caller
//! can report which fields failed.

use serde::{Deserialize, Serialize};

use crate::candidate::is_mrz_char;
use crate::check_digit;
use crate::error::MrzError;

/// MRZ document layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MrzFormat {
    /// ID-1 card, three lines of 30.
    Td1,
    /// ID-2 card, two lines of 36.
    Td2,
    /// Passport booklet, two lines of 44.
    Td3,
}

impl MrzFormat {
    /// Characters per line.
    pub fn line_width(&self) -> usize {
        match self {
            Self::Td1 => 30,
            Self::Td2 => 36,
            Self::Td3 => 44,
        }
    }

    /// Canonical name (e.g. "TD3").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Td1 => "TD1",
            Self::Td2 => "TD2",
            Self::Td3 => "TD3",
        }
    }
}

impl std::fmt::Display for MrzFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field protected by a check digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckedField {
    DocumentNumber,
    BirthDate,
    ExpiryDate,
    /// TD3 personal-number / optional-data field.
    PersonalNumber,
    /// Check digit over the concatenation of the other checked fields.
    Composite,
}

impl CheckedField {
    /// Human-readable field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentNumber => "document number",
            Self::BirthDate => "birth date",
            Self::ExpiryDate => "expiry date",
            Self::PersonalNumber => "personal number",
            Self::Composite => "composite",
        }
    }
}

/// Outcome of one check digit comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub field: CheckedField,
    pub valid: bool,
}

/// Raw fields sliced from one MRZ window, with check digit outcomes.
///
/// Values are exactly as encoded; fillers are not yet trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MrzParse {
    pub format: MrzFormat,
    /// Two-character document code (`P<`, `I<`, `ID`…), absent when the
    /// layout keeps it on a name line that was not recognized.
    pub document_code: Option<String>,
    /// Issuing state, absent under the same condition as `document_code`.
    pub issuing_state: Option<String>,
    pub nationality: String,
    pub document_number: String,
    pub birth_date: String,
    pub expiry_date: String,
    pub sex: char,
    pub optional_data: String,
    /// Raw name field (`SURNAME<<GIVEN<NAMES<<<`), if a name line was found.
    pub names: Option<String>,
    pub checks: Vec<CheckResult>,
}

impl MrzParse {
    /// Whether every check digit matched.
    pub fn valid(&self) -> bool {
        self.checks.iter().all(|c| c.valid)
    }

    /// Fields whose check digit did not match.
    pub fn failed_fields(&self) -> Vec<CheckedField> {
        self.checks
            .iter()
            .filter(|c| !c.valid)
            .map(|c| c.field)
            .collect()
    }
}

/// Parse normalized candidate lines.
///
/// Returns the first valid window, otherwise the least-broken window
/// (callers check [`MrzParse::valid`]). Fails with `NoMrzDetected` on empty
/// input and `UnrecognizedLayout` when no window fits any layout.
pub fn parse(candidates: &[String]) -> Result<MrzParse, MrzError> {
    if candidates.is_empty() {
        return Err(MrzError::NoMrzDetected);
    }

    let mut best: Option<MrzParse> = None;
    for window in windows(candidates) {
        let parsed = window.parse();
        if parsed.valid() {
            return Ok(parsed);
        }
        let better = best
            .as_ref()
            .map_or(true, |b| parsed.failed_fields().len() < b.failed_fields().len());
        if better {
            best = Some(parsed);
        }
    }

    best.ok_or_else(|| MrzError::UnrecognizedLayout {
        lengths: candidates.iter().map(|l| l.chars().count()).collect(),
    })
}

// ─── Windows ─────────────────────────────────────────────────────────

enum Window<'a> {
    Td3 {
        names: Option<String>,
        machine: &'a str,
    },
    Td2 {
        names: Option<String>,
        machine: &'a str,
    },
    Td1 {
        upper: &'a str,
        lower: &'a str,
        names: Option<&'a str>,
    },
}

fn is_machine_line(line: &str, width: usize) -> bool {
    line.len() == width && line.chars().all(is_mrz_char)
}

/// Replace characters outside the MRZ set with `<` and pad or cut to `width`.
fn fit_name_line(line: &str, width: usize) -> String {
    let mut fitted: String = line
        .chars()
        .map(|c| if is_mrz_char(c) { c } else { '<' })
        .take(width)
        .collect();
    while fitted.len() < width {
        fitted.push('<');
    }
    fitted
}

fn windows(lines: &[String]) -> Vec<Window<'_>> {
    let mut found = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let previous = i.checked_sub(1).map(|p| lines[p].as_str());

        if is_machine_line(line, MrzFormat::Td3.line_width()) && !line.starts_with("P<") {
            let names = previous
                .filter(|p| p.starts_with('P'))
                .map(|p| fit_name_line(p, MrzFormat::Td3.line_width()));
            found.push(Window::Td3 {
                names,
                machine: line,
            });
        }

        if is_machine_line(line, MrzFormat::Td2.line_width()) {
            let names = previous
                .filter(|p| p.chars().count() <= MrzFormat::Td2.line_width())
                .filter(|p| p.chars().next().is_some_and(|c| c.is_ascii_uppercase()))
                .map(|p| fit_name_line(p, MrzFormat::Td2.line_width()));
            found.push(Window::Td2 {
                names,
                machine: line,
            });
        }

        let td1 = MrzFormat::Td1.line_width();
        if let Some(next) = lines.get(i + 1) {
            if is_machine_line(line, td1) && is_machine_line(next, td1) {
                let names = lines
                    .get(i + 2)
                    .map(String::as_str)
                    .filter(|l| is_machine_line(l, td1));
                found.push(Window::Td1 {
                    upper: line,
                    lower: next,
                    names,
                });
            }
        }
    }
    found
}

/// Resolve an ICAO long document number.
///
/// When the document-number check position holds `<`, the number continues
/// in the optional data up to the next filler and the character just before
/// that filler is the real check digit. Returns the full number, its
/// declared check digit, and the optional data that remains.
fn resolve_document_number(base: &str, declared: char, optional: &str) -> (String, char, String) {
    if declared != '<' {
        return (base.to_string(), declared, optional.to_string());
    }
    match optional.find('<') {
        Some(end) if end > 0 => {
            let extension = &optional[..end - 1];
            let check = optional[end - 1..end].chars().next().unwrap_or('<');
            (
                format!("{base}{extension}"),
                check,
                optional[end..].to_string(),
            )
        }
        // No continuation present: keep the filler as the declared digit,
        // which fails unless the number itself sums to 0 mod 10.
        _ => (base.to_string(), declared, optional.to_string()),
    }
}

fn check(field: CheckedField, data: &str, declared: char) -> CheckResult {
    CheckResult {
        field,
        valid: check_digit::verify(data, declared),
    }
}

fn at(line: &str, index: usize) -> char {
    line.as_bytes().get(index).map_or('<', |b| *b as char)
}

fn names_field(line: &str, start: usize) -> String {
    line.get(start..).unwrap_or_default().to_string()
}

impl Window<'_> {
    fn parse(&self) -> MrzParse {
        match self {
            Window::Td3 { names, machine } => parse_two_line(MrzFormat::Td3, names.as_deref(), machine),
            Window::Td2 { names, machine } => parse_two_line(MrzFormat::Td2, names.as_deref(), machine),
            Window::Td1 {
                upper,
                lower,
                names,
            } => parse_td1(upper, lower, *names),
        }
    }
}

/// TD2 and TD3 share the machine-line shape; only the optional-data width
/// and the TD3 personal-number check differ.
fn parse_two_line(format: MrzFormat, names: Option<&str>, m: &str) -> MrzParse {
    let width = format.line_width();
    let optional_end = width - 1 - usize::from(format == MrzFormat::Td3);

    let optional_raw = &m[28..optional_end];
    let (document_number, doc_check, optional_data) = match format {
        MrzFormat::Td2 => resolve_document_number(&m[0..9], at(m, 9), optional_raw),
        _ => (m[0..9].to_string(), at(m, 9), optional_raw.to_string()),
    };

    let mut checks = vec![
        check(CheckedField::DocumentNumber, &document_number, doc_check),
        check(CheckedField::BirthDate, &m[13..19], at(m, 19)),
        check(CheckedField::ExpiryDate, &m[21..27], at(m, 27)),
    ];
    if format == MrzFormat::Td3 {
        checks.push(check(CheckedField::PersonalNumber, &m[28..42], at(m, 42)));
    }
    let composite = format!("{}{}{}", &m[0..10], &m[13..20], &m[21..width - 1]);
    checks.push(check(CheckedField::Composite, &composite, at(m, width - 1)));

    MrzParse {
        format,
        document_code: names.map(|n| n[0..2].to_string()),
        issuing_state: names.map(|n| n[2..5].to_string()),
        nationality: m[10..13].to_string(),
        document_number,
        birth_date: m[13..19].to_string(),
        expiry_date: m[21..27].to_string(),
        sex: at(m, 20),
        optional_data,
        names: names.map(|n| names_field(n, 5)),
        checks,
    }
}

fn parse_td1(upper: &str, lower: &str, names: Option<&str>) -> MrzParse {
    let (document_number, doc_check, optional_upper) =
        resolve_document_number(&upper[5..14], at(upper, 14), &upper[15..30]);

    let composite = format!(
        "{}{}{}{}",
        &upper[5..30],
        &lower[0..7],
        &lower[8..15],
        &lower[18..29]
    );
    let checks = vec![
        check(CheckedField::DocumentNumber, &document_number, doc_check),
        check(CheckedField::BirthDate, &lower[0..6], at(lower, 6)),
        check(CheckedField::ExpiryDate, &lower[8..14], at(lower, 14)),
        check(CheckedField::Composite, &composite, at(lower, 29)),
    ];

    MrzParse {
        format: MrzFormat::Td1,
        document_code: Some(upper[0..2].to_string()),
        issuing_state: Some(upper[2..5].to_string()),
        nationality: lower[15..18].to_string(),
        document_number,
        birth_date: lower[0..6].to_string(),
        expiry_date: lower[8..14].to_string(),
        sex: at(lower, 7),
        optional_data: format!("{optional_upper}{}", &lower[18..29]),
        names: names.map(|n| names_field(n, 0)),
        checks,
    }
}

//! Recognized text → [`ParsedIdentity`].

use serde::Serialize;
use tz_core::{DocumentNumber, MrzDate, NationalityCode, Sex};

use crate::candidate::candidate_lines;
use crate::error::MrzError;
use crate::parser::{self, MrzFormat, MrzParse};

/// Identity fields read from a machine-readable zone.
///
/// Only produced for a window whose check digits all match, so `valid` is
/// always `true` on values returned by [`extract`]; the flag is kept so
/// downstream consumers can refuse anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedIdentity {
    pub format: MrzFormat,
    pub document_code: Option<String>,
    pub issuing_state: Option<String>,
    pub nationality: NationalityCode,
    pub document_number: DocumentNumber,
    pub date_of_birth: MrzDate,
    pub date_of_expiry: MrzDate,
    pub sex: Sex,
    pub surname: Option<String>,
    pub given_names: Option<String>,
    pub optional_data: String,
    pub valid: bool,
}

/// Extract an identity from OCR output.
///
/// # Errors
///
/// - [`MrzError::NoMrzDetected`] when no line qualifies as a candidate.
/// - [`MrzError::UnrecognizedLayout`] when candidates fit no layout.
/// - [`MrzError::InvalidChecksum`] when the best window fails a check digit.
pub fn extract<S: AsRef<str>>(text: &[S]) -> Result<ParsedIdentity, MrzError> {
    let candidates = candidate_lines(text);
    if candidates.is_empty() {
        tracing::debug!(lines = text.len(), "no MRZ candidate lines");
        return Err(MrzError::NoMrzDetected);
    }

    let parsed = parser::parse(&candidates)?;
    if !parsed.valid() {
        let fields = parsed.failed_fields();
        tracing::debug!(
            format = %parsed.format,
            failed = fields.len(),
            "MRZ check digits failed"
        );
        return Err(MrzError::InvalidChecksum { fields });
    }

    tracing::debug!(
        candidates = candidates.len(),
        format = %parsed.format,
        "MRZ parsed"
    );
    Ok(ParsedIdentity::from_parse(parsed))
}

impl ParsedIdentity {
    fn from_parse(parse: MrzParse) -> Self {
        let (surname, given_names) = parse
            .names
            .as_deref()
            .map(split_names)
            .unwrap_or((None, None));
        Self {
            format: parse.format,
            document_code: parse.document_code.map(|c| trim_fillers(&c)),
            issuing_state: parse.issuing_state,
            nationality: NationalityCode::from_mrz(&parse.nationality),
            document_number: DocumentNumber::from_mrz(&parse.document_number),
            date_of_birth: MrzDate(parse.birth_date),
            date_of_expiry: MrzDate(parse.expiry_date),
            sex: Sex::from_mrz(parse.sex),
            surname,
            given_names,
            optional_data: trim_fillers(&parse.optional_data),
            valid: parse.checks.iter().all(|c| c.valid),
        }
    }
}

fn trim_fillers(raw: &str) -> String {
    raw.trim_matches('<').to_string()
}

/// `SURNAME<<GIVEN<NAMES<<<` → ("SURNAME", "GIVEN NAMES").
fn split_names(raw: &str) -> (Option<String>, Option<String>) {
    let (surname, given) = raw.split_once("<<").unwrap_or((raw, ""));
    (words(surname), words(given))
}

fn words(raw: &str) -> Option<String> {
    let joined = raw
        .split('<')
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!joined.is_empty()).then_some(joined)
}

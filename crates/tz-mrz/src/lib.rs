//! # tz-mrz — Machine-Readable Zone Extraction
//!
//! Turns the text lines produced by OCR over one captured frame into a
//! validated [`ParsedIdentity`].
//!
//! ## Pipeline
//!
//! 1. **Candidates** (`candidate.rs`): strip whitespace, uppercase, and keep
//!    lines that look like MRZ lines: `P<`-prefixed lines of at least 40
//!    characters, or lines of at least 30 characters over `[A-Z0-9<]`.
//! 2. **Layout** (`parser.rs`): find TD3 (2×44), TD2 (2×36) or TD1 (3×30)
//!    windows among the candidates and slice them into fields.
//! 3. **Check digits** (`check_digit.rs`): ICAO 9303 weighted sums
//!    (weights 7, 3, 1) over the document number, dates, optional data and
//!    the composite field.
//! 4. **Identity** (`extract.rs`): the first window whose check digits all
//!    match becomes a `ParsedIdentity` with `valid = true`.
//!
//! Fields are passed through as parsed. Dates stay raw `YYMMDD`; no range
//! validation happens here.

pub mod candidate;
pub mod check_digit;
pub mod error;
pub mod extract;
pub mod parser;

pub use candidate::{candidate_lines, is_candidate, normalize_line};
pub use error::MrzError;
pub use extract::{extract, ParsedIdentity};
pub use parser::{parse, CheckResult, CheckedField, MrzFormat, MrzParse};

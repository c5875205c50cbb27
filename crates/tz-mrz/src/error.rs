//! MRZ extraction errors.

use tz_core::ScanError;

use crate::parser::CheckedField;

/// Errors from MRZ extraction. All are recoverable: the user picks a
/// document type again and re-captures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MrzError {
    /// No recognized line qualifies as an MRZ candidate.
    #[error("no machine-readable zone detected")]
    NoMrzDetected,

    /// A layout matched but at least one check digit did not.
    #[error("check digit mismatch in {}", join_fields(.fields))]
    InvalidChecksum {
        /// Fields whose declared check digit differs from the computed one.
        fields: Vec<CheckedField>,
    },

    /// Candidates exist but none fits a TD1, TD2 or TD3 layout.
    #[error("no MRZ layout matches candidate lines of length {lengths:?}")]
    UnrecognizedLayout {
        /// Character counts of the candidate lines, in recognition order.
        lengths: Vec<usize>,
    },
}

fn join_fields(fields: &[CheckedField]) -> String {
    fields
        .iter()
        .map(CheckedField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<MrzError> for ScanError {
    fn from(err: MrzError) -> Self {
        match err {
            MrzError::NoMrzDetected => ScanError::NoMrzDetected,
            MrzError::InvalidChecksum { fields } => ScanError::InvalidMrzChecksum {
                fields: fields.iter().map(|f| f.as_str().to_string()).collect(),
            },
            MrzError::UnrecognizedLayout { lengths } => ScanError::UnrecognizedMrzLayout(
                format!("{} candidate line(s) of length {lengths:?}", lengths.len()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_checksum_display() {
        let err = MrzError::InvalidChecksum {
            fields: vec![CheckedField::DocumentNumber, CheckedField::Composite],
        };
        assert_eq!(
            err.to_string(),
            "check digit mismatch in document number, composite"
        );
    }

    #[test]
    fn test_into_scan_error() {
        assert_eq!(ScanError::from(MrzError::NoMrzDetected), ScanError::NoMrzDetected);
        let scan: ScanError = MrzError::InvalidChecksum {
            fields: vec![CheckedField::BirthDate],
        }
        .into();
        assert_eq!(
            scan,
            ScanError::InvalidMrzChecksum {
                fields: vec!["birth date".to_string()]
            }
        );
        let scan: ScanError = MrzError::UnrecognizedLayout { lengths: vec![31] }.into();
        assert!(matches!(scan, ScanError::UnrecognizedMrzLayout(_)));
    }
}

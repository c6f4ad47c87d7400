// ============================================================================
// spark-collections - Errors
// The few operations that can fail: record shape checks and value conversion
// ============================================================================
//
// Lookups never fail. A missing key, an out-of-range index or a hole is an
// `Option::None`, not an error. Only constructing a record against a shape
// and converting a dynamic `Value` into a concrete type can go wrong.
// ============================================================================

use thiserror::Error;

/// Result alias for fallible record and value operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by record construction and value conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A field that the record's shape does not declare.
    #[error("record `{record}` has no field `{field}`")]
    UnknownField { record: String, field: String },

    /// A dynamic value held a different kind than the one requested.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl Error {
    pub(crate) fn unknown_field(record: &str, field: &str) -> Self {
        Error::UnknownField {
            record: record.to_owned(),
            field: field.to_owned(),
        }
    }

    pub(crate) fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Error::TypeMismatch { expected, found }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_field_message() {
        let err = Error::unknown_field("Person", "height");
        assert_eq!(err.to_string(), "record `Person` has no field `height`");
    }

    #[test]
    fn type_mismatch_message() {
        let err = Error::type_mismatch("int", "string");
        assert_eq!(err.to_string(), "expected int, found string");
    }
}

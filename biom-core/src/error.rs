//! Error types for BIOM table validation

/// Broad classification of a validation failure
///
/// Every [`BiomError`] maps to exactly one kind. Callers that only care
/// about the class of failure (tests, error reporting) can match on this
/// instead of destructuring the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Structural type of the supplied value is wrong
    TypeMismatch,
    /// Textual value outside a closed vocabulary
    VocabularyViolation,
    /// Sequence value with the wrong element count
    ArityViolation,
    /// Element of a structurally valid value outside its domain
    DomainViolation,
    /// Cross-field disagreement found by an explicit consistency check
    Inconsistent,
}

/// Errors raised by table construction, field assignment, and consistency
/// checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BiomError {
    /// Supplied value's structural type does not match the field's shape
    TypeMismatch {
        /// Field the value was destined for
        field: &'static str,
        /// Human-readable description of the required shape
        expected: &'static str,
    },
    /// Value is of the right type but not a member of the field's
    /// controlled vocabulary
    VocabularyViolation {
        /// Field the value was destined for
        field: &'static str,
        /// The rejected value
        value: String,
    },
    /// Sequence value has the wrong number of elements
    ArityViolation {
        /// Field the value was destined for
        field: &'static str,
        /// Required element count
        expected: usize,
        /// Supplied element count
        actual: usize,
    },
    /// Structurally valid value fails a finer-grained domain rule
    DomainViolation {
        /// Field the value was destined for
        field: &'static str,
        /// Which domain rule failed
        reason: &'static str,
    },
    /// Fields disagree with each other; only produced by
    /// [`BiomTable::check_consistency`](crate::BiomTable::check_consistency)
    /// and never by construction or assignment
    Inconsistent {
        /// Which cross-field rule failed
        reason: String,
    },
}

impl BiomError {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            BiomError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            BiomError::VocabularyViolation { .. } => ErrorKind::VocabularyViolation,
            BiomError::ArityViolation { .. } => ErrorKind::ArityViolation,
            BiomError::DomainViolation { .. } => ErrorKind::DomainViolation,
            BiomError::Inconsistent { .. } => ErrorKind::Inconsistent,
        }
    }

    /// Field the error was raised for, if it concerns a single field
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            BiomError::TypeMismatch { field, .. }
            | BiomError::VocabularyViolation { field, .. }
            | BiomError::ArityViolation { field, .. }
            | BiomError::DomainViolation { field, .. } => Some(*field),
            BiomError::Inconsistent { .. } => None,
        }
    }
}

impl std::fmt::Display for BiomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BiomError::TypeMismatch { field, expected } => {
                write!(f, "field '{field}' requires {expected}")
            }
            BiomError::VocabularyViolation { field, value } => {
                write!(f, "'{value}' is not in the vocabulary for field '{field}'")
            }
            BiomError::ArityViolation {
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "field '{field}' requires exactly {expected} elements, got {actual}"
                )
            }
            BiomError::DomainViolation { field, reason } => {
                write!(f, "field '{field}' is out of domain: {reason}")
            }
            BiomError::Inconsistent { reason } => {
                write!(f, "inconsistent table: {reason}")
            }
        }
    }
}

impl std::error::Error for BiomError {}

/// Result type for BIOM table operations
pub type Result<T> = std::result::Result<T, BiomError>;

use crate::value::OperandKind;

/// Error raised when an operand is read under an alternative it does not hold.
///
/// There is no "absent" error: a missing value is `Operand::Null`, not a failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperandError {
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: OperandKind,
        found: &'static str,
    },
}

impl OperandError {
    /// Operand holds `found` while the caller asked for `expected`.
    pub fn mismatch(expected: OperandKind, found: OperandKind) -> Self {
        tracing::debug!(%expected, %found, "operand type mismatch");
        Self::TypeMismatch { expected, found: found.name() }
    }

    /// Type-erased cell holds something that is not an `expected` value.
    pub fn foreign(expected: OperandKind) -> Self {
        tracing::debug!(%expected, "any-typed cell holds a foreign value");
        Self::TypeMismatch { expected, found: "foreign" }
    }
}

//! Error types for symbolic expression operations.

use thiserror::Error;

/// Errors that can occur while building or evaluating expressions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// The input has no exact symbolic interpretation (e.g. a NaN or
    /// infinite float, or a rational with a zero denominator).
    #[error("cannot interpret {value} as a symbolic expression")]
    NotSymbolic {
        /// Textual rendering of the rejected input.
        value: String,
    },

    /// Numeric evaluation reached a symbol with no bound value.
    #[error("no binding for symbol {symbol}")]
    Unbound {
        /// The unbound symbol, rendered as it displays.
        symbol: String,
    },

    /// Numeric evaluation left the real domain, e.g. a negative base raised
    /// to a fractional power or the logarithm of a negative number.
    #[error("{expr} does not evaluate to a real number")]
    NotReal {
        /// Textual rendering of the offending subexpression.
        expr: String,
    },
}

impl ExprError {
    /// Create a [`ExprError::NotSymbolic`] from any displayable input.
    #[must_use]
    pub fn not_symbolic(value: impl ToString) -> Self {
        Self::NotSymbolic {
            value: value.to_string(),
        }
    }
}

//! Parser error types.

use thiserror::Error;

/// Error type for parsing operations.
///
/// Errors are raised at the point of detection and abort the whole parse;
/// any partially built nodes are dropped on the way out. The variants carry
/// no source positions, matching the language's error model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token appeared where the grammar requires a different one.
    #[error("unexpected token")]
    UnexpectedToken,

    /// An integer literal does not fit in a signed 64-bit integer.
    #[error("integer literal out of range")]
    NotANumber,

    /// The current token cannot start an expression.
    #[error("token cannot start an expression")]
    NotAnExpression,
}

/// Result type alias for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

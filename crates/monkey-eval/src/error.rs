//! Evaluator error types.

use thiserror::Error;

/// Error type for evaluation.
///
/// Raised at the point of detection; evaluation aborts and the heap keeps
/// any orphaned allocations until the next collection or evaluator
/// teardown. The variants carry no source positions, matching the
/// language's error model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    /// An operator was applied to a value that does not support it.
    #[error("unknown operator")]
    UnknownOperator,

    /// An infix operator was applied to operands of different types.
    #[error("type mismatch")]
    TypeMismatch,

    /// A call's callee did not evaluate to a function.
    #[error("not a function")]
    NotAFunction,

    /// A call's argument count did not match the function's arity.
    #[error("wrong number of arguments")]
    FunctionArgumentMismatch,
}

/// Result type alias for evaluation.
pub type Result<T> = std::result::Result<T, EvalError>;

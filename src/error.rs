/// Lexing and parsing errors.
///
/// Defines all error types that can occur while turning source text into an
/// abstract syntax tree: unrecognized characters, unexpected tokens and a
/// premature end of input.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during interpretation, such as
/// division by zero or a procedure called with the wrong number of arguments.
pub mod runtime_error;
/// Semantic errors.
///
/// Contains the errors raised by the scope-aware analysis pass: duplicate
/// declarations, undeclared identifiers and unknown types.
pub mod semantic_error;

use thiserror::Error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use semantic_error::SemanticError;

/// Error kinds of the pipeline, one per failure category.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An unrecognized character.
    Lex,
    /// A token mismatch during parsing.
    Syntax,
    /// A re-declaration within the same scope.
    DuplicateSymbol,
    /// A reference to an unresolved identifier.
    UndeclaredSymbol,
    /// A declared type that does not resolve.
    TypeNotFound,
    /// A call whose argument count does not match the procedure.
    Arity,
    /// An arithmetic failure such as division by zero or overflow.
    Arithmetic,
    /// A violated interpreter invariant, or a program that recursed past the
    /// call stack limit.
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Lex => "LexError",
            Self::Syntax => "SyntaxError",
            Self::DuplicateSymbol => "DuplicateSymbolError",
            Self::UndeclaredSymbol => "UndeclaredSymbolError",
            Self::TypeNotFound => "TypeNotFoundError",
            Self::Arity => "ArityError",
            Self::Arithmetic => "ArithmeticError",
            Self::Internal => "InternalError",
        };
        write!(f, "{name}")
    }
}

/// Any error produced by one of the pipeline stages.
///
/// Each stage fails fast, so a pipeline run yields at most one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Lexing or parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Semantic analysis rejected the unit.
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    /// Interpretation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Classifies the error.
    ///
    /// # Example
    /// ```
    /// use pasci::error::ErrorKind;
    ///
    /// let err = pasci::evaluate("7 / 0").unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Arithmetic);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(e) if e.is_lexical() => ErrorKind::Lex,
            Self::Parse(_) => ErrorKind::Syntax,
            Self::Semantic(SemanticError::DuplicateSymbol { .. }) => ErrorKind::DuplicateSymbol,
            Self::Semantic(SemanticError::UndeclaredSymbol { .. }) => ErrorKind::UndeclaredSymbol,
            Self::Semantic(SemanticError::TypeNotFound { .. }) => ErrorKind::TypeNotFound,
            Self::Runtime(RuntimeError::ArgumentCountMismatch { .. }) => ErrorKind::Arity,
            Self::Runtime(RuntimeError::DivisionByZero { .. }
                          | RuntimeError::Overflow { .. }
                          | RuntimeError::ExpectedInteger { .. }) => ErrorKind::Arithmetic,
            Self::Runtime(RuntimeError::UnboundName { .. }
                          | RuntimeError::RecursionLimit { .. }) => ErrorKind::Internal,
        }
    }
}

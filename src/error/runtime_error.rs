use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during evaluation.
///
/// Any runtime error unwinds the whole interpretation; every frame pushed on
/// the way down is popped before the error reaches the caller.
pub enum RuntimeError {
    /// A procedure was called with the wrong number of arguments.
    #[error("Error on line {line}: Procedure '{name}' expects {expected} argument(s), but {found} were given.")]
    ArgumentCountMismatch {
        /// The called procedure.
        name:     String,
        /// The number of declared parameters.
        expected: usize,
        /// The number of supplied arguments.
        found:    usize,
        /// The source line of the call.
        line:     usize,
    },
    /// Attempted division by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Arithmetic operation overflowed.
    #[error("Error on line {line}: Integer overflow while trying to compute result.")]
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An arithmetic operator received a boolean operand.
    #[error("Error on line {line}: Expected integer, found {found}.")]
    ExpectedInteger {
        /// The value that was found instead.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A name could not be resolved at runtime.
    ///
    /// Semantic analysis rules this out for every validated unit, so seeing it
    /// means the analyzer and the interpreter disagree about scoping.
    #[error("Error on line {line}: Internal error: '{name}' is not bound in any enclosing frame.")]
    UnboundName {
        /// The unresolved name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Procedure calls nested deeper than the call stack allows.
    #[error("Error on line {line}: Call to '{name}' exceeds the limit of {limit} nested calls.")]
    RecursionLimit {
        /// The procedure whose call was refused.
        name:  String,
        /// The deepest accepted call stack.
        limit: usize,
        /// The source line of the call.
        line:  usize,
    },
}

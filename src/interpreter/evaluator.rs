/// Core evaluation logic.
///
/// Contains the interpreter that executes statements and evaluates
/// expressions against the call stack.
pub mod core;

/// Activation records and the runtime call stack.
///
/// Frames link to their lexically enclosing frame, which is how nested
/// procedures reach the variables of the procedures that declare them.
pub mod call_stack;

/// Procedure calls.
///
/// Resolves the callee, binds arguments to parameters and runs the body in a
/// fresh frame.
pub mod procedure;

/// The analysis pass.
///
/// Walks the tree once, opening a scope for the program and for every
/// procedure, and rejects duplicate declarations, undeclared references and
/// unknown types.
pub mod core;

/// Scoped symbol tables and the chain that links them.
pub mod scope;

/// Symbols and the procedure signatures kept for the interpreter.
pub mod symbol;

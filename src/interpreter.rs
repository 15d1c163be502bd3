/// Scope-aware checking of parsed programs.
///
/// The analyzer runs between parsing and interpretation. It builds one symbol
/// table per scope, rejects duplicate and undeclared names, and keeps the
/// procedure signatures the evaluator needs.
///
/// # Responsibilities
/// - Opens a scope for the program and for every procedure.
/// - Resolves every variable, type and procedure reference.
/// - Records each procedure's parameters, body and static level.
pub mod analyzer;
/// The evaluator module executes analyzed programs.
///
/// The evaluator walks the tree, evaluates expressions, and runs statements
/// and procedure calls on a call stack of activation records. Variable
/// access follows the program's lexical nesting.
///
/// # Responsibilities
/// - Executes statements and evaluates integer arithmetic.
/// - Pushes and pops one frame per program and per procedure invocation.
/// - Reports runtime errors such as division by zero or a wrong argument
///   count.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// tagged with the line it starts on. Keywords are case-insensitive, comments
/// in braces are skipped. This is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line numbers.
/// - Reports lexical errors for unrecognized characters and oversized
///   literals.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// A recursive-descent parser with one token of lookahead. Each grammar rule
/// is a free function over a peekable token iterator.
///
/// # Responsibilities
/// - Converts tokens into programs, blocks, statements and expressions.
/// - Reports the first syntax error with its line; there is no recovery.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
pub mod value;

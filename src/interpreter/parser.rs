/// Parser entry points.
///
/// Contains the whole-unit and expression-only entry points, the expression
/// rule, and the shared `ParseResult` alias.
pub mod core;

/// Unary prefix parsing.
///
/// Parses factors: literals, variables, parenthesized expressions and the
/// `+`/`-` prefixes that bind tighter than any binary operator.
pub mod unary;

/// Binary operator parsing.
///
/// Implements the `expr` and `term` levels of the grammar, which encode
/// operator precedence.
pub mod binary;

/// Block and declaration parsing.
///
/// Parses `VAR` sections, procedure declarations with their formal
/// parameters, and the blocks that contain them.
pub mod block;

/// Utility functions for the parser.
///
/// Provides `expect`, identifier parsing and comma-separated lists.
pub(crate) mod utils;

/// Statement parsing.
///
/// Implements compound statements, assignments, procedure calls and
/// conditionals.
pub mod statement;

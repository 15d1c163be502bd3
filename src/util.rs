/// Checked integer arithmetic.
///
/// This module provides the arithmetic used by the evaluator: operations
/// that report division by zero and overflow instead of panicking or
/// wrapping, and the floor division that `/` denotes.
pub mod num;

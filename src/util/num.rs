use crate::{ast::BinaryOperator, error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Integer division rounding toward negative infinity.
///
/// Returns `None` when the divisor is zero or the quotient overflows
/// (`i64::MIN / -1`).
///
/// ## Example
/// ```
/// use pasci::util::num::floor_div;
///
/// assert_eq!(floor_div(7, 2), Some(3));
/// assert_eq!(floor_div(-7, 2), Some(-4));
/// assert_eq!(floor_div(7, -2), Some(-4));
/// assert_eq!(floor_div(-8, 2), Some(-4));
/// assert_eq!(floor_div(1, 0), None);
/// ```
#[must_use]
pub const fn floor_div(dividend: i64, divisor: i64) -> Option<i64> {
    let Some(quotient) = dividend.checked_div(divisor) else {
        return None;
    };
    if dividend % divisor != 0 && ((dividend < 0) != (divisor < 0)) {
        return Some(quotient - 1);
    }
    Some(quotient)
}

/// Applies an arithmetic operator to two integers without silent wrapping.
///
/// ## Errors
/// - `RuntimeError::DivisionByZero` for a zero divisor.
/// - `RuntimeError::Overflow` if the result does not fit into an `i64`.
///
/// ## Example
/// ```
/// use pasci::{ast::BinaryOperator, error::RuntimeError, util::num::checked_arithmetic};
///
/// assert_eq!(checked_arithmetic(BinaryOperator::Mul, 6, 7, 1).unwrap(), 42);
/// assert_eq!(checked_arithmetic(BinaryOperator::Div, 1, 0, 3).unwrap_err(),
///            RuntimeError::DivisionByZero { line: 3 });
/// assert_eq!(checked_arithmetic(BinaryOperator::Add, i64::MAX, 1, 4).unwrap_err(),
///            RuntimeError::Overflow { line: 4 });
/// ```
pub fn checked_arithmetic(op: BinaryOperator,
                          left: i64,
                          right: i64,
                          line: usize)
                          -> EvalResult<i64> {
    let result = match op {
        BinaryOperator::Add => left.checked_add(right),
        BinaryOperator::Sub => left.checked_sub(right),
        BinaryOperator::Mul => left.checked_mul(right),
        BinaryOperator::Div => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            floor_div(left, right)
        },
    };
    match result {
        Some(value) => Ok(value),
        None => Err(RuntimeError::Overflow { line }),
    }
}

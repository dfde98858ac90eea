use crate::{
    ast::{ArithmeticOperator, Position, RelationalOperator},
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
};

/// Evaluates an arithmetic operation on two integers.
///
/// Division truncates toward zero, so `7 / 2` is `3` and `-7 / 2` is `-3`.
/// Results that do not fit in an `i64` are errors rather than wrapping.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `position`: Position of the operator, for error reporting.
///
/// # Returns
/// The computed value.
///
/// # Errors
/// - `DivisionByZero` if `op` is `Div` and `right` is 0.
/// - `IntegerOverflow` if the result is out of range, including
///   `i64::MIN / -1`.
///
/// # Example
/// ```
/// use hansen::{
///     ast::{ArithmeticOperator, Position},
///     interpreter::evaluator::binary::eval_arithmetic,
/// };
///
/// let position = Position::new(1, 1);
///
/// assert_eq!(eval_arithmetic(ArithmeticOperator::Div, -7, 2, position).unwrap(), -3);
/// assert!(eval_arithmetic(ArithmeticOperator::Div, 1, 0, position).is_err());
/// assert!(eval_arithmetic(ArithmeticOperator::Mul, i64::MAX, 2, position).is_err());
/// ```
pub fn eval_arithmetic(op: ArithmeticOperator,
                       left: i64,
                       right: i64,
                       position: Position)
                       -> EvalResult<i64> {
    use ArithmeticOperator::{Add, Div, Mul, Sub};

    let result = match op {
        Add => left.checked_add(right),
        Sub => left.checked_sub(right),
        Mul => left.checked_mul(right),
        Div => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero { position });
            }
            left.checked_div(right)
        },
    };

    result.ok_or(RuntimeError::IntegerOverflow { op,
                                                 left,
                                                 right,
                                                 position })
}

/// Decides whether `left op right` holds.
///
/// # Example
/// ```
/// use hansen::{ast::RelationalOperator, interpreter::evaluator::binary::eval_comparison};
///
/// assert!(eval_comparison(RelationalOperator::NotEqual, 3, 4));
/// assert!(!eval_comparison(RelationalOperator::GreaterEqual, 3, 4));
/// ```
#[must_use]
pub const fn eval_comparison(op: RelationalOperator, left: i64, right: i64) -> bool {
    use RelationalOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

    match op {
        Less => left < right,
        Greater => left > right,
        LessEqual => left <= right,
        GreaterEqual => left >= right,
        Equal => left == right,
        NotEqual => left != right,
    }
}

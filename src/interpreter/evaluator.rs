/// Arithmetic and comparison operators.
///
/// Applies an `ArithmeticOperator` to two integers with overflow checks, and
/// evaluates the relational operators used by conditions.
pub mod binary;

/// Core evaluation logic and context management.
///
/// Contains the runtime context, statement execution and expression
/// evaluation.
pub mod core;

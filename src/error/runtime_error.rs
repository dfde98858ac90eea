use crate::ast::{ArithmeticOperator, Position};

#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// Attempted division by zero.
    DivisionByZero {
        /// Position of the `/` operator.
        position: Position,
    },
    /// An arithmetic result does not fit in a 64-bit signed integer.
    IntegerOverflow {
        /// The operation that overflowed.
        op:       ArithmeticOperator,
        /// Left operand.
        left:     i64,
        /// Right operand.
        right:    i64,
        /// Position of the operator.
        position: Position,
    },
    /// A variable has no cell in the symbol table.
    ///
    /// The checker rules this out; it can only happen when a program is
    /// evaluated against a table built for a different program.
    UnknownVariable {
        /// The name of the variable.
        name:     String,
        /// Where the reference occurs.
        position: Position,
    },
    /// Writing program output failed.
    Output {
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero { position: Position { line, column } } => {
                write!(f, "Error on line {line}, column {column}: Division by zero.")
            },
            Self::IntegerOverflow { op,
                                    left,
                                    right,
                                    position: Position { line, column }, } => write!(f,
                                                                                      "Error on line {line}, column {column}: Integer overflow while computing {left} {op} {right}."),
            Self::UnknownVariable { name,
                                    position: Position { line, column }, } => write!(f,
                                                                                      "Error on line {line}, column {column}: Unknown variable '{name}'."),
            Self::Output { source } => write!(f, "Error writing program output: {source}."),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Output { source } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(source: std::io::Error) -> Self {
        Self::Output { source }
    }
}

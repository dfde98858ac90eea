use crate::ast::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while emitting assembly.
pub enum CodegenError {
    /// An integer literal does not fit in a 32-bit register.
    LiteralOutOfRange {
        /// The literal value.
        value:    i64,
        /// Where the literal starts.
        position: Position,
    },
    /// The program declares more variables than one stack frame can address.
    TooManyVariables {
        /// Number of declared variables.
        count: usize,
    },
    /// A variable has no stack slot in the symbol table.
    UnknownVariable {
        /// The name of the variable.
        name:     String,
        /// Where the reference occurs.
        position: Position,
    },
}

impl std::fmt::Display for CodegenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LiteralOutOfRange { value,
                                      position: Position { line, column }, } => write!(f,
                                                                                        "Error on line {line}, column {column}: Literal {value} does not fit in a 32-bit register."),
            Self::TooManyVariables { count } => {
                write!(f, "Error: {count} variables do not fit in one stack frame.")
            },
            Self::UnknownVariable { name,
                                    position: Position { line, column }, } => write!(f,
                                                                                      "Error on line {line}, column {column}: Variable '{name}' has no stack slot."),
        }
    }
}

impl std::error::Error for CodegenError {}

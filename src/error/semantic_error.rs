use crate::ast::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors the semantic checker can report.
pub enum SemanticError {
    /// A variable was referenced before any declaration of it.
    Undeclared {
        /// The name of the variable.
        name:     String,
        /// Where the reference occurs.
        position: Position,
    },
    /// A variable was declared a second time.
    Redeclared {
        /// The name of the variable.
        name:     String,
        /// Where the second declaration occurs.
        position: Position,
        /// Where the first declaration occurs.
        previous: Position,
    },
}

impl SemanticError {
    /// The variable the error is about.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Undeclared { name, .. } | Self::Redeclared { name, .. } => name,
        }
    }
}

impl std::fmt::Display for SemanticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undeclared { name,
                               position: Position { line, column }, } => write!(f,
                                                                                 "Error on line {line}, column {column}: Variable '{name}' is not declared."),
            Self::Redeclared { name,
                               position: Position { line, column },
                               previous, } => write!(f,
                                                     "Error on line {line}, column {column}: Variable '{name}' is already declared on {previous}."),
        }
    }
}

impl std::error::Error for SemanticError {}

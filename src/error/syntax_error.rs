use crate::ast::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while parsing a token stream.
///
/// Parsing halts at the first token that does not fit the grammar; there is
/// no recovery.
pub enum SyntaxError {
    /// Found a token that is not allowed at this point.
    UnexpectedToken {
        /// Descriptions of the tokens that would have been accepted.
        expected: &'static [&'static str],
        /// Description of the token encountered.
        found:    String,
        /// Where the token starts.
        position: Position,
    },
    /// Reached the end of input while more tokens were required.
    UnexpectedEndOfInput {
        /// Descriptions of the tokens that would have been accepted.
        expected: &'static [&'static str],
    },
}

impl SyntaxError {
    /// The tokens that would have been accepted.
    #[must_use]
    pub const fn expected(&self) -> &'static [&'static str] {
        match self {
            Self::UnexpectedToken { expected, .. } | Self::UnexpectedEndOfInput { expected } => {
                expected
            },
        }
    }

    /// Gets the source position of `self`, if the error did not occur at the
    /// end of input.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        match self {
            Self::UnexpectedToken { position, .. } => Some(*position),
            Self::UnexpectedEndOfInput { .. } => None,
        }
    }
}

/// Joins token descriptions as `a`, `a or b`, or `a, b or c`.
fn describe_expected(expected: &[&str]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} or {last}", init.join(", ")),
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected,
                                    found,
                                    position: Position { line, column }, } => write!(f,
                                                                                      "Error on line {line}, column {column}: Expected {}, found {found}.",
                                                                                      describe_expected(expected)),
            Self::UnexpectedEndOfInput { expected } => write!(f,
                                                              "Error at end of input: Expected {}.",
                                                              describe_expected(expected)),
        }
    }
}

impl std::error::Error for SyntaxError {}

use crate::ast::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while tokenizing source text.
pub enum LexError {
    /// A character that cannot start any token, such as `#`.
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Where it was found.
        position:  Position,
    },
    /// A `"` without a matching closing quote.
    UnterminatedString {
        /// Position of the opening quote.
        position: Position,
    },
    /// A `{` without a matching `}`.
    UnterminatedComment {
        /// Position of the opening brace.
        position: Position,
    },
    /// An integer literal outside the 64-bit signed range.
    LiteralTooLarge {
        /// The digits as written.
        literal:  String,
        /// Where the literal starts.
        position: Position,
    },
}

impl LexError {
    /// Gets the source position of `self`.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::InvalidCharacter { position, .. }
            | Self::UnterminatedString { position }
            | Self::UnterminatedComment { position }
            | Self::LiteralTooLarge { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Position { line, column } = self.position();
        match self {
            Self::InvalidCharacter { character, .. } => write!(f,
                                                               "Error on line {line}, column {column}: Unexpected character {character:?}."),
            Self::UnterminatedString { .. } => write!(f,
                                                      "Error on line {line}, column {column}: String literal is never closed."),
            Self::UnterminatedComment { .. } => {
                write!(f, "Error on line {line}, column {column}: Comment is never closed.")
            },
            Self::LiteralTooLarge { literal, .. } => write!(f,
                                                            "Error on line {line}, column {column}: Literal {literal} is too large."),
        }
    }
}

impl std::error::Error for LexError {}

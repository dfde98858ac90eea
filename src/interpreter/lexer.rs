use std::fmt;

use logos::Logos;

use crate::{ast::Position, error::LexError};

/// Result type used by the lexer.
pub type LexResult<T> = Result<T, LexError>;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexErrorKind)]
pub enum Token {
    /// `begin`
    #[token("begin")]
    Begin,
    /// `end`
    #[token("end")]
    End,
    /// `variable`
    #[token("variable")]
    Variable,
    /// `print`
    #[token("print")]
    Print,
    /// `while`
    #[token("while")]
    While,
    /// `do`
    #[token("do")]
    Do,
    /// `if`
    #[token("if")]
    If,
    /// `then`
    #[token("then")]
    Then,
    /// `else`
    #[token("else")]
    Else,
    /// Identifier tokens; variable names such as `a` or `fib_1`.
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// Integer literal tokens, such as `42`. There is no sign.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal tokens, such as `"the gcd is "`, with `\n` decoded.
    #[regex(r#""[^"]*""#, parse_string)]
    Str(String),
    /// `:=`
    #[token(":=")]
    Assign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<>`
    #[token("<>")]
    NotEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `=`
    #[token("=")]
    Equals,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{ Comments, possibly spanning lines. }`
    #[regex(r"\{[^}]*\}", |lex| {
        track_newlines(lex);
        logos::Skip
    })]
    Comment,
    /// Line breaks.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, feeds and carriage returns.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

impl Token {
    /// Describes the token for diagnostics and token dumps.
    ///
    /// Keywords, operators and punctuation are quoted; literals and
    /// identifiers are named by kind followed by their value.
    ///
    /// # Example
    /// ```
    /// use hansen::interpreter::lexer::Token;
    ///
    /// assert_eq!(Token::Assign.describe(), "':='");
    /// assert_eq!(Token::Identifier("po".into()).describe(), "identifier 'po'");
    /// ```
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Identifier(name) => format!("identifier '{name}'"),
            Self::Integer(value) => format!("integer literal {value}"),
            Self::Str(text) => format!("string literal {text:?}"),
            other => format!("'{}'", other.lexeme()),
        }
    }

    /// The fixed spelling of keywords, operators and punctuation.
    ///
    /// Tokens with a payload return a generic name for their kind.
    #[must_use]
    pub const fn lexeme(&self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::End => "end",
            Self::Variable => "variable",
            Self::Print => "print",
            Self::While => "while",
            Self::Do => "do",
            Self::If => "if",
            Self::Then => "then",
            Self::Else => "else",
            Self::Identifier(_) => "identifier",
            Self::Integer(_) => "integer literal",
            Self::Str(_) => "string literal",
            Self::Assign => ":=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::NotEqual => "<>",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Equals => "=",
            Self::Semicolon => ";",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Comment => "comment",
            Self::NewLine => "newline",
            Self::Ignored => "whitespace",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and the byte offset where it starts, so that every
/// token can be given a line and column.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
    /// Line and line start in effect where the last token began, saved by
    /// callbacks that consume newlines.
    pub origin:     Option<(usize, usize)>,
}

/// Failure reported by a token callback, or by logos itself when no pattern
/// matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    /// No token pattern matches at this point.
    #[default]
    NoMatch,
    /// An integer literal does not fit in `i64`.
    LiteralTooLarge,
}

/// Parses an integer literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Ok(i64)`: The parsed value.
/// - `Err(LexErrorKind::LiteralTooLarge)`: If the digits overflow `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Result<i64, LexErrorKind> {
    lex.slice().parse().map_err(|_| LexErrorKind::LiteralTooLarge)
}

/// Decodes a string literal: strips the quotes and turns each two-character
/// `\n` escape into a newline. A literal may span lines, so line tracking is
/// updated as well.
fn parse_string(lex: &mut logos::Lexer<Token>) -> String {
    lex.extras.origin = Some((lex.extras.line, lex.extras.line_start));
    track_newlines(lex);
    let slice = lex.slice();

    slice[1..slice.len() - 1].replace("\\n", "\n")
}

/// Advances the line counter past any newlines inside the current token.
fn track_newlines(lex: &mut logos::Lexer<Token>) {
    let start = lex.span().start;
    let slice = lex.slice();

    let newlines = slice.matches('\n').count();
    if let Some(last) = slice.rfind('\n') {
        lex.extras.line += newlines;
        lex.extras.line_start = start + last + 1;
    }
}

/// Converts the byte offset of a token start into a 1-based line and column.
fn position_of(source: &str, extras: &mut LexerExtras, offset: usize) -> Position {
    let (line, line_start) = extras.origin
                                   .take()
                                   .unwrap_or((extras.line, extras.line_start));
    let column = source[line_start..offset].chars().count() + 1;

    Position::new(line, column)
}

/// Tokenizes a complete source text.
///
/// Whitespace and `{ ... }` comments are discarded. Each token is paired with
/// the position of its first character. Tokenizing stops at the first
/// character that cannot start a token.
///
/// # Errors
/// - `InvalidCharacter` for a stray character such as `#`.
/// - `UnterminatedString` / `UnterminatedComment` when a `"` or `{` is never
///   closed.
/// - `LiteralTooLarge` for integer literals outside the `i64` range.
///
/// # Example
/// ```
/// use hansen::{
///     ast::Position,
///     interpreter::lexer::{Token, tokenize},
/// };
///
/// let tokens = tokenize("begin { greet }\n  print \"hi\\n\"\nend").unwrap();
///
/// assert_eq!(tokens,
///            vec![(Token::Begin, Position::new(1, 1)),
///                 (Token::Print, Position::new(2, 3)),
///                 (Token::Str("hi\n".to_string()), Position::new(2, 9)),
///                 (Token::End, Position::new(3, 1)),]);
/// ```
pub fn tokenize(source: &str) -> LexResult<Vec<(Token, Position)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line:       1,
                                                                   line_start: 0,
                                                                   origin:     None, });

    while let Some(token) = lexer.next() {
        let start = lexer.span().start;
        let position = position_of(source, &mut lexer.extras, start);

        match token {
            Ok(tok) => tokens.push((tok, position)),
            Err(kind) => {
                let slice = lexer.slice();
                return Err(match kind {
                               LexErrorKind::LiteralTooLarge => {
                                   LexError::LiteralTooLarge { literal: slice.to_string(),
                                                               position }
                               },
                               LexErrorKind::NoMatch if slice.starts_with('"') => {
                                   LexError::UnterminatedString { position }
                               },
                               LexErrorKind::NoMatch if slice.starts_with('{') => {
                                   LexError::UnterminatedComment { position }
                               },
                               LexErrorKind::NoMatch => {
                                   LexError::InvalidCharacter { character: slice.chars()
                                                                                .next()
                                                                                .unwrap_or('\0'),
                                                                position }
                               },
                           });
            },
        }
    }

    tracing::debug!(count = tokens.len(), "tokenized source");

    Ok(tokens)
}

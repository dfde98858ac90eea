/// Lexical errors.
///
/// Raised while turning source text into tokens: characters that cannot start
/// a token, string literals or comments that never close, and integer
/// literals too large to represent.
pub mod lex_error;
/// Syntax errors.
///
/// Raised by the parser on the first token that does not fit the grammar. Each
/// error records the set of tokens that would have been accepted and the token
/// that was found instead.
pub mod syntax_error;
/// Semantic errors.
///
/// Raised by the checker when a variable is used before its declaration or
/// declared twice.
pub mod semantic_error;
/// Runtime errors.
///
/// Raised during evaluation: division by zero, integer overflow, and failures
/// writing program output.
pub mod runtime_error;
/// Code generation errors.
///
/// Raised when a checked program cannot be expressed on the 32-bit assembly
/// target.
pub mod codegen_error;

use std::fmt;

pub use codegen_error::CodegenError;
pub use lex_error::LexError;
pub use runtime_error::RuntimeError;
pub use semantic_error::SemanticError;
pub use syntax_error::SyntaxError;

/// Any failure of the pipeline, tagged with the stage that produced it.
///
/// Every stage stops at its first error, so a run produces at most one of
/// these. The CLI uses [`Error::exit_code`] to pick a process exit status.
#[derive(Debug)]
pub enum Error {
    /// The lexer rejected the source text.
    Lex(LexError),
    /// The parser rejected the token stream.
    Syntax(SyntaxError),
    /// The checker rejected the program.
    Semantic(SemanticError),
    /// Evaluation failed.
    Runtime(RuntimeError),
    /// Assembly could not be generated.
    Codegen(CodegenError),
}

impl Error {
    /// Short name of the failing stage, used as a prefix in diagnostics.
    ///
    /// ## Example
    /// ```
    /// use hansen::get_result;
    ///
    /// let err = get_result("begin x := 1 end").unwrap_err();
    /// assert_eq!(err.stage(), "semantic");
    /// ```
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Lex(_) => "lex",
            Self::Syntax(_) => "syntax",
            Self::Semantic(_) => "semantic",
            Self::Runtime(_) => "runtime",
            Self::Codegen(_) => "codegen",
        }
    }

    /// Process exit status for this failure.
    ///
    /// `1` is left for I/O failures outside the pipeline, such as an unreadable
    /// source file.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Lex(_) => 2,
            Self::Syntax(_) => 3,
            Self::Semantic(_) => 4,
            Self::Runtime(_) => 5,
            Self::Codegen(_) => 6,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "[{}] {e}", self.stage()),
            Self::Syntax(e) => write!(f, "[{}] {e}", self.stage()),
            Self::Semantic(e) => write!(f, "[{}] {e}", self.stage()),
            Self::Runtime(e) => write!(f, "[{}] {e}", self.stage()),
            Self::Codegen(e) => write!(f, "[{}] {e}", self.stage()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(e) => Some(e),
            Self::Syntax(e) => Some(e),
            Self::Semantic(e) => Some(e),
            Self::Runtime(e) => Some(e),
            Self::Codegen(e) => Some(e),
        }
    }
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl From<SyntaxError> for Error {
    fn from(e: SyntaxError) -> Self {
        Self::Syntax(e)
    }
}

impl From<SemanticError> for Error {
    fn from(e: SemanticError) -> Self {
        Self::Semantic(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}

impl From<CodegenError> for Error {
    fn from(e: CodegenError) -> Self {
        Self::Codegen(e)
    }
}

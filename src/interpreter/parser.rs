use crate::{ast::Position, interpreter::lexer::Token};

/// Program and statement-list parsing.
///
/// Contains the parser result type and the entry point that checks the outer
/// `begin ... end` and rejects anything after it.
pub mod core;

/// Expression and condition parsing.
///
/// Implements precedence climbing for `+ -` over `* /` and the single
/// relational comparison allowed in a condition.
pub mod binary;

/// Nested `begin ... end` blocks.
pub mod block;

/// Statement parsing: declarations, assignments, `if`, `while`, `print`.
pub mod statement;

/// Shared helpers: expecting a specific token, reading identifiers, and the
/// expected-token sets used in diagnostics.
pub mod utils;

/// Parses a token stream into a [`Program`](crate::ast::Program).
///
/// # Errors
/// Returns a `SyntaxError` at the first token that does not fit the grammar,
/// or when the input ends early.
///
/// # Example
/// ```
/// use hansen::{
///     ast::Statement,
///     interpreter::{lexer::tokenize, parser::parse},
/// };
///
/// let tokens = tokenize("begin variable a; a := 2 * (3 + 4) end").unwrap();
/// let program = parse(&tokens).unwrap();
///
/// assert_eq!(program.body.statements.len(), 2);
/// assert!(matches!(program.body.statements[1], Statement::Assignment { .. }));
/// ```
pub fn parse(tokens: &[(Token, Position)]) -> core::ParseResult<crate::ast::Program> {
    let mut iter = tokens.iter().peekable();
    let program = core::parse_program(&mut iter)?;

    tracing::debug!(statements = program.statement_count(), "parsed program");

    Ok(program)
}

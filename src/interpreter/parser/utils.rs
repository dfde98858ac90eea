use std::iter::Peekable;

use crate::{
    ast::{Position, PrintArgument, Statement},
    error::SyntaxError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Accepted at the very start of a program.
pub const PROGRAM_START: &[&str] = &["'begin'"];
/// Accepted after the closing `end` of the program.
pub const END_OF_INPUT: &[&str] = &["end of input"];
/// Accepted wherever a statement must start.
pub const STATEMENT_START: &[&str] =
    &["'variable'", "identifier", "'if'", "'while'", "'begin'", "'print'"];
/// Accepted after a statement that cannot grow any further.
pub const AFTER_STATEMENT: &[&str] = &["';'", "'end'"];
/// Accepted after an `if` without `else` whose branch cannot grow.
pub const AFTER_STATEMENT_OR_ELSE: &[&str] = &["'else'", "';'", "'end'"];
/// Accepted after a statement ending in an expression.
pub const AFTER_EXPRESSION: &[&str] = &["'+'", "'-'", "'*'", "'/'", "';'", "'end'"];
/// Accepted after an `if` without `else` whose branch ends in an expression.
pub const AFTER_EXPRESSION_OR_ELSE: &[&str] =
    &["'+'", "'-'", "'*'", "'/'", "'else'", "';'", "'end'"];
/// Accepted wherever an operand must start.
pub const FACTOR_START: &[&str] = &["integer literal", "identifier", "'('"];
/// Accepted after `print`.
pub const PRINT_ARGUMENT: &[&str] = &["string literal", "integer literal", "identifier", "'('"];
/// Accepted after the left-hand expression of a condition.
pub const AFTER_LEFT_OPERAND: &[&str] =
    &["'+'", "'-'", "'*'", "'/'", "'<'", "'>'", "'<='", "'>='", "'='", "'<>'"];
/// Accepted after a variable name at the start of a statement.
pub const ASSIGNMENT: &[&str] = &["':='"];
/// Accepted where a variable name is required.
pub const IDENTIFIER: &[&str] = &["identifier"];
/// Accepted after the condition of an `if`.
pub const AFTER_IF_CONDITION: &[&str] = &["'+'", "'-'", "'*'", "'/'", "'then'"];
/// Accepted after the condition of a `while`.
pub const AFTER_WHILE_CONDITION: &[&str] = &["'+'", "'-'", "'*'", "'/'", "'do'"];
/// Accepted after the expression inside parentheses.
pub const AFTER_PARENTHESIZED: &[&str] = &["'+'", "'-'", "'*'", "'/'", "')'"];

/// Picks the tokens that may follow `statement` inside a block.
///
/// A statement that ends in an expression may still be extended by an
/// arithmetic operator, and an `if` without `else` may still take one.
///
/// # Example
/// ```
/// use hansen::{
///     ast::{Expr, Position, Statement},
///     interpreter::parser::utils::{AFTER_EXPRESSION, after_statement},
/// };
///
/// let statement = Statement::Assignment { name:     "x".to_string(),
///                                         value:    Expr::Integer { value:    1,
///                                                                   position: Position::new(1, 6), },
///                                         position: Position::new(1, 1), };
///
/// assert_eq!(after_statement(&statement), AFTER_EXPRESSION);
/// ```
#[must_use]
pub fn after_statement(statement: &Statement) -> &'static [&'static str] {
    match (ends_with_expression(statement), takes_else(statement)) {
        (true, true) => AFTER_EXPRESSION_OR_ELSE,
        (true, false) => AFTER_EXPRESSION,
        (false, true) => AFTER_STATEMENT_OR_ELSE,
        (false, false) => AFTER_STATEMENT,
    }
}

/// Whether the last token of `statement` closes an expression.
fn ends_with_expression(statement: &Statement) -> bool {
    match statement {
        Statement::Assignment { .. } => true,
        Statement::Print { argument, .. } => matches!(argument, PrintArgument::Expr(_)),
        Statement::If { then_branch,
                        else_branch,
                        .. } => match else_branch {
            Some(else_branch) => ends_with_expression(else_branch),
            None => ends_with_expression(then_branch),
        },
        Statement::While { body, .. } => ends_with_expression(body),
        Statement::VariableDeclaration { .. } | Statement::Block(_) => false,
    }
}

/// Whether an `else` right after `statement` would still attach to an `if`.
fn takes_else(statement: &Statement) -> bool {
    match statement {
        Statement::If { else_branch: None, .. } => true,
        Statement::If { else_branch: Some(else_branch),
                        .. } => takes_else(else_branch),
        Statement::While { body, .. } => takes_else(body),
        _ => false,
    }
}

/// Builds the error for a token that is not allowed where it was found.
pub(in crate::interpreter::parser) fn unexpected(token: &Token,
                                                 position: Position,
                                                 expected: &'static [&'static str])
                                                 -> SyntaxError {
    SyntaxError::UnexpectedToken { expected,
                                   found: token.describe(),
                                   position }
}

/// Consumes the next token, which must equal `wanted`.
///
/// # Parameters
/// - `tokens`: Token iterator.
/// - `wanted`: The token that must come next.
/// - `expected`: How to describe the accepted tokens if it does not.
///
/// # Returns
/// The position of the consumed token.
///
/// # Errors
/// Returns a `SyntaxError` if the next token differs or the input has ended.
pub(in crate::interpreter::parser) fn expect_token<'a, I>(tokens: &mut Peekable<I>,
                                                          wanted: &Token,
                                                          expected: &'static [&'static str])
                                                          -> ParseResult<Position>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match tokens.next() {
        Some((tok, position)) if tok == wanted => Ok(*position),
        Some((tok, position)) => Err(unexpected(tok, *position, expected)),
        None => Err(SyntaxError::UnexpectedEndOfInput { expected }),
    }
}

/// Parses a plain identifier and returns its name and position.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at an identifier.
///
/// # Errors
/// Returns a `SyntaxError` if:
/// - the next token is not an identifier (keywords are not identifiers),
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, Position)>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match tokens.next() {
        Some((Token::Identifier(name), position)) => Ok((name.clone(), *position)),
        Some((tok, position)) => Err(unexpected(tok, *position, IDENTIFIER)),
        None => Err(SyntaxError::UnexpectedEndOfInput { expected: IDENTIFIER }),
    }
}

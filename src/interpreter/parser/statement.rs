use std::iter::Peekable;

use crate::{
    ast::{Position, PrintArgument, Statement},
    error::SyntaxError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::{parse_condition, parse_expression},
            block::parse_block,
            core::ParseResult,
            utils::{
                AFTER_IF_CONDITION,
                AFTER_WHILE_CONDITION,
                ASSIGNMENT,
                PRINT_ARGUMENT,
                STATEMENT_START,
                expect_token,
                parse_identifier,
                unexpected,
            },
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a variable declaration (`variable x`),
/// - an assignment (`x := expr`),
/// - an `if` statement,
/// - a `while` loop,
/// - a nested `begin ... end` block,
/// - a `print` statement.
///
/// The leading token decides which; there is no backtracking.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, Position)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
///
/// # Errors
/// Returns a `SyntaxError` listing every token that may start a statement if
/// the next token is none of them.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let Some((token, position)) = tokens.next() else {
        return Err(SyntaxError::UnexpectedEndOfInput { expected: STATEMENT_START });
    };
    let position = *position;

    match token {
        Token::Variable => {
            let (name, position) = parse_identifier(tokens)?;
            Ok(Statement::VariableDeclaration { name, position })
        },
        Token::Identifier(name) => parse_assignment(tokens, name.clone(), position),
        Token::If => parse_if(tokens, position),
        Token::While => parse_while(tokens, position),
        Token::Begin => Ok(Statement::Block(parse_block(tokens, position)?)),
        Token::Print => parse_print(tokens, position),
        other => Err(unexpected(other, position, STATEMENT_START)),
    }
}

/// Parses the rest of an assignment once the target name has been read.
///
/// Syntax: `<identifier> := <expression>`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the target name.
/// - `name`: The target variable.
/// - `position`: Position of the target name.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>,
                           name: String,
                           position: Position)
                           -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)>
{
    expect_token(tokens, &Token::Assign, ASSIGNMENT)?;
    let value = parse_expression(tokens)?;

    Ok(Statement::Assignment { name,
                               value,
                               position })
}

/// Parses an `if` statement with an optional `else`.
///
/// Syntax:
/// ```text
///     if <condition> then <statement>
///     if <condition> then <statement> else <statement>
/// ```
/// Each branch is a single statement; a `begin ... end` block is needed for
/// more. An `else` always belongs to the innermost `if` still waiting for
/// one, because the recursive call for the `then` branch sees it first.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
/// - `position`: Position of the `if` token.
///
/// # Returns
/// A `Statement::If` node.
fn parse_if<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let condition = parse_condition(tokens)?;
    expect_token(tokens, &Token::Then, AFTER_IF_CONDITION)?;
    let then_branch = parse_statement(tokens)?;

    let else_branch = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        Some(Box::new(parse_statement(tokens)?))
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch: Box::new(then_branch),
                       else_branch,
                       position })
}

/// Parses a `while` loop.
///
/// Syntax: `while <condition> do <statement>`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `while` keyword.
/// - `position`: Position of the `while` token.
fn parse_while<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let condition = parse_condition(tokens)?;
    expect_token(tokens, &Token::Do, AFTER_WHILE_CONDITION)?;
    let body = parse_statement(tokens)?;

    Ok(Statement::While { condition,
                          body: Box::new(body),
                          position })
}

/// Parses a `print` statement.
///
/// The argument is either a string literal, printed verbatim, or an
/// arithmetic expression, printed in base 10.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `print` keyword.
/// - `position`: Position of the `print` token.
fn parse_print<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let argument = match tokens.peek() {
        Some((Token::Str(text), _)) => {
            let text = text.clone();
            tokens.next();
            PrintArgument::Text(text)
        },
        Some((Token::Integer(_) | Token::Identifier(_) | Token::LParen, _)) => {
            PrintArgument::Expr(parse_expression(tokens)?)
        },
        Some((tok, position)) => return Err(unexpected(tok, *position, PRINT_ARGUMENT)),
        None => return Err(SyntaxError::UnexpectedEndOfInput { expected: PRINT_ARGUMENT }),
    };

    Ok(Statement::Print { argument, position })
}

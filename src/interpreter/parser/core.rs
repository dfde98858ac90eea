use std::iter::Peekable;

use crate::{
    ast::{Block, Position, Program, Statement},
    error::SyntaxError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            statement::parse_statement,
            utils::{END_OF_INPUT, PROGRAM_START, expect_token, unexpected},
        },
    },
};

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Parses a whole program.
///
/// A program is a single `begin ... end` block. Any token left after the
/// closing `end` is an error, but comments after it are fine since the lexer
/// has already dropped them.
///
/// Grammar: `program := "begin" statement_list "end"`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Position)` pairs.
///
/// # Returns
/// The parsed [`Program`].
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Program>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let position = expect_token(tokens, &Token::Begin, PROGRAM_START)?;
    let body: Block = parse_block(tokens, position)?;

    if let Some((tok, position)) = tokens.next() {
        return Err(unexpected(tok, *position, END_OF_INPUT));
    }

    Ok(Program { body })
}

/// Parses one or more statements separated by `;`.
///
/// There is no separator after the last statement, so `x := 1; end` fails
/// when the parser looks for a statement after the `;` and finds `end`.
///
/// Grammar: `statement_list := statement (";" statement)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first statement.
///
/// # Returns
/// The statements in source order.
pub fn parse_statement_list<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let mut statements = vec![parse_statement(tokens)?];

    while let Some((Token::Semicolon, _)) = tokens.peek() {
        tokens.next();
        statements.push(parse_statement(tokens)?);
    }

    Ok(statements)
}

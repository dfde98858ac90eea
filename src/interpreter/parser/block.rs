use std::iter::Peekable;

use crate::{
    ast::{Block, Position},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_statement_list},
            utils::{AFTER_STATEMENT, after_statement, expect_token},
        },
    },
};

/// Parses a block delimited by `begin` and `end`.
///
/// The statement list inside must be non-empty. If the token after the last
/// statement cannot continue the block, the error names every token that
/// could have: `;` and `end`, plus the arithmetic operators when the
/// statement ends in an expression and `else` when it ends in an open `if`.
///
/// Grammar: `block := "begin" statement_list "end"`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `begin` keyword.
/// - `position`: Position of the `begin` keyword.
///
/// # Returns
/// A [`Block`] containing all parsed statements.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Block>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let statements = parse_statement_list(tokens)?;
    let expected = statements.last().map_or(AFTER_STATEMENT, after_statement);
    expect_token(tokens, &Token::End, expected)?;

    Ok(Block { statements,
               position })
}

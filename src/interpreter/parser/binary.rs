use std::iter::Peekable;

use crate::{
    ast::{ArithmeticOperator, Condition, Expr, Position, RelationalOperator},
    error::SyntaxError,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            utils::{AFTER_LEFT_OPERAND, AFTER_PARENTHESIZED, FACTOR_START, expect_token, unexpected},
        },
    },
};

/// Parses a full arithmetic expression.
///
/// Handles left-associative binary operators: `+` and `-`, so `8 - 3 - 2`
/// parses as `(8 - 3) - 2`.
///
/// The rule is: `expression := term (("+" | "-") term)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let mut left = parse_term(tokens)?;
    loop {
        if let Some((token, position)) = tokens.peek()
           && let Some(op) = token_to_arithmetic_operator(token)
           && matches!(op, ArithmeticOperator::Add | ArithmeticOperator::Sub)
        {
            let position = *position;
            tokens.next();
            let right = parse_term(tokens)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    position };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators `*` and `/`, which bind tighter than
/// `+` and `-`.
///
/// The rule is: `term := factor (("*" | "/") factor)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
///
/// # Returns
/// A binary expression tree combining factor-level nodes.
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let mut left = parse_factor(tokens)?;
    loop {
        if let Some((token, position)) = tokens.peek()
           && let Some(op) = token_to_arithmetic_operator(token)
           && matches!(op, ArithmeticOperator::Mul | ArithmeticOperator::Div)
        {
            let position = *position;
            tokens.next();
            let right = parse_factor(tokens)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    position };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses an operand: an integer literal, a variable, or a parenthesized
/// expression. There is no unary minus; negative values are written as
/// `0 - n`.
///
/// The rule is: `factor := integer | identifier | "(" expression ")"`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
///
/// # Returns
/// The operand expression.
///
/// # Errors
/// Returns a `SyntaxError` naming the three accepted operand forms if the
/// next token starts none of them.
pub fn parse_factor<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match tokens.next() {
        Some((Token::Integer(value), position)) => Ok(Expr::Integer { value:    *value,
                                                                      position: *position, }),
        Some((Token::Identifier(name), position)) => Ok(Expr::Variable { name:     name.clone(),
                                                                         position: *position, }),
        Some((Token::LParen, _)) => {
            let expr = parse_expression(tokens)?;
            expect_token(tokens, &Token::RParen, AFTER_PARENTHESIZED)?;
            Ok(expr)
        },
        Some((tok, position)) => Err(unexpected(tok, *position, FACTOR_START)),
        None => Err(SyntaxError::UnexpectedEndOfInput { expected: FACTOR_START }),
    }
}

/// Parses the condition of an `if` or `while`.
///
/// Exactly one relational operator is allowed, between two arithmetic
/// expressions. Comparisons cannot be nested inside arithmetic. When the
/// left-hand expression is followed by anything else, the error lists the
/// arithmetic operators too, since they would have extended it.
///
/// The rule is: `condition := expression relop expression`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the left-hand expression.
///
/// # Returns
/// The parsed [`Condition`].
pub fn parse_condition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Condition>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let left = parse_expression(tokens)?;

    let (op, position) = match tokens.next() {
        Some((tok, position)) => match token_to_relational_operator(tok) {
            Some(op) => (op, *position),
            None => return Err(unexpected(tok, *position, AFTER_LEFT_OPERAND)),
        },
        None => {
            return Err(SyntaxError::UnexpectedEndOfInput { expected: AFTER_LEFT_OPERAND });
        },
    };

    let right = parse_expression(tokens)?;

    Ok(Condition { left,
                   op,
                   right,
                   position })
}

/// Maps a token to its arithmetic operator.
///
/// Returns `Some(ArithmeticOperator)` when the token is one of `+ - * /`, and
/// `None` for all other tokens, comparisons included.
///
/// # Example
/// ```
/// use hansen::{
///     ast::ArithmeticOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_arithmetic_operator},
/// };
///
/// assert_eq!(token_to_arithmetic_operator(&Token::Star), Some(ArithmeticOperator::Mul));
/// assert_eq!(token_to_arithmetic_operator(&Token::Less), None);
/// ```
#[must_use]
pub const fn token_to_arithmetic_operator(token: &Token) -> Option<ArithmeticOperator> {
    match token {
        Token::Plus => Some(ArithmeticOperator::Add),
        Token::Minus => Some(ArithmeticOperator::Sub),
        Token::Star => Some(ArithmeticOperator::Mul),
        Token::Slash => Some(ArithmeticOperator::Div),
        _ => None,
    }
}

/// Maps a token to its relational operator.
///
/// # Example
/// ```
/// use hansen::{
///     ast::RelationalOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_relational_operator},
/// };
///
/// assert_eq!(token_to_relational_operator(&Token::NotEqual), Some(RelationalOperator::NotEqual));
/// assert_eq!(token_to_relational_operator(&Token::Assign), None);
/// assert_eq!(token_to_relational_operator(&Token::Plus), None);
/// ```
#[must_use]
pub const fn token_to_relational_operator(token: &Token) -> Option<RelationalOperator> {
    match token {
        Token::Less => Some(RelationalOperator::Less),
        Token::Greater => Some(RelationalOperator::Greater),
        Token::LessEqual => Some(RelationalOperator::LessEqual),
        Token::GreaterEqual => Some(RelationalOperator::GreaterEqual),
        Token::Equals => Some(RelationalOperator::Equal),
        Token::NotEqual => Some(RelationalOperator::NotEqual),
        _ => None,
    }
}

use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_factor},
    },
};

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `expr := term (("+" | "-") term)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
/// - `depth`: Nesting level of the enclosing construct.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_multiplicative(tokens, depth)?;
    while let Some((token, line)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
          && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
    {
        let line = *line;
        tokens.next();
        let right = parse_multiplicative(tokens, depth)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                line };
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators `*` and `/`.
///
/// The rule is: `term := factor (("*" | "/") factor)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_factor(tokens, depth)?;
    while let Some((token, line)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
          && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
    {
        let line = *line;
        tokens.next();
        let right = parse_factor(tokens, depth)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                line };
    }
    Ok(left)
}

/// Maps a token to its corresponding binary operator.
///
/// # Example
/// ```
/// use pasci::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Slash),
///            Some(BinaryOperator::Div));
/// assert_eq!(token_to_binary_operator(&Token::Assign), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        _ => None,
    }
}

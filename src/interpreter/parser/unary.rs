use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator, VariableRef},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, nested},
        },
    },
};

/// Parses a factor, the tightest-binding level of the expression grammar.
///
/// Grammar:
/// ```text
/// factor := ("+" | "-") factor
///         | INTEGER_CONST
///         | TRUE | FALSE
///         | "(" expr ")"
///         | variable
/// ```
///
/// Each prefix and each parenthesized expression is one nesting level
/// below `depth`.
///
/// # Errors
/// Returns a `ParseError` if the next token cannot start a factor, if a
/// parenthesized expression is not closed, or if the factor nests too deep.
pub fn parse_factor<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Plus, line)) => parse_prefixed(tokens, UnaryOperator::Plus, *line, depth),
        Some((Token::Minus, line)) => parse_prefixed(tokens, UnaryOperator::Negate, *line, depth),
        Some((Token::IntegerConst(value), line)) => Ok(Expr::Number { value: *value,
                                                                      line:  *line, }),
        Some((Token::Boolean(value), line)) => Ok(Expr::Boolean { value: *value,
                                                                  line:  *line, }),
        Some((Token::LParen, line)) => {
            let expr = parse_expression(tokens, nested(depth, *line)?)?;
            expect(tokens, &Token::RParen)?;
            Ok(expr)
        },
        Some((Token::Identifier(name), line)) => Ok(Expr::Variable(VariableRef { name: name.clone(),
                                                                                 line: *line, })),
        Some((tok, line)) => Err(ParseError::UnexpectedToken { expected: "expression".to_string(),
                                                               found:    tok.to_string(),
                                                               line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: "expression".to_string(),
                                                       line:     0, }),
    }
}

fn parse_prefixed<'a, I>(tokens: &mut Peekable<I>,
                         op: UnaryOperator,
                         line: usize,
                         depth: usize)
                         -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let operand = parse_factor(tokens, nested(depth, line)?)?;
    Ok(Expr::UnaryOp { op,
                       expr: Box::new(operand),
                       line })
}

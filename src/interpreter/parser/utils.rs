use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{MAX_NESTING, ParseResult},
    },
};

/// Steps one nesting level deeper.
///
/// # Errors
/// `ParseError::NestingTooDeep` once `depth` has reached [`MAX_NESTING`].
pub(in crate::interpreter::parser) const fn nested(depth: usize, line: usize) -> ParseResult<usize> {
    if depth >= MAX_NESTING {
        return Err(ParseError::NestingTooDeep { limit: MAX_NESTING,
                                                line });
    }
    Ok(depth + 1)
}

/// Consumes the next token if it is of the expected kind.
///
/// Payloads are ignored when comparing, so the function is meant for tokens
/// such as `;`, `BEGIN` or `:=`. Identifiers are consumed with
/// [`parse_identifier`] instead.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the token to check.
/// - `expected`: A token of the required kind.
///
/// # Returns
/// The line of the consumed token.
///
/// # Errors
/// Returns a `ParseError` naming the expected and the actual token kind if
/// they differ, or if the stream has ended.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, line)) if tok.same_kind(expected) => Ok(*line),
        Some((tok, line)) => Err(ParseError::UnexpectedToken { expected: format!("'{}'", expected.spelling()),
                                                               found:    tok.to_string(),
                                                               line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: format!("'{}'",
                                                                         expected.spelling()),
                                                       line:     0, }),
    }
}

/// Consumes the next token if it is of the given kind and reports whether it
/// did.
pub(in crate::interpreter::parser) fn eat_if<'a, I>(tokens: &mut Peekable<I>, kind: &Token) -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    if tokens.peek().is_some_and(|(tok, _)| tok.same_kind(kind)) {
        tokens.next();
        return true;
    }
    false
}

/// Returns `true` if the next token is of the given kind, without consuming.
pub(in crate::interpreter::parser) fn peek_is<'a, I>(tokens: &mut Peekable<I>, kind: &Token) -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.peek().is_some_and(|(tok, _)| tok.same_kind(kind))
}

/// Parses a plain identifier and returns its name and line.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token is not an identifier,
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, usize)>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(s), line)) => Ok((s.clone(), *line)),
        Some((tok, line)) => Err(ParseError::UnexpectedToken { expected: "identifier".to_string(),
                                                               found:    tok.to_string(),
                                                               line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: "identifier".to_string(),
                                                       line:     0, }),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// It repeatedly calls `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list. The
/// closing token is consumed.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if eat_if(tokens, closing) {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((tok, _)) if tok.same_kind(closing) => break,
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { expected: format!("',' or '{}'",
                                                                           closing.spelling()),
                                                         found:    tok.to_string(),
                                                         line:     *line, });
            },
            None => {
                return Err(ParseError::UnexpectedEndOfInput { expected: format!("',' or '{}'",
                                                                                closing.spelling()),
                                                              line:     0, });
            },
        }
    }
    Ok(items)
}

use std::iter::Peekable;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_additive,
            block::parse_block,
            utils::{expect, parse_identifier},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest nesting the parser accepts. Parentheses, unary prefixes, compound
/// statements, conditionals and procedure declarations each add one level.
pub const MAX_NESTING: usize = 128;

/// Parses a complete compilation unit.
///
/// Grammar: `program := PROGRAM ID ';' block '.'`
///
/// Nothing may follow the closing `.`.
///
/// # Parameters
/// - `tokens`: The token stream produced by
///   [`tokenize`](crate::interpreter::lexer::tokenize).
///
/// # Returns
/// The [`Program`] node owning the whole tree.
///
/// # Errors
/// Returns the first `ParseError` encountered; there is no recovery.
///
/// # Example
/// ```
/// use pasci::interpreter::{lexer::tokenize, parser::core::parse_program};
///
/// let tokens = tokenize("PROGRAM demo; VAR x : INTEGER; BEGIN x := 1 END.").unwrap();
/// let program = parse_program(&tokens).unwrap();
///
/// assert_eq!(program.name, "demo");
/// assert_eq!(program.block.declarations.len(), 1);
/// assert_eq!(program.block.statements.len(), 1);
/// ```
pub fn parse_program(tokens: &[(Token, usize)]) -> ParseResult<Program> {
    let mut iter = tokens.iter().peekable();
    let program = program_rule(&mut iter).map_err(|e| with_last_line(e, tokens))?;
    reject_trailing_tokens(&mut iter)?;
    Ok(program)
}

/// Parses a standalone arithmetic expression, such as `2 + 3 * 4`.
///
/// The whole token stream must form exactly one expression.
///
/// # Errors
/// Returns a `ParseError` if the tokens are not a single valid expression.
///
/// # Example
/// ```
/// use pasci::interpreter::{lexer::tokenize, parser::core::parse_expression_unit};
///
/// let tokens = tokenize("(2 + 3) * 4").unwrap();
/// assert!(parse_expression_unit(&tokens).is_ok());
///
/// let tokens = tokenize("(2 + 3").unwrap();
/// assert!(parse_expression_unit(&tokens).is_err());
/// ```
pub fn parse_expression_unit(tokens: &[(Token, usize)]) -> ParseResult<Expr> {
    let mut iter = tokens.iter().peekable();
    let expr = parse_expression(&mut iter, 0).map_err(|e| with_last_line(e, tokens))?;
    reject_trailing_tokens(&mut iter)?;
    Ok(expr)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. Precedence is encoded by
/// grammar level alone: `expr` is built from `term`s, which are built from
/// `factor`s, so unary prefixes bind tightest.
///
/// Grammar: `expr := term ((PLUS | MINUS) term)*`
///
/// `depth` is the nesting level of the surrounding construct, `0` at the top
/// of a unit.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_additive(tokens, depth)
}

fn program_rule<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Program>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Program)?;
    let (name, _) = parse_identifier(tokens)?;
    expect(tokens, &Token::Semicolon)?;
    let block = parse_block(tokens, 0)?;
    expect(tokens, &Token::Dot)?;

    Ok(Program { name, block, line })
}

fn reject_trailing_tokens<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, line)) => Err(ParseError::UnexpectedTrailingTokens { token: tok.to_string(),
                                                                        line:  *line, }),
        None => Ok(()),
    }
}

/// End-of-input errors are raised deep in the grammar, where the last line is
/// unknown; fill it in from the token stream.
fn with_last_line(error: ParseError, tokens: &[(Token, usize)]) -> ParseError {
    match error {
        ParseError::UnexpectedEndOfInput { expected, line: 0 } => {
            let line = tokens.last().map_or(1, |(_, line)| *line);
            ParseError::UnexpectedEndOfInput { expected, line }
        },
        other => other,
    }
}

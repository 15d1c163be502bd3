use std::iter::Peekable;

use crate::{
    ast::{Statement, VariableRef},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{eat_if, expect, nested, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a `BEGIN ... END` compound statement and returns its statements.
///
/// Grammar: `compound := BEGIN statement (";" statement)* END`
///
/// Empty statements are kept as [`Statement::NoOp`], so `BEGIN END` yields a
/// single no-op and a trailing `;` adds one. The statements sit one nesting
/// level below `depth`.
pub fn parse_compound_statement<'a, I>(tokens: &mut Peekable<I>,
                                       depth: usize)
                                       -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let depth = nested(depth, expect(tokens, &Token::Begin)?)?;

    let mut statements = vec![parse_statement(tokens, depth)?];
    while eat_if(tokens, &Token::Semicolon) {
        statements.push(parse_statement(tokens, depth)?);
    }

    expect(tokens, &Token::End)?;
    Ok(statements)
}

/// Parses a single statement.
///
/// A statement may be one of:
/// - a nested compound statement,
/// - a conditional,
/// - an assignment,
/// - a procedure call,
/// - nothing at all.
///
/// The choice is made on the current token. An identifier starts an
/// assignment when the following token is `:=`, and a call otherwise.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Begin, _)) => Ok(Statement::Compound(parse_compound_statement(tokens, depth)?)),
        Some((Token::If, _)) => parse_conditional(tokens, depth),
        Some((Token::Identifier(_), _)) => {
            let mut lookahead = tokens.clone();
            lookahead.next();
            if let Some((Token::Assign, _)) = lookahead.peek() {
                parse_assignment(tokens, depth)
            } else {
                parse_procedure_call(tokens, depth)
            }
        },
        _ => Ok(Statement::NoOp),
    }
}

/// Parses an assignment statement.
///
/// Grammar: `assignment := variable ":=" expr`
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = parse_identifier(tokens)?;
    expect(tokens, &Token::Assign)?;
    let value = parse_expression(tokens, depth)?;

    Ok(Statement::Assignment { target: VariableRef { name, line },
                               value,
                               line })
}

/// Parses a procedure call. The argument list may be omitted for procedures
/// without parameters.
///
/// Grammar: `proccall := ID ("(" (expr ("," expr)*)? ")")?`
fn parse_procedure_call<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = parse_identifier(tokens)?;
    let arguments = if eat_if(tokens, &Token::LParen) {
        parse_comma_separated(tokens, |tokens| parse_expression(tokens, depth), &Token::RParen)?
    } else {
        Vec::new()
    };

    Ok(Statement::ProcedureCall { name,
                                  arguments,
                                  line })
}

/// Parses an `IF` statement with an optional `ELSE` branch.
///
/// Grammar: `conditional := IF expr THEN statement (ELSE statement)?`
///
/// A dangling `ELSE` belongs to the nearest `IF`. Both branches sit one
/// nesting level below `depth`.
fn parse_conditional<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::If)?;
    let depth = nested(depth, line)?;
    let condition = parse_expression(tokens, depth)?;
    expect(tokens, &Token::Then)?;
    let then_branch = parse_statement(tokens, depth)?;

    let else_branch = if eat_if(tokens, &Token::Else) {
        Some(Box::new(parse_statement(tokens, depth)?))
    } else {
        None
    };

    Ok(Statement::Conditional { condition,
                                then_branch: Box::new(then_branch),
                                else_branch,
                                line })
}

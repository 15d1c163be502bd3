use std::iter::Peekable;

use crate::{
    ast::{Block, Declaration, Param, ProcedureDecl, TypeSpec, VarDecl},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            statement::parse_compound_statement,
            utils::{eat_if, expect, nested, parse_identifier, peek_is},
        },
    },
};

/// Parses a block: its declaration section followed by a compound statement.
///
/// Grammar: `block := declarations compound`
///
/// # Returns
/// A [`Block`] owning its declarations and statements.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Block>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let declarations = parse_declarations(tokens, depth)?;
    let statements = parse_compound_statement(tokens, depth)?;

    Ok(Block { declarations,
               statements })
}

/// Parses the declaration section of a block.
///
/// Grammar:
/// ```text
/// declarations := (VAR (vardecl ";")+)* proceduredecl*
/// ```
///
/// Several `VAR` sections may appear, but all of them precede the first
/// procedure, so every variable of a block is declared before any nested
/// body can refer to it. `x, y : INTEGER` declares one variable per name.
/// Declarations keep their source order.
pub fn parse_declarations<'a, I>(tokens: &mut Peekable<I>,
                                 depth: usize)
                                 -> ParseResult<Vec<Declaration>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut declarations = Vec::new();

    while eat_if(tokens, &Token::Var) {
        loop {
            let (names, ty) = parse_typed_names(tokens)?;
            declarations.extend(names.into_iter().map(|(name, line)| {
                                                      Declaration::Variable(VarDecl { name,
                                                                                      ty: ty.clone(),
                                                                                      line })
                                                  }));
            expect(tokens, &Token::Semicolon)?;
            if !matches!(tokens.peek(), Some((Token::Identifier(_), _))) {
                break;
            }
        }
    }
    while peek_is(tokens, &Token::Procedure) {
        declarations.push(Declaration::Procedure(parse_procedure_declaration(tokens, depth)?));
    }

    Ok(declarations)
}

/// Parses a procedure declaration. Its block sits one nesting level below
/// `depth`.
///
/// Grammar:
/// ```text
/// proceduredecl := PROCEDURE ID ("(" paramlist? ")")? ";" block ";"
/// paramlist     := param (";" param)*
/// ```
pub fn parse_procedure_declaration<'a, I>(tokens: &mut Peekable<I>,
                                          depth: usize)
                                          -> ParseResult<ProcedureDecl>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Procedure)?;
    let depth = nested(depth, line)?;
    let (name, _) = parse_identifier(tokens)?;

    let mut params = Vec::new();
    if eat_if(tokens, &Token::LParen) && !eat_if(tokens, &Token::RParen) {
        loop {
            let (names, ty) = parse_typed_names(tokens)?;
            params.extend(names.into_iter().map(|(name, line)| Param { name,
                                                                       ty: ty.clone(),
                                                                       line }));
            if !eat_if(tokens, &Token::Semicolon) {
                break;
            }
        }
        expect(tokens, &Token::RParen)?;
    }

    expect(tokens, &Token::Semicolon)?;
    let block = parse_block(tokens, depth)?;
    expect(tokens, &Token::Semicolon)?;

    Ok(ProcedureDecl { name,
                       params,
                       block,
                       line })
}

/// Parses `ID ("," ID)* ":" type_spec`, shared by variable declarations and
/// formal parameters.
fn parse_typed_names<'a, I>(tokens: &mut Peekable<I>)
                            -> ParseResult<(Vec<(String, usize)>, TypeSpec)>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut names = vec![parse_identifier(tokens)?];
    while peek_is(tokens, &Token::Comma) {
        tokens.next();
        names.push(parse_identifier(tokens)?);
    }
    expect(tokens, &Token::Colon)?;
    let ty = parse_type_spec(tokens)?;

    Ok((names, ty))
}

/// Parses a type name.
///
/// Grammar: `type_spec := INTEGER | REAL | ID`
///
/// Built-in type keywords are normalized to upper case; other identifiers
/// are kept as written and resolved later by the analyzer.
fn parse_type_spec<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<TypeSpec>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Integer, line)) => Ok(TypeSpec { name: Token::Integer.spelling().to_string(),
                                                      line: *line, }),
        Some((Token::Real, line)) => Ok(TypeSpec { name: Token::Real.spelling().to_string(),
                                                   line: *line, }),
        Some((Token::Identifier(name), line)) => Ok(TypeSpec { name: name.clone(),
                                                               line: *line, }),
        Some((tok, line)) => Err(ParseError::UnexpectedToken { expected: "type name".to_string(),
                                                               found:    tok.to_string(),
                                                               line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: "type name".to_string(),
                                                       line:     0, }),
    }
}

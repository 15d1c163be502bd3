//! # pasci
//!
//! pasci is an interpreter for a small Pascal-like language written in Rust.
//! Source text goes through a lexer, a recursive-descent parser, a scope-aware
//! semantic analyzer and finally a tree-walking interpreter that runs
//! procedures on a call stack with static scoping.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    error::Error,
    interpreter::{
        analyzer::{core::SemanticAnalyzer, symbol::ProgramSymbols},
        evaluator::{
            call_stack::{Bindings, CallStack},
            core::Interpreter,
        },
        lexer::tokenize,
        parser::core::{parse_expression_unit, parse_program},
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the program, block, declaration, statement and
/// expression types that represent source code as a tree. The AST is built
/// by the parser, checked by the analyzer and executed by the evaluator.
///
/// # Responsibilities
/// - Defines node types for all language constructs.
/// - Attaches source line numbers to nodes for error reporting.
pub mod ast;
/// Provides unified error types for every stage of the pipeline.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// analysis or interpretation, and classifies them into error kinds.
///
/// # Responsibilities
/// - Defines one error enum per stage and a wrapper over all of them.
/// - Attaches line numbers and detailed messages for context.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, analysis, evaluation and value
/// representations.
pub mod interpreter;
/// General utilities shared across the interpreter.
pub mod util;

/// Lexes and parses a program without analyzing it.
///
/// # Example
/// ```
/// let program = pasci::parse("PROGRAM p; BEGIN END.").unwrap();
/// assert_eq!(program.name, "p");
///
/// assert!(pasci::parse("PROGRAM p; BEGIN END").is_err());
/// ```
pub fn parse(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source)?;
    Ok(parse_program(&tokens)?)
}

/// Lexes, parses and analyzes a program without running it.
///
/// # Example
/// ```
/// use pasci::error::ErrorKind;
///
/// assert!(pasci::analyze("PROGRAM p; VAR x : INTEGER; BEGIN x := 1 END.").is_ok());
///
/// let err = pasci::analyze("PROGRAM p; BEGIN y := 1 END.").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::UndeclaredSymbol);
/// ```
pub fn analyze(source: &str) -> Result<(), Error> {
    let program = parse(source)?;
    SemanticAnalyzer::analyze(&program)?;
    Ok(())
}

/// Runs a program through the whole pipeline.
///
/// Analysis must succeed before anything is executed.
///
/// # Returns
/// The program's global variables after the main block has finished.
///
/// # Example
/// ```
/// use pasci::interpreter::value::core::Value;
///
/// let source = "
///     PROGRAM demo;
///     VAR a, b : INTEGER;
///     PROCEDURE set(v : INTEGER);
///     BEGIN
///         b := v * 2
///     END;
///     BEGIN
///         a := 10 / 4;
///         set(a)
///     END.";
///
/// let globals = pasci::run(source).unwrap();
/// assert_eq!(globals["a"], Value::Integer(2));
/// assert_eq!(globals["b"], Value::Integer(4));
/// ```
pub fn run(source: &str) -> Result<Bindings, Error> {
    let program = parse(source)?;
    let symbols = SemanticAnalyzer::analyze(&program)?;
    let mut stack = CallStack::new();
    let globals = Interpreter::new(&symbols).interpret(&program, &mut stack)?;
    log::debug!("call stack balanced: {}", stack.is_balanced());
    Ok(globals)
}

/// Evaluates a standalone arithmetic expression.
///
/// No variables are declared, so only literals and operators may appear.
///
/// # Example
/// ```
/// use pasci::interpreter::value::core::Value;
///
/// assert_eq!(pasci::evaluate("2 + 3 * 4").unwrap(), Value::Integer(14));
/// assert_eq!(pasci::evaluate("-7 / 2").unwrap(), Value::Integer(-4));
/// assert!(pasci::evaluate("x + 1").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<Value, Error> {
    let tokens = tokenize(source)?;
    let expr = parse_expression_unit(&tokens)?;
    SemanticAnalyzer::analyze_expression(&expr)?;
    let symbols = ProgramSymbols::default();
    let mut stack = CallStack::new();
    Ok(Interpreter::new(&symbols).evaluate_expression(&expr, &mut stack)?)
}

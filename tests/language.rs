use std::fs;

use pasci::{
    error::{Error, ErrorKind, ParseError, RuntimeError, SemanticError},
    interpreter::{
        evaluator::call_stack::{Bindings, MAX_CALL_DEPTH},
        parser::core::MAX_NESTING,
        value::core::Value,
    },
    run,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_success(src: &str) -> Bindings {
    init_logger();
    run(src).unwrap_or_else(|e| panic!("Program failed: {e}\n{src}"))
}

fn assert_failure(src: &str, kind: ErrorKind) -> Error {
    init_logger();
    match run(src) {
        Ok(globals) => panic!("Program succeeded with {globals:?} but was expected to fail"),
        Err(e) => {
            assert_eq!(e.kind(), kind, "unexpected error: {e}");
            e
        },
    }
}

fn eval(src: &str) -> Value {
    init_logger();
    pasci::evaluate(src).unwrap_or_else(|e| panic!("Expression '{src}' failed: {e}"))
}

fn globals(pairs: &[(&str, i64)]) -> Bindings {
    pairs.iter()
         .map(|(name, value)| ((*name).to_string(), Value::Integer(*value)))
         .collect()
}

#[test]
fn sample_programs_behave() {
    let mut count = 0;

    for (dir, should_succeed) in [("tests/programs/valid", true), ("tests/programs/invalid", false)] {
        for entry in
            WalkDir::new(dir).into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "pas"))
        {
            let path = entry.path();
            let source =
                fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
            count += 1;

            match (run(&source), should_succeed) {
                (Ok(_), true) | (Err(_), false) => {},
                (Err(e), true) => panic!("{path:?} failed: {e}"),
                (Ok(globals), false) => panic!("{path:?} succeeded with {globals:?}"),
            }
        }
    }

    assert!(count > 0, "No sample programs found in tests/programs");
}

#[test]
fn expression_precedence() {
    assert_eq!(eval("2 + 3 * 4"), Value::Integer(14));
    assert_eq!(eval("(2 + 3) * 4"), Value::Integer(20));
    assert_eq!(eval("10 - 4 - 3"), Value::Integer(3));
    assert_eq!(eval("2 * (3 + (4 - 1)) / 4"), Value::Integer(3));
}

#[test]
fn division_rounds_toward_negative_infinity() {
    assert_eq!(eval("7 / 2"), Value::Integer(3));
    assert_eq!(eval("-7 / 2"), Value::Integer(-4));
    assert_eq!(eval("7 / -2"), Value::Integer(-4));
    assert_eq!(eval("-7 / -2"), Value::Integer(3));
}

#[test]
fn unary_operators_nest() {
    assert_eq!(eval("--3"), Value::Integer(3));
    assert_eq!(eval("+-3"), Value::Integer(-3));
    assert_eq!(eval("5 - - - 2"), Value::Integer(3));
    assert_eq!(eval("-(2 + 3) * 2"), Value::Integer(-10));
}

#[test]
fn expression_errors() {
    init_logger();
    assert_eq!(pasci::evaluate("1 / 0").unwrap_err().kind(), ErrorKind::Arithmetic);
    assert_eq!(pasci::evaluate("x + 1").unwrap_err().kind(), ErrorKind::UndeclaredSymbol);
    assert_eq!(pasci::evaluate("(1 + 2").unwrap_err().kind(), ErrorKind::Syntax);
    assert_eq!(pasci::evaluate("1 2").unwrap_err().kind(), ErrorKind::Syntax);
    assert_eq!(pasci::evaluate("1 # 2").unwrap_err().kind(), ErrorKind::Lex);
}

#[test]
fn assignment_updates_binding() {
    let globals = assert_success("PROGRAM p; VAR x : INTEGER; BEGIN x := 5; x := x + 1 END.");
    assert_eq!(globals, self::globals(&[("x", 6)]));
}

#[test]
fn declared_variables_start_at_zero() {
    let globals = assert_success("PROGRAM p; VAR a, b : INTEGER; BEGIN b := a + 1 END.");
    assert_eq!(globals, self::globals(&[("a", 0), ("b", 1)]));
}

#[test]
fn duplicate_declaration_is_rejected() {
    let err = assert_failure("PROGRAM p; VAR x : INTEGER; VAR x : REAL; BEGIN x := 1 END.",
                             ErrorKind::DuplicateSymbol);
    assert_eq!(err,
               Error::Semantic(SemanticError::DuplicateSymbol { name:  "x".to_string(),
                                                                scope: "p".to_string(),
                                                                line:  1, }));
}

#[test]
fn undeclared_variable_is_rejected() {
    assert_failure("PROGRAM p; VAR x : INTEGER; BEGIN x := y END.",
                   ErrorKind::UndeclaredSymbol);
    assert_failure("PROGRAM p; BEGIN y := 1 END.", ErrorKind::UndeclaredSymbol);
}

#[test]
fn undeclared_error_is_raised_before_execution() {
    // The division would fail at runtime; analysis must stop first.
    assert_failure("PROGRAM p; VAR x : INTEGER; BEGIN x := 1 / 0; x := y END.",
                   ErrorKind::UndeclaredSymbol);
}

#[test]
fn keywords_ignore_case() {
    let globals = assert_success("program P; var X : integer; begin X := 2 end.");
    assert_eq!(globals, self::globals(&[("X", 2)]));
    let globals = assert_success("Program p; Var x : Real; Begin x := 3 End.");
    assert_eq!(globals, self::globals(&[("x", 3)]));
}

#[test]
fn identifiers_are_case_sensitive() {
    assert_failure("PROGRAM p; VAR x : INTEGER; BEGIN X := 1 END.",
                   ErrorKind::UndeclaredSymbol);
}

#[test]
fn comments_are_skipped_and_lines_counted() {
    let src = "PROGRAM p;\n{ a comment\n  over two lines }\nBEGIN\n  y := 1\nEND.";
    let err = assert_failure(src, ErrorKind::UndeclaredSymbol);
    assert_eq!(err.to_string(), "Error on line 5: Identifier not found: 'y'.");
}

#[test]
fn lexical_errors() {
    let err = assert_failure("PROGRAM p;\nBEGIN @ END.", ErrorKind::Lex);
    assert_eq!(err,
               Error::Parse(ParseError::UnexpectedCharacter { character: '@',
                                                              line:      2, }));
    assert_failure("PROGRAM p; VAR x : INTEGER; BEGIN x := 99999999999999999999 END.",
                   ErrorKind::Lex);
}

#[test]
fn syntax_errors() {
    assert_failure("PROGRAM p; BEGIN END", ErrorKind::Syntax);
    assert_failure("PROGRAM p; BEGIN END. x", ErrorKind::Syntax);
    assert_failure("PROGRAM p; VAR x : INTEGER; BEGIN x := END.", ErrorKind::Syntax);
    assert_failure("PROGRAM p; VAR x INTEGER; BEGIN END.", ErrorKind::Syntax);
    assert_failure("p; BEGIN END.", ErrorKind::Syntax);
}

#[test]
fn end_of_input_reports_last_line() {
    let err = assert_failure("PROGRAM p;\nBEGIN\nEND", ErrorKind::Syntax);
    assert_eq!(err.to_string(),
               "Error on line 3: Unexpected end of input, expected '.'.");
}

#[test]
fn unknown_type_is_rejected() {
    assert_failure("PROGRAM p; VAR x : STRING; BEGIN END.", ErrorKind::TypeNotFound);
    assert_failure("PROGRAM p; VAR x : INTEGER; y : x; BEGIN END.",
                   ErrorKind::TypeNotFound);
}

#[test]
fn empty_statements_are_allowed() {
    let globals = assert_success("PROGRAM p; VAR x : INTEGER; BEGIN ; x := 1; ; END.");
    assert_eq!(globals, self::globals(&[("x", 1)]));
    assert_success("PROGRAM p; BEGIN END.");
}

#[test]
fn nested_compound_statements() {
    let src = "PROGRAM p;
               VAR a, b : INTEGER;
               BEGIN
                   BEGIN a := 1; BEGIN b := a + 1 END END;
                   a := a + b
               END.";
    assert_eq!(assert_success(src), self::globals(&[("a", 3), ("b", 2)]));
}

#[test]
fn conditionals_select_branch() {
    let src = "PROGRAM p;
               VAR a, b, c : INTEGER;
               BEGIN
                   IF TRUE THEN a := 1 ELSE a := 2;
                   IF 0 THEN b := 1 ELSE b := 2;
                   IF a - 1 THEN c := 5
               END.";
    assert_eq!(assert_success(src), self::globals(&[("a", 1), ("b", 2), ("c", 0)]));
}

#[test]
fn booleans_are_not_integers() {
    let err = assert_failure("PROGRAM p; VAR x : INTEGER; BEGIN x := TRUE + 1 END.",
                             ErrorKind::Arithmetic);
    assert_eq!(err,
               Error::Runtime(RuntimeError::ExpectedInteger { found: "TRUE".to_string(),
                                                              line:  1, }));
}

#[test]
fn runtime_arithmetic_errors() {
    let err = assert_failure("PROGRAM p;\nVAR x : INTEGER;\nBEGIN\n  x := 4 / (2 - 2)\nEND.",
                             ErrorKind::Arithmetic);
    assert_eq!(err, Error::Runtime(RuntimeError::DivisionByZero { line: 4 }));

    assert_failure("PROGRAM p; VAR x : INTEGER; BEGIN x := 9223372036854775807 + 1 END.",
                   ErrorKind::Arithmetic);
    assert_failure("PROGRAM p; VAR x : INTEGER;
                    BEGIN x := 0 - 9223372036854775807 - 1; x := -x END.",
                   ErrorKind::Arithmetic);
}

#[test]
fn procedures_run_with_arguments() {
    let src = "PROGRAM p;
               VAR total : INTEGER;
               PROCEDURE add(a, b : INTEGER; c : REAL);
               BEGIN
                   total := total + a * b + c
               END;
               BEGIN
                   add(2, 3, 4);
                   add(1, 1, 1)
               END.";
    assert_eq!(assert_success(src), self::globals(&[("total", 12)]));
}

#[test]
fn procedure_without_parameters_and_parens() {
    let src = "PROGRAM p;
               VAR n : INTEGER;
               PROCEDURE bump; BEGIN n := n + 1 END;
               PROCEDURE twice(); BEGIN bump; bump() END;
               BEGIN twice END.";
    assert_eq!(assert_success(src), self::globals(&[("n", 2)]));
}

#[test]
fn wrong_argument_count() {
    let err = assert_failure("PROGRAM p;
                              PROCEDURE f(a : INTEGER); BEGIN END;
                              BEGIN f(1, 2) END.",
                             ErrorKind::Arity);
    assert_eq!(err.to_string(),
               "Error on line 3: Procedure 'f' expects 1 argument(s), but 2 were given.");
}

#[test]
fn calling_a_variable_is_rejected() {
    assert_failure("PROGRAM p; VAR x : INTEGER; BEGIN x(1) END.",
                   ErrorKind::UndeclaredSymbol);
    assert_failure("PROGRAM p; BEGIN f END.", ErrorKind::UndeclaredSymbol);
}

#[test]
fn runaway_recursion_is_an_error() {
    let err = assert_failure("PROGRAM p;\nPROCEDURE f; BEGIN f END;\nBEGIN f END.",
                             ErrorKind::Internal);
    assert_eq!(err,
               Error::Runtime(RuntimeError::RecursionLimit { name:  "f".to_string(),
                                                             limit: MAX_CALL_DEPTH,
                                                             line:  2, }));
}

#[test]
fn nesting_depth_is_bounded() {
    init_logger();
    let parens = |n: usize| format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(eval(&parens(MAX_NESTING)), Value::Integer(1));
    assert_eq!(pasci::evaluate(&parens(10_000)).unwrap_err(),
               Error::Parse(ParseError::NestingTooDeep { limit: MAX_NESTING,
                                                         line:  1, }));
    assert_eq!(pasci::evaluate(&format!("{}1", "-".repeat(10_000))).unwrap_err().kind(),
               ErrorKind::Syntax);

    let blocks = format!("PROGRAM p;\nBEGIN {}{} END.",
                         "BEGIN ".repeat(10_000),
                         "END ".repeat(10_000));
    assert_failure(&blocks, ErrorKind::Syntax);
    let branches = format!("PROGRAM p;\nBEGIN {} END.", "IF 1 THEN ".repeat(10_000));
    assert_failure(&branches, ErrorKind::Syntax);
}

#[test]
fn error_kinds_display() {
    assert_eq!(ErrorKind::Lex.to_string(), "LexError");
    assert_eq!(ErrorKind::Syntax.to_string(), "SyntaxError");
    assert_eq!(ErrorKind::DuplicateSymbol.to_string(), "DuplicateSymbolError");
    assert_eq!(ErrorKind::UndeclaredSymbol.to_string(), "UndeclaredSymbolError");
    assert_eq!(ErrorKind::TypeNotFound.to_string(), "TypeNotFoundError");
    assert_eq!(ErrorKind::Arity.to_string(), "ArityError");
    assert_eq!(ErrorKind::Arithmetic.to_string(), "ArithmeticError");
    assert_eq!(ErrorKind::Internal.to_string(), "InternalError");
}

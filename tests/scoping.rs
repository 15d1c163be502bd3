use pasci::{
    error::{Error, ErrorKind, ParseError, SemanticError},
    interpreter::{
        analyzer::{
            core::SemanticAnalyzer,
            scope::{BUILTIN_SCOPE, ScopeChain, ScopedSymbolTable},
            symbol::{BuiltinType, ProcedureId, Symbol, VariableSymbol},
        },
        lexer::tokenize,
        parser::core::parse_program,
        value::core::Value,
    },
    run,
};
use pretty_assertions::assert_eq;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn global(src: &str, name: &str) -> Value {
    init_logger();
    let globals = run(src).unwrap_or_else(|e| panic!("Program failed: {e}"));
    globals[name]
}

fn analysis_error(src: &str) -> SemanticError {
    init_logger();
    match pasci::analyze(src) {
        Err(Error::Semantic(e)) => e,
        other => panic!("Expected a semantic error, got {other:?}"),
    }
}

#[test]
fn nested_procedure_sees_declaring_scope_not_caller() {
    let src = "PROGRAM main;
               VAR x, result : INTEGER;
               PROCEDURE a;
                   VAR x : INTEGER;
                   PROCEDURE b;
                   BEGIN
                       result := x
                   END;
                   PROCEDURE c;
                       VAR x : INTEGER;
                   BEGIN
                       x := 99;
                       b
                   END;
               BEGIN
                   x := 7;
                   c
               END;
               BEGIN
                   x := 1;
                   a
               END.";
    assert_eq!(global(src, "result"), Value::Integer(7));
    assert_eq!(global(src, "x"), Value::Integer(1));
}

#[test]
fn parameters_shadow_globals() {
    let src = "PROGRAM p;
               VAR x, y : INTEGER;
               PROCEDURE f(x : INTEGER);
               BEGIN
                   x := x + 10;
                   y := x
               END;
               BEGIN
                   x := 1;
                   f(5)
               END.";
    assert_eq!(global(src, "x"), Value::Integer(1));
    assert_eq!(global(src, "y"), Value::Integer(15));
}

#[test]
fn inner_procedure_shadows_outer_procedure() {
    let src = "PROGRAM p;
               VAR trace : INTEGER;
               PROCEDURE g; BEGIN trace := trace * 10 + 1 END;
               PROCEDURE h;
                   PROCEDURE g; BEGIN trace := trace * 10 + 2 END;
               BEGIN
                   g
               END;
               BEGIN
                   g;
                   h;
                   g
               END.";
    assert_eq!(global(src, "trace"), Value::Integer(121));
}

#[test]
fn recursion_uses_fresh_frames() {
    let src = "PROGRAM fact;
               VAR acc, calls : INTEGER;
               PROCEDURE step(k : INTEGER);
                   VAR local : INTEGER;
               BEGIN
                   calls := calls + 1;
                   local := k;
                   IF k THEN
                   BEGIN
                       step(k - 1);
                       acc := acc * local
                   END
               END;
               BEGIN
                   acc := 1;
                   step(5)
               END.";
    assert_eq!(global(src, "acc"), Value::Integer(120));
    assert_eq!(global(src, "calls"), Value::Integer(6));
}

#[test]
fn outer_variables_are_written_through() {
    let src = "PROGRAM p;
               VAR depth : INTEGER;
               PROCEDURE outer;
                   VAR hits : INTEGER;
                   PROCEDURE inner;
                   BEGIN
                       hits := hits + 1;
                       depth := hits
                   END;
               BEGIN
                   inner;
                   inner;
                   inner
               END;
               BEGIN
                   outer
               END.";
    assert_eq!(global(src, "depth"), Value::Integer(3));
}

#[test]
fn later_nested_procedure_does_not_capture_earlier_calls() {
    let src = "PROGRAM p;
               VAR hits : INTEGER;
               PROCEDURE q; BEGIN hits := hits + 1 END;
               PROCEDURE outer;
                   PROCEDURE a; BEGIN q END;
                   PROCEDURE q(n : INTEGER); BEGIN hits := hits + 100 * n END;
               BEGIN
                   a;
                   q(2)
               END;
               BEGIN
                   outer
               END.";
    assert_eq!(global(src, "hits"), Value::Integer(201));

    let program = parse_program(&tokenize(src).unwrap()).unwrap();
    let symbols = SemanticAnalyzer::analyze(&program).unwrap();
    assert_eq!(symbols.resolve_procedure("q", Some(ProcedureId(2))), Some(ProcedureId(0)));
    assert_eq!(symbols.resolve_procedure("q", Some(ProcedureId(1))), Some(ProcedureId(3)));
    assert_eq!(symbols.resolve_procedure("q", None), Some(ProcedureId(0)));
}

#[test]
fn variables_cannot_follow_nested_procedures() {
    init_logger();
    let err = pasci::analyze("PROGRAM p;
                              VAR x : INTEGER;
                              PROCEDURE outer;
                                  PROCEDURE a; BEGIN x := 5 END;
                                  VAR x : INTEGER;
                              BEGIN a END;
                              BEGIN outer END.").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert!(matches!(err, Error::Parse(ParseError::UnexpectedToken { line: 5, .. })));

    let src = "PROGRAM p;
               VAR x : INTEGER;
               PROCEDURE outer;
                   VAR y : INTEGER;
                   VAR x : INTEGER;
                   PROCEDURE a; BEGIN x := 5; y := x END;
               BEGIN a END;
               BEGIN outer END.";
    assert_eq!(global(src, "x"), Value::Integer(0));
}

#[test]
fn duplicate_in_procedure_scope() {
    let err = analysis_error("PROGRAM p;
                              PROCEDURE f(a : INTEGER);
                                  VAR a : INTEGER;
                              BEGIN END;
                              BEGIN END.");
    assert_eq!(err,
               SemanticError::DuplicateSymbol { name:  "a".to_string(),
                                                scope: "f".to_string(),
                                                line:  3, });
}

#[test]
fn duplicate_parameters_and_procedures() {
    assert!(matches!(analysis_error("PROGRAM p; PROCEDURE f(a, a : INTEGER); BEGIN END; BEGIN END."),
                     SemanticError::DuplicateSymbol { .. }));
    assert!(matches!(analysis_error("PROGRAM p;
                                     PROCEDURE f; BEGIN END;
                                     PROCEDURE f; BEGIN END;
                                     BEGIN END."),
                     SemanticError::DuplicateSymbol { .. }));
    assert!(matches!(analysis_error("PROGRAM p; VAR f : INTEGER; PROCEDURE f; BEGIN END; BEGIN END."),
                     SemanticError::DuplicateSymbol { .. }));
}

#[test]
fn shadowing_an_outer_name_is_not_a_duplicate() {
    init_logger();
    assert!(pasci::analyze("PROGRAM p;
                            VAR a : INTEGER;
                            PROCEDURE f(a : INTEGER);
                                PROCEDURE g;
                                    VAR a : INTEGER;
                                BEGIN END;
                            BEGIN END;
                            BEGIN END.").is_ok());
}

#[test]
fn locals_are_invisible_outside() {
    assert_eq!(analysis_error("PROGRAM p;
                               PROCEDURE f; VAR t : INTEGER; BEGIN t := 1 END;
                               BEGIN t := 2 END."),
               SemanticError::UndeclaredSymbol { name: "t".to_string(),
                                                 line: 3, });
    assert!(matches!(analysis_error("PROGRAM p;
                                     PROCEDURE a; PROCEDURE b; BEGIN END; BEGIN END;
                                     BEGIN b END."),
                     SemanticError::UndeclaredSymbol { .. }));
}

#[test]
fn procedures_must_be_declared_before_use() {
    assert!(matches!(analysis_error("PROGRAM p;
                                     PROCEDURE a; BEGIN b END;
                                     PROCEDURE b; BEGIN END;
                                     BEGIN a END."),
                     SemanticError::UndeclaredSymbol { .. }));
}

#[test]
fn procedure_name_is_not_a_variable() {
    assert!(matches!(analysis_error("PROGRAM p; PROCEDURE f; BEGIN END; BEGIN f := 1 END."),
                     SemanticError::UndeclaredSymbol { .. }));
}

#[test]
fn parameter_types_must_exist() {
    init_logger();
    let err = pasci::analyze("PROGRAM p; PROCEDURE f(a : CHAR); BEGIN END; BEGIN END.").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeNotFound);
}

#[test]
fn analysis_records_procedure_levels() {
    init_logger();
    let src = "PROGRAM p;
               PROCEDURE a(x : INTEGER; y : REAL);
                   PROCEDURE b; BEGIN END;
               BEGIN END;
               BEGIN END.";
    let program = parse_program(&tokenize(src).unwrap()).unwrap();
    let symbols = SemanticAnalyzer::analyze(&program).unwrap();

    let a = symbols.procedure(ProcedureId(0)).unwrap();
    assert_eq!(a.name, "a");
    assert_eq!(a.scope_level, 2);
    assert_eq!(a.enclosing, None);
    assert_eq!(a.params,
               vec![VariableSymbol { name: "x".to_string(),
                                     ty:   BuiltinType::Integer, },
                    VariableSymbol { name: "y".to_string(),
                                     ty:   BuiltinType::Real, }]);

    assert_eq!(a.line, 2);
    assert_eq!(a.visible, ProcedureId(2));

    let b = symbols.procedure(ProcedureId(1)).unwrap();
    assert_eq!(b.scope_level, 3);
    assert_eq!(b.enclosing, Some(ProcedureId(0)));
    assert_eq!(b.line, 3);

    assert_eq!(symbols.resolve_procedure("b", Some(ProcedureId(1))), Some(ProcedureId(1)));
    assert_eq!(symbols.resolve_procedure("a", Some(ProcedureId(1))), Some(ProcedureId(0)));
    assert_eq!(symbols.resolve_procedure("b", None), None);
}

#[test]
fn scope_chain_lookup_and_levels() {
    init_logger();
    let mut chain = ScopeChain::new();
    let mut program = chain.enter("main");
    program.define(Symbol::Variable(VariableSymbol { name: "x".to_string(),
                                                     ty:   BuiltinType::Integer, }));
    {
        let mut inner = program.enter("inner");
        assert_eq!(inner.current_level(), 2);
        assert!(inner.lookup("x", false).is_some());
        assert!(inner.lookup("x", true).is_none());
        assert!(matches!(inner.lookup("REAL", false), Some(Symbol::BuiltinType(BuiltinType::Real))));

        inner.define(Symbol::Variable(VariableSymbol { name: "x".to_string(),
                                                       ty:   BuiltinType::Real, }));
        assert!(matches!(inner.lookup("x", false),
                         Some(Symbol::Variable(VariableSymbol { ty: BuiltinType::Real, .. }))));
        assert_eq!(inner.depth(), 2);
    }
    assert_eq!(program.depth(), 1);
    assert!(matches!(program.lookup("x", false),
                     Some(Symbol::Variable(VariableSymbol { ty: BuiltinType::Integer, .. }))));
}

#[test]
fn builtin_scope_is_seeded_once() {
    assert_eq!(BUILTIN_SCOPE.scope_level(), 0);
    assert_eq!(BUILTIN_SCOPE.len(), 2);
    assert!(BUILTIN_SCOPE.lookup_local("INTEGER").is_some());
    assert!(BUILTIN_SCOPE.lookup_local("integer").is_none());
}

#[test]
fn symbol_table_dump() {
    let mut table = ScopedSymbolTable::new("main", 1);
    table.define(Symbol::Variable(VariableSymbol { name: "y".to_string(),
                                                   ty:   BuiltinType::Integer, }));
    table.define(Symbol::Procedure { name: "f".to_string(),
                                     id:   ProcedureId(0), });

    assert_eq!(table.to_string(),
               "SCOPE (SCOPED SYMBOL TABLE)\n   scope name  : main\n   scope level : 1\n   f           : \
                <procedure f #0>\n   y           : <variable y: INTEGER>\n");
}

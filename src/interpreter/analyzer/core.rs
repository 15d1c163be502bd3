use crate::{
    ast::{Block, Declaration, Expr, ProcedureDecl, Program, Statement, TypeSpec, VarDecl},
    error::SemanticError,
    interpreter::analyzer::{
        scope::ScopeChain,
        symbol::{BuiltinType, ProcedureId, ProcedureSymbol, ProgramSymbols, Symbol, VariableSymbol},
    },
};

/// Result type used by the analyzer.
pub type AnalysisResult<T> = Result<T, SemanticError>;

/// Validates declarations and references of a parsed unit.
///
/// The analyzer walks the tree once. The open scopes are passed down
/// explicitly as a [`ScopeChain`]; the analyzer itself only accumulates the
/// procedure signatures the interpreter needs later.
pub struct SemanticAnalyzer<'a> {
    symbols: ProgramSymbols<'a>,
}

impl<'a> SemanticAnalyzer<'a> {
    /// Analyzes a whole program.
    ///
    /// # Returns
    /// The retained procedure signatures. The symbol tables themselves are
    /// discarded before this returns.
    ///
    /// # Errors
    /// The first `SemanticError` found; the program must not be interpreted.
    ///
    /// # Example
    /// ```
    /// use pasci::interpreter::{
    ///     analyzer::core::SemanticAnalyzer,
    ///     lexer::tokenize,
    ///     parser::core::parse_program,
    /// };
    ///
    /// let source = "PROGRAM p; VAR x : INTEGER;
    ///               PROCEDURE inc(by : INTEGER); BEGIN x := x + by END;
    ///               BEGIN inc(2) END.";
    /// let program = parse_program(&tokenize(source).unwrap()).unwrap();
    /// let symbols = SemanticAnalyzer::analyze(&program).unwrap();
    ///
    /// assert_eq!(symbols.procedures().len(), 1);
    /// assert_eq!(symbols.procedures()[0].params[0].name, "by");
    /// ```
    pub fn analyze(program: &'a Program) -> AnalysisResult<ProgramSymbols<'a>> {
        let mut analyzer = Self { symbols: ProgramSymbols::default() };
        let mut scopes = ScopeChain::new();
        analyzer.visit_program(program, &mut scopes)?;
        Ok(analyzer.symbols)
    }

    /// Analyzes a standalone expression inside an empty global scope.
    ///
    /// # Errors
    /// `UndeclaredSymbol` for any variable reference, since nothing is
    /// declared.
    pub fn analyze_expression(expr: &Expr) -> AnalysisResult<()> {
        let mut scopes = ScopeChain::new();
        let scope = scopes.enter("global");
        visit_expr(expr, &scope)
    }

    fn visit_program(&mut self, program: &'a Program, scopes: &mut ScopeChain) -> AnalysisResult<()> {
        let mut scope = scopes.enter(&program.name);
        self.visit_block(&program.block, &mut scope, None)
    }

    fn visit_block(&mut self,
                   block: &'a Block,
                   scopes: &mut ScopeChain,
                   owner: Option<ProcedureId>)
                   -> AnalysisResult<()> {
        for declaration in &block.declarations {
            match declaration {
                Declaration::Variable(decl) => visit_var_decl(decl, scopes)?,
                Declaration::Procedure(decl) => self.visit_procedure_decl(decl, scopes, owner)?,
            }
        }
        if let Some(id) = owner {
            self.symbols.seal(id);
        }
        for statement in &block.statements {
            visit_statement(statement, scopes)?;
        }
        Ok(())
    }

    /// Defines the procedure in the current scope, then analyzes its
    /// parameters and body in a new scope nested inside it.
    fn visit_procedure_decl(&mut self,
                            decl: &'a ProcedureDecl,
                            scopes: &mut ScopeChain,
                            owner: Option<ProcedureId>)
                            -> AnalysisResult<()> {
        ensure_not_declared(&decl.name, decl.line, scopes)?;

        // Until its block is sealed a procedure sees itself and everything
        // registered before it.
        let visible = ProcedureId(self.symbols.procedures().len() + 1);
        let id = self.symbols.register(ProcedureSymbol { name: decl.name.clone(),
                                                         params: Vec::new(),
                                                         block: &decl.block,
                                                         scope_level: scopes.current_level() + 1,
                                                         enclosing: owner,
                                                         line: decl.line,
                                                         visible });
        scopes.define(Symbol::Procedure { name: decl.name.clone(),
                                          id });

        let mut scope = scopes.enter(&decl.name);
        for param in &decl.params {
            let ty = resolve_type(&param.ty, &scope)?;
            ensure_not_declared(&param.name, param.line, &scope)?;
            let symbol = VariableSymbol { name: param.name.clone(),
                                          ty };
            self.symbols.push_param(id, symbol.clone());
            scope.define(Symbol::Variable(symbol));
        }

        self.visit_block(&decl.block, &mut scope, Some(id))
    }
}

fn visit_var_decl(decl: &VarDecl, scopes: &mut ScopeChain) -> AnalysisResult<()> {
    let ty = resolve_type(&decl.ty, scopes)?;
    ensure_not_declared(&decl.name, decl.line, scopes)?;
    scopes.define(Symbol::Variable(VariableSymbol { name: decl.name.clone(),
                                                    ty }));
    Ok(())
}

fn visit_statement(statement: &Statement, scopes: &ScopeChain) -> AnalysisResult<()> {
    match statement {
        Statement::Compound(statements) => statements.iter()
                                                     .try_for_each(|s| visit_statement(s, scopes)),
        Statement::Assignment { target, value, .. } => {
            visit_expr(value, scopes)?;
            resolve_variable(&target.name, target.line, scopes)
        },
        Statement::ProcedureCall { name,
                                   arguments,
                                   line, } => {
            if !matches!(scopes.lookup(name, false), Some(Symbol::Procedure { .. })) {
                return Err(SemanticError::UndeclaredSymbol { name: name.clone(),
                                                             line: *line, });
            }
            arguments.iter().try_for_each(|arg| visit_expr(arg, scopes))
        },
        Statement::Conditional { condition,
                                 then_branch,
                                 else_branch,
                                 .. } => {
            visit_expr(condition, scopes)?;
            visit_statement(then_branch, scopes)?;
            else_branch.as_deref()
                       .map_or(Ok(()), |branch| visit_statement(branch, scopes))
        },
        Statement::NoOp => Ok(()),
    }
}

fn visit_expr(expr: &Expr, scopes: &ScopeChain) -> AnalysisResult<()> {
    match expr {
        Expr::Number { .. } | Expr::Boolean { .. } => Ok(()),
        Expr::Variable(var) => resolve_variable(&var.name, var.line, scopes),
        Expr::UnaryOp { expr, .. } => visit_expr(expr, scopes),
        Expr::BinaryOp { left, right, .. } => {
            visit_expr(left, scopes)?;
            visit_expr(right, scopes)
        },
    }
}

/// A variable reference must resolve to a variable; a procedure or type of
/// the same name does not count.
fn resolve_variable(name: &str, line: usize, scopes: &ScopeChain) -> AnalysisResult<()> {
    match scopes.lookup(name, false) {
        Some(Symbol::Variable(_)) => Ok(()),
        _ => Err(SemanticError::UndeclaredSymbol { name: name.to_string(),
                                                   line }),
    }
}

fn resolve_type(ty: &TypeSpec, scopes: &ScopeChain) -> AnalysisResult<BuiltinType> {
    match scopes.lookup(&ty.name, false) {
        Some(Symbol::BuiltinType(builtin)) => Ok(*builtin),
        _ => Err(SemanticError::TypeNotFound { name: ty.name.clone(),
                                               line: ty.line, }),
    }
}

/// Only the current scope is checked, so shadowing an outer name is allowed.
fn ensure_not_declared(name: &str, line: usize, scopes: &ScopeChain) -> AnalysisResult<()> {
    if scopes.lookup(name, true).is_some() {
        return Err(SemanticError::DuplicateSymbol { name: name.to_string(),
                                                    scope: scopes.current()
                                                                 .scope_name()
                                                                 .to_string(),
                                                    line });
    }
    Ok(())
}

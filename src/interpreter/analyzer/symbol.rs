use std::collections::HashMap;

use crate::ast::Block;

/// The built-in types known to every unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    /// `INTEGER`
    Integer,
    /// `REAL`
    Real,
}

impl BuiltinType {
    /// Every built-in type, in the order they are seeded.
    pub const ALL: [Self; 2] = [Self::Integer, Self::Real];

    /// The name under which the type is declared.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
        }
    }
}

impl std::fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A declared variable or formal parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSymbol {
    /// The variable name.
    pub name: String,
    /// The declared type.
    pub ty:   BuiltinType,
}

/// Identifies a procedure inside [`ProgramSymbols`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcedureId(pub usize);

/// An entry of a scoped symbol table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    /// A built-in type such as `INTEGER`.
    BuiltinType(BuiltinType),
    /// A variable or parameter.
    Variable(VariableSymbol),
    /// A procedure; its signature lives in [`ProgramSymbols`].
    Procedure {
        /// The procedure name.
        name: String,
        /// Where the signature is stored.
        id:   ProcedureId,
    },
}

impl Symbol {
    /// The name the symbol is defined under.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::BuiltinType(ty) => ty.name(),
            Self::Variable(var) => &var.name,
            Self::Procedure { name, .. } => name,
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BuiltinType(ty) => write!(f, "<builtin type {ty}>"),
            Self::Variable(var) => write!(f, "<variable {}: {}>", var.name, var.ty),
            Self::Procedure { name, id } => write!(f, "<procedure {name} #{}>", id.0),
        }
    }
}

/// A procedure signature retained after analysis.
///
/// The scope tables that produced it are gone by the time the interpreter
/// runs; this is what remains of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureSymbol<'a> {
    /// The procedure name.
    pub name:        String,
    /// The formal parameters, in declaration order.
    pub params:      Vec<VariableSymbol>,
    /// The procedure body.
    pub block:       &'a Block,
    /// Level of the scope opened for the body. The program scope is level 1.
    pub scope_level: usize,
    /// The procedure whose block declares this one, `None` for the program.
    pub enclosing:   Option<ProcedureId>,
    /// Line of the declaration.
    pub line:        usize,
    /// Procedures with a lower id were declared before the body's statements.
    /// Calls made from the body can only reach those.
    pub visible:     ProcedureId,
}

/// Procedure signatures of an analyzed program, indexed by declaring scope.
#[derive(Debug, Default)]
pub struct ProgramSymbols<'a> {
    procedures: Vec<ProcedureSymbol<'a>>,
    index:      HashMap<(Option<ProcedureId>, String), ProcedureId>,
}

impl<'a> ProgramSymbols<'a> {
    /// Stores a new signature and returns its id.
    pub(crate) fn register(&mut self, symbol: ProcedureSymbol<'a>) -> ProcedureId {
        let id = ProcedureId(self.procedures.len());
        self.index.insert((symbol.enclosing, symbol.name.clone()), id);
        self.procedures.push(symbol);
        id
    }

    /// Marks the declarations of `id`'s block as complete. Every procedure
    /// registered so far is visible from its statements.
    pub(crate) fn seal(&mut self, id: ProcedureId) {
        let visible = ProcedureId(self.procedures.len());
        if let Some(procedure) = self.procedures.get_mut(id.0) {
            procedure.visible = visible;
        }
    }

    /// Appends a formal parameter to a registered signature.
    pub(crate) fn push_param(&mut self, id: ProcedureId, param: VariableSymbol) {
        if let Some(procedure) = self.procedures.get_mut(id.0) {
            procedure.params.push(param);
        }
    }

    /// Returns the signature stored under `id`.
    #[must_use]
    pub fn procedure(&self, id: ProcedureId) -> Option<&ProcedureSymbol<'a>> {
        self.procedures.get(id.0)
    }

    /// All signatures, in declaration order.
    #[must_use]
    pub fn procedures(&self) -> &[ProcedureSymbol<'a>] {
        &self.procedures
    }

    /// Resolves a procedure name as seen from inside `scope`.
    ///
    /// The search starts with the procedures declared by `scope` itself
    /// (`None` being the program block) and moves outward through the
    /// declaring procedures, following program-text nesting only. A
    /// procedure registered after the declarations of `scope` were complete
    /// is skipped, even when its declaring scope is on the way out, so the
    /// result is the declaration the analyzer saw at the call site.
    #[must_use]
    pub fn resolve_procedure(&self, name: &str, scope: Option<ProcedureId>) -> Option<ProcedureId> {
        let visible = match scope {
            Some(id) => self.procedure(id)?.visible,
            None => ProcedureId(self.procedures.len()),
        };
        let mut scope = scope;
        loop {
            if let Some(id) = self.index.get(&(scope, name.to_string()))
               && *id < visible
            {
                return Some(*id);
            }
            scope = self.procedure(scope?)?.enclosing;
        }
    }
}
